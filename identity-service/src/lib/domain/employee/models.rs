use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::FieldError;
use crate::account::errors::IdError;
use crate::account::models::EmailAddress;
use crate::account::models::TenantId;
use crate::employee::errors::PageError;

/// Employee record owned by exactly one tenant.
///
/// `id` and `tenant_id` never change after creation; email is unique
/// within a tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub tenant_id: TenantId,
    pub name: String,
    pub email: EmailAddress,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn create(tenant_id: TenantId, command: CreateEmployeeCommand) -> Self {
        let now = Utc::now();

        Self {
            id: EmployeeId::new(),
            tenant_id,
            name: command.name,
            email: command.email,
            phone_number: command.phone_number,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields present in `command` and bump `updated_at`.
    pub fn apply(&mut self, command: UpdateEmployeeCommand) {
        if let Some(name) = command.name {
            self.name = name;
        }
        if let Some(email) = command.email {
            self.email = email;
        }
        if let Some(phone_number) = command.phone_number {
            self.phone_number = phone_number;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmployeeId(pub Uuid);

impl EmployeeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an employee ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        Uuid::parse_str(s)
            .map(EmployeeId)
            .map_err(|e| IdError::InvalidFormat(e.to_string()))
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated fields for a new employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEmployeeCommand {
    pub name: String,
    pub email: EmailAddress,
    pub phone_number: String,
}

impl CreateEmployeeCommand {
    /// # Errors
    /// * `Required` - Name or phone number is blank
    pub fn new(
        name: String,
        email: EmailAddress,
        phone_number: String,
    ) -> Result<Self, FieldError> {
        if name.trim().is_empty() {
            return Err(FieldError::Required("name"));
        }
        if phone_number.trim().is_empty() {
            return Err(FieldError::Required("phone_number"));
        }

        Ok(Self {
            name,
            email,
            phone_number,
        })
    }
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateEmployeeCommand {
    pub name: Option<String>,
    pub email: Option<EmailAddress>,
    pub phone_number: Option<String>,
}

impl UpdateEmployeeCommand {
    /// # Errors
    /// * `Required` - A field is present but blank
    pub fn new(
        name: Option<String>,
        email: Option<EmailAddress>,
        phone_number: Option<String>,
    ) -> Result<Self, FieldError> {
        if name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(FieldError::Required("name"));
        }
        if phone_number.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(FieldError::Required("phone_number"));
        }

        Ok(Self {
            name,
            email,
            phone_number,
        })
    }
}

/// Which slice of a tenant's employees to list.
///
/// `search` matches case-insensitively against name, email and phone
/// number. Results are ordered by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
    search: Option<String>,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// # Errors
    /// * `PageTooLow` - `page` is zero
    /// * `LimitOutOfRange` - `limit` is zero or above [`Self::MAX_LIMIT`]
    pub fn new(
        page: Option<u32>,
        limit: Option<u32>,
        search: Option<String>,
    ) -> Result<Self, PageError> {
        let page = page.unwrap_or(Self::DEFAULT_PAGE);
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);

        if page == 0 {
            return Err(PageError::PageTooLow(page));
        }
        if !(1..=Self::MAX_LIMIT).contains(&limit) {
            return Err(PageError::LimitOutOfRange {
                max: Self::MAX_LIMIT,
                actual: limit,
            });
        }

        Ok(Self {
            page,
            limit,
            search: search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Rows to skip before this page starts.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
            search: None,
        }
    }
}

/// One page of results plus the total across all pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: &PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page(),
            limit: request.limit(),
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.limit))
    }

    pub fn next_page(&self) -> Option<u32> {
        (u64::from(self.page) < self.total_pages()).then(|| self.page + 1)
    }

    pub fn prev_page(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }
}
