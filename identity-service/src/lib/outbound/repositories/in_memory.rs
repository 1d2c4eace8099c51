use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::StoreError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::TenantId;
use crate::account::ports::CredentialStore;
use crate::employee::models::Employee;
use crate::employee::models::EmployeeId;
use crate::employee::models::PageRequest;
use crate::employee::ports::EmployeeRepository;

/// Process-local credential store.
///
/// Used by tests and database-less local runs. Rejects a second account
/// with the same email exactly like the database constraint does.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    /// Replace a stored account wholesale (e.g. to change its role).
    pub async fn replace(&self, account: Account) {
        self.accounts.write().await.insert(account.id, account);
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(StoreError::DuplicateEmail(account.email.to_string()));
        }

        accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| &a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.get(id).cloned())
    }
}

/// Process-local employee repository with the same per-tenant email
/// uniqueness as the `employees_tenant_email_key` constraint.
#[derive(Default)]
pub struct InMemoryEmployeeRepository {
    employees: RwLock<HashMap<EmployeeId, Employee>>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.employees.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.employees.read().await.is_empty()
    }
}

fn matches_search(employee: &Employee, search: &str) -> bool {
    let needle = search.to_lowercase();
    [
        employee.name.as_str(),
        employee.email.as_str(),
        employee.phone_number.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn save(&self, employee: &Employee) -> Result<(), StoreError> {
        let mut employees = self.employees.write().await;

        if employees
            .values()
            .any(|e| e.tenant_id == employee.tenant_id && e.email == employee.email)
        {
            return Err(StoreError::DuplicateEmail(employee.email.to_string()));
        }

        employees.insert(employee.id, employee.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        id: &EmployeeId,
    ) -> Result<Option<Employee>, StoreError> {
        Ok(self
            .employees
            .read()
            .await
            .get(id)
            .filter(|e| &e.tenant_id == tenant_id)
            .cloned())
    }

    async fn find_by_email(
        &self,
        tenant_id: &TenantId,
        email: &EmailAddress,
    ) -> Result<Option<Employee>, StoreError> {
        Ok(self
            .employees
            .read()
            .await
            .values()
            .find(|e| &e.tenant_id == tenant_id && &e.email == email)
            .cloned())
    }

    async fn find_page(
        &self,
        tenant_id: &TenantId,
        request: &PageRequest,
    ) -> Result<(u64, Vec<Employee>), StoreError> {
        let employees = self.employees.read().await;

        let mut matching: Vec<&Employee> = employees
            .values()
            .filter(|e| &e.tenant_id == tenant_id)
            .filter(|e| request.search().map_or(true, |s| matches_search(e, s)))
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.0.cmp(&b.id.0)));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .cloned()
            .collect();

        Ok((total, page))
    }

    async fn update(&self, employee: &Employee) -> Result<bool, StoreError> {
        let mut employees = self.employees.write().await;

        if !employees
            .get(&employee.id)
            .is_some_and(|e| e.tenant_id == employee.tenant_id)
        {
            return Ok(false);
        }
        if employees.values().any(|e| {
            e.id != employee.id && e.tenant_id == employee.tenant_id && e.email == employee.email
        }) {
            return Err(StoreError::DuplicateEmail(employee.email.to_string()));
        }

        employees.insert(employee.id, employee.clone());
        Ok(true)
    }

    async fn delete(&self, tenant_id: &TenantId, id: &EmployeeId) -> Result<bool, StoreError> {
        let mut employees = self.employees.write().await;

        if !employees.get(id).is_some_and(|e| &e.tenant_id == tenant_id) {
            return Ok(false);
        }

        Ok(employees.remove(id).is_some())
    }
}
