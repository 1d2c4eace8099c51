use async_trait::async_trait;

use crate::account::errors::StoreError;
use crate::account::models::EmailAddress;
use crate::account::models::TenantId;
use crate::employee::errors::EmployeeError;
use crate::employee::models::CreateEmployeeCommand;
use crate::employee::models::Employee;
use crate::employee::models::EmployeeId;
use crate::employee::models::Page;
use crate::employee::models::PageRequest;
use crate::employee::models::UpdateEmployeeCommand;

/// Port for tenant-scoped employee management.
///
/// `tenant_id` always comes from the caller's verified identity, never
/// from the request body.
#[async_trait]
pub trait EmployeeServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `AlreadyExists` - Email already used in this tenant
    /// * `Internal` - Repository failure
    async fn create(
        &self,
        tenant_id: TenantId,
        command: CreateEmployeeCommand,
    ) -> Result<Employee, EmployeeError>;

    async fn list(
        &self,
        tenant_id: TenantId,
        request: PageRequest,
    ) -> Result<Page<Employee>, EmployeeError>;

    /// # Errors
    /// * `NotFound` - No such employee in this tenant
    /// * `Internal` - Repository failure
    async fn get(&self, tenant_id: TenantId, id: EmployeeId) -> Result<Employee, EmployeeError>;

    /// # Errors
    /// * `NotFound` - No such employee in this tenant
    /// * `AlreadyExists` - New email already used in this tenant
    /// * `Internal` - Repository failure
    async fn update(
        &self,
        tenant_id: TenantId,
        id: EmployeeId,
        command: UpdateEmployeeCommand,
    ) -> Result<Employee, EmployeeError>;

    /// # Errors
    /// * `NotFound` - No such employee in this tenant
    /// * `Internal` - Repository failure
    async fn delete(&self, tenant_id: TenantId, id: EmployeeId) -> Result<(), EmployeeError>;
}

/// Persistence capability for employee records.
///
/// Every lookup is filtered by tenant. Implementations must enforce
/// per-tenant email uniqueness on `save` and `update`.
#[async_trait]
pub trait EmployeeRepository: Send + Sync + 'static {
    /// # Errors
    /// * `DuplicateEmail` - Email already used in the employee's tenant
    /// * `Database` - Storage operation failed
    async fn save(&self, employee: &Employee) -> Result<(), StoreError>;

    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        id: &EmployeeId,
    ) -> Result<Option<Employee>, StoreError>;

    async fn find_by_email(
        &self,
        tenant_id: &TenantId,
        email: &EmailAddress,
    ) -> Result<Option<Employee>, StoreError>;

    /// One page of the tenant's employees ordered by name.
    ///
    /// # Returns
    /// Total number of matching employees and the requested page of them
    async fn find_page(
        &self,
        tenant_id: &TenantId,
        request: &PageRequest,
    ) -> Result<(u64, Vec<Employee>), StoreError>;

    /// Overwrite the mutable fields of an existing employee.
    ///
    /// # Returns
    /// `false` if no employee with that id exists in the tenant
    async fn update(&self, employee: &Employee) -> Result<bool, StoreError>;

    /// # Returns
    /// `false` if no employee with that id exists in the tenant
    async fn delete(&self, tenant_id: &TenantId, id: &EmployeeId) -> Result<bool, StoreError>;
}
