use std::sync::Arc;

use async_trait::async_trait;

use crate::account::errors::StoreError;
use crate::account::models::TenantId;
use crate::employee::errors::EmployeeError;
use crate::employee::models::CreateEmployeeCommand;
use crate::employee::models::Employee;
use crate::employee::models::EmployeeId;
use crate::employee::models::Page;
use crate::employee::models::PageRequest;
use crate::employee::models::UpdateEmployeeCommand;
use crate::employee::ports::EmployeeRepository;
use crate::employee::ports::EmployeeServicePort;

/// Employee service over a tenant-filtered repository.
pub struct EmployeeService<R>
where
    R: EmployeeRepository,
{
    repository: Arc<R>,
}

impl<R> EmployeeService<R>
where
    R: EmployeeRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    async fn ensure_email_free(
        &self,
        employee: &Employee,
        message: &'static str,
    ) -> Result<(), EmployeeError> {
        let existing = self
            .repository
            .find_by_email(&employee.tenant_id, &employee.email)
            .await
            .map_err(|e| EmployeeError::internal(message, e))?;

        match existing {
            Some(other) if other.id != employee.id => Err(EmployeeError::AlreadyExists),
            _ => Ok(()),
        }
    }
}

fn write_error(err: StoreError, message: &'static str) -> EmployeeError {
    match err {
        StoreError::DuplicateEmail(_) => EmployeeError::AlreadyExists,
        e => EmployeeError::internal(message, e),
    }
}

#[async_trait]
impl<R> EmployeeServicePort for EmployeeService<R>
where
    R: EmployeeRepository,
{
    async fn create(
        &self,
        tenant_id: TenantId,
        command: CreateEmployeeCommand,
    ) -> Result<Employee, EmployeeError> {
        let employee = Employee::create(tenant_id, command);

        self.ensure_email_free(&employee, "Internal error during employee creation check.")
            .await?;

        self.repository
            .save(&employee)
            .await
            .map_err(|e| write_error(e, "Internal error saving employee."))?;

        tracing::info!(
            employee_id = %employee.id,
            tenant_id = %employee.tenant_id,
            "Employee created"
        );

        Ok(employee)
    }

    async fn list(
        &self,
        tenant_id: TenantId,
        request: PageRequest,
    ) -> Result<Page<Employee>, EmployeeError> {
        let (total, employees) = self
            .repository
            .find_page(&tenant_id, &request)
            .await
            .map_err(|e| EmployeeError::internal("Internal error fetching employees.", e))?;

        Ok(Page::new(employees, total, &request))
    }

    async fn get(&self, tenant_id: TenantId, id: EmployeeId) -> Result<Employee, EmployeeError> {
        self.repository
            .find_by_id(&tenant_id, &id)
            .await
            .map_err(|e| EmployeeError::internal("Internal error fetching employee by ID.", e))?
            .ok_or(EmployeeError::NotFound)
    }

    async fn update(
        &self,
        tenant_id: TenantId,
        id: EmployeeId,
        command: UpdateEmployeeCommand,
    ) -> Result<Employee, EmployeeError> {
        let mut employee = self.get(tenant_id, id).await?;
        let email_changes = command.email.as_ref().is_some_and(|e| e != &employee.email);

        employee.apply(command);

        if email_changes {
            self.ensure_email_free(&employee, "Internal error during employee update check.")
                .await?;
        }

        let updated = self
            .repository
            .update(&employee)
            .await
            .map_err(|e| write_error(e, "Internal error updating employee."))?;

        if !updated {
            return Err(EmployeeError::NotFound);
        }

        tracing::info!(
            employee_id = %employee.id,
            tenant_id = %employee.tenant_id,
            "Employee updated"
        );

        Ok(employee)
    }

    async fn delete(&self, tenant_id: TenantId, id: EmployeeId) -> Result<(), EmployeeError> {
        let deleted = self
            .repository
            .delete(&tenant_id, &id)
            .await
            .map_err(|e| EmployeeError::internal("Internal error deleting employee.", e))?;

        if !deleted {
            return Err(EmployeeError::NotFound);
        }

        tracing::info!(employee_id = %id, tenant_id = %tenant_id, "Employee deleted");

        Ok(())
    }
}
