use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::StoreError;
use crate::account::models::EmailAddress;
use crate::account::models::TenantId;
use crate::employee::models::Employee;
use crate::employee::models::EmployeeId;
use crate::employee::models::PageRequest;
use crate::employee::ports::EmployeeRepository;

const TENANT_EMAIL_UNIQUE_CONSTRAINT: &str = "employees_tenant_email_key";

/// PostgreSQL-backed employee repository.
///
/// Every statement filters on `tenant_id`.
pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: Uuid,
    tenant_id: Uuid,
    name: String,
    email: String,
    phone_number: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = StoreError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(Employee {
            id: EmployeeId(row.id),
            tenant_id: TenantId(row.tenant_id),
            name: row.name,
            email: EmailAddress::new(row.email)
                .map_err(|e| StoreError::CorruptRecord(e.to_string()))?,
            phone_number: row.phone_number,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn write_error(e: sqlx::Error, employee: &Employee) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(TENANT_EMAIL_UNIQUE_CONSTRAINT)
        {
            return StoreError::DuplicateEmail(employee.email.to_string());
        }
    }
    StoreError::Database(e.to_string())
}

/// `ILIKE` pattern matching `search` anywhere, with wildcards in it taken literally.
fn contains_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    async fn save(&self, employee: &Employee) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO employees (id, tenant_id, name, email, phone_number, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(employee.id.0)
        .bind(employee.tenant_id.0)
        .bind(&employee.name)
        .bind(employee.email.as_str())
        .bind(&employee.phone_number)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, employee))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        id: &EmployeeId,
    ) -> Result<Option<Employee>, StoreError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, tenant_id, name, email, phone_number, created_at, updated_at
            FROM employees
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id.0)
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(Employee::try_from).transpose()
    }

    async fn find_by_email(
        &self,
        tenant_id: &TenantId,
        email: &EmailAddress,
    ) -> Result<Option<Employee>, StoreError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, tenant_id, name, email, phone_number, created_at, updated_at
            FROM employees
            WHERE tenant_id = $1 AND email = $2
            "#,
        )
        .bind(tenant_id.0)
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(Employee::try_from).transpose()
    }

    async fn find_page(
        &self,
        tenant_id: &TenantId,
        request: &PageRequest,
    ) -> Result<(u64, Vec<Employee>), StoreError> {
        let pattern = request.search().map(contains_pattern);

        // NULL pattern disables the search filter.
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM employees
            WHERE tenant_id = $1
              AND ($2::TEXT IS NULL OR name ILIKE $2 OR email ILIKE $2 OR phone_number ILIKE $2)
            "#,
        )
        .bind(tenant_id.0)
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, tenant_id, name, email, phone_number, created_at, updated_at
            FROM employees
            WHERE tenant_id = $1
              AND ($2::TEXT IS NULL OR name ILIKE $2 OR email ILIKE $2 OR phone_number ILIKE $2)
            ORDER BY name ASC, id ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(tenant_id.0)
        .bind(pattern.as_deref())
        .bind(i64::from(request.limit()))
        .bind(request.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let employees = rows
            .into_iter()
            .map(Employee::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total.max(0) as u64, employees))
    }

    async fn update(&self, employee: &Employee) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET name = $3, email = $4, phone_number = $5, updated_at = $6
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(employee.tenant_id.0)
        .bind(employee.id.0)
        .bind(&employee.name)
        .bind(employee.email.as_str())
        .bind(&employee.phone_number)
        .bind(employee.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, employee))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, tenant_id: &TenantId, id: &EmployeeId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM employees WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id.0)
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_wildcards_are_literal() {
        assert_eq!(contains_pattern("ann"), "%ann%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}
