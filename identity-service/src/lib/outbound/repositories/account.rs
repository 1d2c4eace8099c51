use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::StoreError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::PasswordHash;
use crate::account::models::Role;
use crate::account::models::TenantId;
use crate::account::ports::CredentialStore;

const EMAIL_UNIQUE_CONSTRAINT: &str = "accounts_email_key";

/// PostgreSQL-backed credential store.
///
/// Email uniqueness is enforced by the `accounts_email_key` constraint.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    tenant_id: Uuid,
    email: String,
    password_hash: String,
    name: String,
    phone_number: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            tenant_id: TenantId(row.tenant_id),
            email: EmailAddress::new(row.email)
                .map_err(|e| StoreError::CorruptRecord(e.to_string()))?,
            password_hash: PasswordHash::new(row.password_hash),
            name: row.name,
            phone_number: row.phone_number,
            role: row
                .role
                .parse::<Role>()
                .map_err(|e| StoreError::CorruptRecord(e.to_string()))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, tenant_id, email, password_hash, name, phone_number, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(account.id.0)
        .bind(account.tenant_id.0)
        .bind(account.email.as_str())
        .bind(account.password_hash.as_str())
        .bind(&account.name)
        .bind(&account.phone_number)
        .bind(account.role.as_str())
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return StoreError::DuplicateEmail(account.email.to_string());
                }
            }
            StoreError::Database(e.to_string())
        })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, tenant_id, email, password_hash, name, phone_number, role, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, tenant_id, email, password_hash, name, phone_number, role, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }
}
