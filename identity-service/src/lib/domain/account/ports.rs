use async_trait::async_trait;

use crate::account::errors::AuthError;
use crate::account::errors::StoreError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AuthSession;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::models::RegisterCommand;

/// Port for the authentication flows.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated registration fields
    ///
    /// # Returns
    /// Stored account (callers expose it without the password hash)
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Internal` - Hashing or store failure
    async fn register(&self, command: RegisterCommand) -> Result<Account, AuthError>;

    /// Authenticate credentials and issue a token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Internal` - Store, hashing or signing failure
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError>;

    /// Exchange a refresh token for a new token pair.
    ///
    /// The presented refresh token is not revoked.
    ///
    /// # Errors
    /// * `InvalidToken` - Token fails validation or its account no longer exists
    /// * `RefreshTokenExpired` - Token is authentic but past its expiry
    /// * `Internal` - Store or signing failure
    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError>;
}

/// Persistence capability for account records.
///
/// Implementations must enforce email uniqueness on `save`; the service's
/// check-then-insert sequence is not atomic on its own.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Uniqueness constraint on email violated
    /// * `Database` - Storage operation failed
    async fn save(&self, account: &Account) -> Result<(), StoreError>;

    /// Retrieve account by email address.
    ///
    /// # Returns
    /// Optional account (None if not found)
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, StoreError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account (None if not found)
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, StoreError>;
}
