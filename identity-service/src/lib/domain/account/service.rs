use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenService;
use chrono::Utc;

use crate::account::errors::AuthError;
use crate::account::errors::StoreError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AuthSession;
use crate::account::models::LoginCommand;
use crate::account::models::PasswordHash;
use crate::account::models::RegisterCommand;
use crate::account::ports::AuthServicePort;
use crate::account::ports::CredentialStore;

/// Authentication service orchestrating the credential store, password
/// hasher and token service.
///
/// Holds no per-request state; one instance is shared by every request.
pub struct AuthService<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    tokens: Arc<TokenService>,
    password_hasher: PasswordHasher,
    // Verified against when the email is unknown so both login failures cost the same.
    dummy_hash: String,
}

impl<S> AuthService<S>
where
    S: CredentialStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential store implementation
    /// * `tokens` - Token service shared with the authorization middleware
    ///
    /// # Errors
    /// * `Internal` - The password hasher cannot run on this host
    pub fn new(store: Arc<S>, tokens: Arc<TokenService>) -> Result<Self, AuthError> {
        let password_hasher = PasswordHasher::new();
        let dummy_hash = password_hasher
            .hash("dummy-password-for-unknown-accounts")
            .map_err(|e| AuthError::internal("Password hasher unavailable.", e))?;

        Ok(Self {
            store,
            tokens,
            password_hasher,
            dummy_hash,
        })
    }

    fn open_session(&self, account: Account) -> Result<AuthSession, AuthError> {
        let pair = self
            .tokens
            .issue_pair(
                &account.id.to_string(),
                &account.tenant_id.to_string(),
                account.role.as_str(),
            )
            .map_err(|e| AuthError::internal("Internal error generating token.", e))?;

        Ok(AuthSession {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            account,
        })
    }
}

#[async_trait]
impl<S> AuthServicePort for AuthService<S>
where
    S: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AuthError> {
        let existing = self
            .store
            .find_by_email(&command.email)
            .await
            .map_err(|e| AuthError::internal("Internal error during user registration check.", e))?;

        if existing.is_some() {
            tracing::warn!(
                tenant_id = %command.tenant_id,
                "Registration rejected: email already registered"
            );
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = self
            .password_hasher
            .hash(command.password.expose())
            .map(PasswordHash::new)
            .map_err(|e| AuthError::internal("Internal error during password hashing.", e))?;

        let account = Account::register(
            command.tenant_id,
            command.email,
            password_hash,
            command.name,
            command.phone_number,
        );

        match self.store.save(&account).await {
            Ok(()) => {}
            Err(StoreError::DuplicateEmail(_)) => {
                tracing::warn!(
                    tenant_id = %account.tenant_id,
                    "Registration lost a race on email uniqueness"
                );
                return Err(AuthError::UserAlreadyExists);
            }
            Err(e) => return Err(AuthError::internal("Internal error saving user.", e)),
        }

        tracing::info!(
            account_id = %account.id,
            tenant_id = %account.tenant_id,
            "Account registered"
        );

        Ok(account)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError> {
        let account = self
            .store
            .find_by_email(&command.email)
            .await
            .map_err(|e| AuthError::internal("Internal error during login.", e))?;

        let Some(account) = account else {
            let _ = self
                .password_hasher
                .verify(command.password.expose(), &self.dummy_hash);
            return Err(AuthError::InvalidCredentials);
        };

        let password_matches = self
            .password_hasher
            .verify(command.password.expose(), account.password_hash.as_str())
            .map_err(|e| AuthError::internal("Internal error during login.", e))?;

        if !password_matches {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(
            account_id = %account.id,
            tenant_id = %account.tenant_id,
            "Account logged in"
        );

        self.open_session(account)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        let claims = self.tokens.validate(refresh_token).map_err(|e| {
            tracing::debug!(error = %e, "Refresh token failed validation");
            AuthError::InvalidToken
        })?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(AuthError::RefreshTokenExpired);
        }

        let account_id = AccountId::from_string(&claims.user_id).map_err(|_| {
            AuthError::BadRequest("Invalid user ID in refresh token claims".to_string())
        })?;

        let account = self
            .store
            .find_by_id(&account_id)
            .await
            .map_err(|e| AuthError::internal("Internal error during token refresh.", e))?
            .ok_or(AuthError::InvalidToken)?;

        tracing::info!(
            account_id = %account.id,
            tenant_id = %account.tenant_id,
            "Tokens refreshed"
        );

        self.open_session(account)
    }
}
