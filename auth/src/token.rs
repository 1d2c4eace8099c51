use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtHandler;
use crate::jwt::TokenError;

/// Issuer stamped into every token unless overridden.
pub const DEFAULT_ISSUER: &str = "identity-service";

/// Audience stamped into access tokens unless overridden.
pub const DEFAULT_AUDIENCE: &str = "identity-users";

/// Longest accepted access token lifetime, in minutes (one day).
pub const MAX_ACCESS_EXPIRY_MINUTES: i64 = 24 * 60;

/// Longest accepted refresh token lifetime, in hours (one year).
pub const MAX_REFRESH_EXPIRY_HOURS: i64 = 365 * 24;

/// Settings the token service is built from.
///
/// Expiries are kept in their configured units and only turned into
/// durations by [`TokenService::new`], which rejects out-of-range values.
#[derive(Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub access_expiry_minutes: i64,
    pub refresh_expiry_hours: i64,
    pub issuer: String,
    pub audience: String,
}

impl TokenSettings {
    /// Settings from the usual configuration units.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret
    /// * `access_expiry_minutes` - Access token lifetime in minutes
    /// * `refresh_expiry_hours` - Refresh token lifetime in hours
    pub fn new(secret: impl Into<String>, access_expiry_minutes: i64, refresh_expiry_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            access_expiry_minutes,
            refresh_expiry_hours,
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Check the settings and return the access and refresh lifetimes.
    fn validate(&self) -> Result<(Duration, Duration), TokenError> {
        if self.secret.trim().is_empty() {
            return Err(TokenError::Configuration(
                "signing secret is not set".to_string(),
            ));
        }
        if !(1..=MAX_ACCESS_EXPIRY_MINUTES).contains(&self.access_expiry_minutes) {
            return Err(TokenError::Configuration(format!(
                "access token expiry must be between 1 and {} minutes, got {}",
                MAX_ACCESS_EXPIRY_MINUTES, self.access_expiry_minutes
            )));
        }
        if !(1..=MAX_REFRESH_EXPIRY_HOURS).contains(&self.refresh_expiry_hours) {
            return Err(TokenError::Configuration(format!(
                "refresh token expiry must be between 1 and {} hours, got {}",
                MAX_REFRESH_EXPIRY_HOURS, self.refresh_expiry_hours
            )));
        }
        if self.issuer.is_empty() || self.audience.is_empty() {
            return Err(TokenError::Configuration(
                "issuer and audience must not be empty".to_string(),
            ));
        }

        let access_token_ttl = Duration::try_minutes(self.access_expiry_minutes)
            .ok_or_else(|| TokenError::Configuration("access token expiry overflows".to_string()))?;
        let refresh_token_ttl = Duration::try_hours(self.refresh_expiry_hours)
            .ok_or_else(|| TokenError::Configuration("refresh token expiry overflows".to_string()))?;

        Ok((access_token_ttl, refresh_token_ttl))
    }
}

/// Freshly minted access/refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Mints and validates signed access and refresh tokens.
///
/// Both token kinds share the [`Claims`] schema and carry no marker telling
/// them apart; callers must only present each kind to its own flow.
/// Validity is a function of signature and expiry alone; there is no
/// server-side revocation state.
pub struct TokenService {
    jwt_handler: JwtHandler,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
    issuer: String,
    audience: String,
}

impl TokenService {
    /// Build a token service from validated settings.
    ///
    /// # Errors
    /// * `Configuration` - Secret empty, expiry outside its accepted range, or empty issuer/audience
    pub fn new(settings: TokenSettings) -> Result<Self, TokenError> {
        let (access_token_ttl, refresh_token_ttl) = settings.validate()?;

        Ok(Self {
            jwt_handler: JwtHandler::new(
                settings.secret.as_bytes(),
                &settings.issuer,
                &settings.audience,
            ),
            access_token_ttl,
            refresh_token_ttl,
            issuer: settings.issuer,
            audience: settings.audience,
        })
    }

    /// Mint an access token valid from now.
    pub fn issue_access(
        &self,
        user_id: &str,
        tenant_id: &str,
        role: &str,
    ) -> Result<String, TokenError> {
        self.issue_access_at(user_id, tenant_id, role, Utc::now())
    }

    /// Mint an access token as if issued at `issued_at`.
    ///
    /// # Errors
    /// * `SigningFailed` - Expiry not representable or token signing failed
    pub fn issue_access_at(
        &self,
        user_id: &str,
        tenant_id: &str,
        role: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::access(user_id, tenant_id, role, issued_at, self.access_token_ttl)?
            .with_issuer(&self.issuer)
            .with_audience(&self.audience);

        self.jwt_handler.encode(&claims)
    }

    /// Mint a refresh token valid from now.
    pub fn issue_refresh(&self, user_id: &str) -> Result<String, TokenError> {
        self.issue_refresh_at(user_id, Utc::now())
    }

    /// Mint a refresh token as if issued at `issued_at`.
    ///
    /// Tenant and role are deliberately absent.
    pub fn issue_refresh_at(
        &self,
        user_id: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims =
            Claims::refresh(user_id, issued_at, self.refresh_token_ttl)?.with_issuer(&self.issuer);

        self.jwt_handler.encode(&claims)
    }

    /// Mint an access token and a refresh token for the same identity.
    pub fn issue_pair(
        &self,
        user_id: &str,
        tenant_id: &str,
        role: &str,
    ) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access(user_id, tenant_id, role)?,
            refresh_token: self.issue_refresh(user_id)?,
        })
    }

    /// Verify a token and return its claims.
    ///
    /// Expired tokens are returned as valid claims so callers can tell
    /// "tampered" apart from "merely expired"; check
    /// [`Claims::is_expired`] where expiry matters.
    ///
    /// # Errors
    /// * `Invalid` - Bad signature, malformed structure or algorithm mismatch
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.jwt_handler.decode(token)
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        self.refresh_token_ttl
    }
}
