use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::TokenError;

/// Token payload shared by access and refresh tokens.
///
/// Registered claims follow RFC 7519. Refresh tokens carry only the user
/// identity: `tenant_id`, `role`, `aud` and `nbf` are left out so that tenant
/// and role are re-read from the credential store on every refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Subject (same value as `user_id`)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Unique token identifier, reserved for a future revocation list
    pub jti: String,
}

impl Claims {
    /// Claims for a short-lived access token.
    ///
    /// # Arguments
    /// * `user_id` - Account identifier (also used as subject)
    /// * `tenant_id` - Tenant the account belongs to
    /// * `role` - Authorization tier
    /// * `issued_at` - Minting instant
    /// * `ttl` - Lifetime added to `issued_at` to obtain `exp`
    ///
    /// # Errors
    /// * `SigningFailed` - `issued_at + ttl` is not a representable instant
    pub fn access(
        user_id: impl ToString,
        tenant_id: impl ToString,
        role: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let user_id = user_id.to_string();
        let expires_at = expiry(issued_at, ttl)?;

        Ok(Self {
            sub: user_id.clone(),
            user_id,
            tenant_id: Some(tenant_id.to_string()),
            role: Some(role.to_string()),
            iss: String::new(),
            aud: None,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            nbf: Some(issued_at.timestamp()),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Claims for a long-lived refresh token carrying only the user identity.
    pub fn refresh(
        user_id: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let user_id = user_id.to_string();
        let expires_at = expiry(issued_at, ttl)?;

        Ok(Self {
            sub: user_id.clone(),
            user_id,
            tenant_id: None,
            role: None,
            iss: String::new(),
            aud: None,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            nbf: None,
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl ToString) -> Self {
        self.iss = iss.to_string();
        self
    }

    /// Set audience.
    pub fn with_audience(mut self, aud: impl ToString) -> Self {
        self.aud = Some(aud.to_string());
        self
    }

    /// Check if token is expired.
    ///
    /// A token is still valid during the second named by `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    /// Expiration instant, if `exp` is representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

fn expiry(issued_at: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, TokenError> {
    issued_at.checked_add_signed(ttl).ok_or_else(|| {
        TokenError::SigningFailed(format!(
            "expiry out of range: {} plus {} seconds",
            issued_at.to_rfc3339(),
            ttl.num_seconds()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims() {
        let now = Utc::now();
        let claims =
            Claims::access("user123", "tenant456", "admin", now, Duration::minutes(15)).unwrap();

        assert_eq!(claims.user_id, "user123");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.tenant_id.as_deref(), Some("tenant456"));
        assert_eq!(claims.role.as_deref(), Some("admin"));
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert_eq!(claims.nbf, Some(claims.iat));
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_refresh_claims_omit_tenant_and_role() {
        let claims = Claims::refresh("user123", Utc::now(), Duration::hours(72))
            .unwrap()
            .with_issuer("identity-service");

        assert!(claims.tenant_id.is_none());
        assert!(claims.role.is_none());
        assert_eq!(claims.exp - claims.iat, 72 * 60 * 60);

        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("tenant_id").is_none());
        assert!(json.get("role").is_none());
        assert!(json.get("aud").is_none());
        assert!(json.get("nbf").is_none());
        assert_eq!(json["iss"], "identity-service");
    }

    #[test]
    fn test_each_token_gets_a_unique_id() {
        let now = Utc::now();
        let first = Claims::refresh("user123", now, Duration::hours(1)).unwrap();
        let second = Claims::refresh("user123", now, Duration::hours(1)).unwrap();

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_is_expired() {
        let issued_at = Utc.timestamp_opt(0, 0).unwrap();
        let claims =
            Claims::refresh("user123", issued_at, Duration::seconds(1000)).unwrap();

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_expires_at_round_trips_timestamp() {
        let issued_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let claims =
            Claims::access("u", "t", "user", issued_at, Duration::minutes(5)).unwrap();

        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(
            claims.expires_at(),
            Some(issued_at + Duration::minutes(5))
        );
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let near_end_of_time = DateTime::<Utc>::MAX_UTC - Duration::hours(1);

        let access = Claims::access("u", "t", "user", near_end_of_time, Duration::hours(2));
        let refresh = Claims::refresh("u", near_end_of_time, Duration::days(1));

        assert!(matches!(access, Err(TokenError::SigningFailed(_))));
        assert!(matches!(refresh, Err(TokenError::SigningFailed(_))));
    }
}
