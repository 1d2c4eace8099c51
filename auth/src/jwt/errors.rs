use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Signing secret or expiry settings are unset or malformed.
    #[error("Token configuration error: {0}")]
    Configuration(String),

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    /// Bad signature, malformed structure, wrong algorithm or wrong issuer/audience.
    #[error("Token is invalid: {0}")]
    Invalid(String),
}
