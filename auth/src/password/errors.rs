use thiserror::Error;

/// Error type for password operations.
///
/// A wrong password is never an error: `verify` reports it as `Ok(false)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}
