use std::fmt;

use thiserror::Error;

/// Error for AccountId / TenantId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for plaintext password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Error for required profile fields left blank
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),
}

/// Failures reported by a credential store or employee repository.
///
/// A lookup miss is not a failure; stores return `Ok(None)` for it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store's uniqueness constraint on email rejected an insert.
    #[error("Email already stored: {0}")]
    DuplicateEmail(String),

    #[error("Database error: {0}")]
    Database(String),

    /// A stored record could not be turned back into a domain entity.
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}

/// Client-visible status class of a domain error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    BadRequest,
    Unauthorized,
    NotFound,
    Conflict,
    Internal,
}

/// Top-level error for registration, login, refresh and authorization.
///
/// Domain variants are sentinels with a stable code and message. Unexpected
/// store, hashing or signing failures are folded into `Internal`, keeping
/// the cause for logs while exposing only `message` to clients.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("User with this email already exists")]
    UserAlreadyExists,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Refresh token has expired, please login again")]
    RefreshTokenExpired,

    #[error("{0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("{message}")]
    Internal { message: String, cause: String },
}

impl AuthError {
    /// Wrap an unexpected failure with a client-safe message.
    pub fn internal(message: impl Into<String>, cause: impl fmt::Display) -> Self {
        AuthError::Internal {
            message: message.into(),
            cause: cause.to_string(),
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::UserAlreadyExists => "USER_ALREADY_EXISTS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::RefreshTokenExpired => "REFRESH_TOKEN_EXPIRED",
            AuthError::BadRequest(_) => "BAD_REQUEST",
            AuthError::Unauthorized => "UNAUTHORIZED",
            AuthError::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            AuthError::UserAlreadyExists => ErrorClass::Conflict,
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::RefreshTokenExpired
            | AuthError::Unauthorized => ErrorClass::Unauthorized,
            AuthError::BadRequest(_) => ErrorClass::BadRequest,
            AuthError::Internal { .. } => ErrorClass::Internal,
        }
    }

    /// Underlying cause of an `Internal` error.
    pub fn cause(&self) -> Option<&str> {
        match self {
            AuthError::Internal { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

impl From<IdError> for AuthError {
    fn from(err: IdError) -> Self {
        AuthError::BadRequest(err.to_string())
    }
}

impl From<EmailError> for AuthError {
    fn from(err: EmailError) -> Self {
        AuthError::BadRequest(err.to_string())
    }
}

impl From<PasswordPolicyError> for AuthError {
    fn from(err: PasswordPolicyError) -> Self {
        AuthError::BadRequest(err.to_string())
    }
}

impl From<FieldError> for AuthError {
    fn from(err: FieldError) -> Self {
        AuthError::BadRequest(err.to_string())
    }
}
