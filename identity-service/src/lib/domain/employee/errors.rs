use std::fmt;

use thiserror::Error;

use crate::account::errors::EmailError;
use crate::account::errors::ErrorClass;
use crate::account::errors::FieldError;
use crate::account::errors::IdError;

/// Error for out-of-range pagination parameters
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("page must be at least 1, got {0}")]
    PageTooLow(u32),

    #[error("limit must be between 1 and {max}, got {actual}")]
    LimitOutOfRange { max: u32, actual: u32 },
}

/// Top-level error for the employee operations.
///
/// Every operation is scoped to the caller's tenant, so a record owned by
/// another tenant is reported as `NotFound`, never as forbidden.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmployeeError {
    #[error("Employee with given ID not found")]
    NotFound,

    #[error("Employee with the given email already exists")]
    AlreadyExists,

    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    Internal { message: String, cause: String },
}

impl EmployeeError {
    /// Wrap an unexpected failure with a client-safe message.
    pub fn internal(message: impl Into<String>, cause: impl fmt::Display) -> Self {
        EmployeeError::Internal {
            message: message.into(),
            cause: cause.to_string(),
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            EmployeeError::NotFound => "EMPLOYEE_NOT_FOUND",
            EmployeeError::AlreadyExists => "EMPLOYEE_ALREADY_EXISTS",
            EmployeeError::BadRequest(_) => "BAD_REQUEST",
            EmployeeError::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            EmployeeError::NotFound => ErrorClass::NotFound,
            EmployeeError::AlreadyExists => ErrorClass::Conflict,
            EmployeeError::BadRequest(_) => ErrorClass::BadRequest,
            EmployeeError::Internal { .. } => ErrorClass::Internal,
        }
    }

    pub fn cause(&self) -> Option<&str> {
        match self {
            EmployeeError::Internal { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

impl From<IdError> for EmployeeError {
    fn from(err: IdError) -> Self {
        EmployeeError::BadRequest(format!("Invalid employee ID: {}", err))
    }
}

impl From<EmailError> for EmployeeError {
    fn from(err: EmailError) -> Self {
        EmployeeError::BadRequest(err.to_string())
    }
}

impl From<FieldError> for EmployeeError {
    fn from(err: FieldError) -> Self {
        EmployeeError::BadRequest(err.to_string())
    }
}

impl From<PageError> for EmployeeError {
    fn from(err: PageError) -> Self {
        EmployeeError::BadRequest(err.to_string())
    }
}
