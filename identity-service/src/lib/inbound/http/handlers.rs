use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::SecondsFormat;
use serde::Serialize;

use crate::account::errors::AuthError;
use crate::account::errors::ErrorClass;
use crate::account::models::Account;
use crate::account::models::AuthSession;
use crate::employee::errors::EmployeeError;

pub mod employees;
pub mod health;
pub mod login;
pub mod me;
pub mod refresh;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Error response with a stable code.
///
/// `cause` is only ever logged; `details` is what the client sees and is
/// filled for server errors outside production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Option<String>,
    cause: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "BAD_REQUEST",
            message: message.into(),
            details: None,
            cause: None,
        }
    }

    pub fn internal(message: impl Into<String>, cause: impl Into<String>, expose: bool) -> Self {
        let cause = cause.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL_SERVER_ERROR",
            message: message.into(),
            details: expose.then(|| cause.clone()),
            cause: Some(cause),
        }
    }

    /// Map a domain error, exposing the wrapped cause only if `expose_details`.
    pub fn from_auth_error(err: AuthError, expose_details: bool) -> Self {
        Self::classified(
            err.class(),
            err.code(),
            err.to_string(),
            err.cause().map(str::to_string),
            expose_details,
        )
    }

    pub fn from_employee_error(err: EmployeeError, expose_details: bool) -> Self {
        Self::classified(
            err.class(),
            err.code(),
            err.to_string(),
            err.cause().map(str::to_string),
            expose_details,
        )
    }

    fn classified(
        class: ErrorClass,
        code: &'static str,
        message: String,
        cause: Option<String>,
        expose_details: bool,
    ) -> Self {
        let status = match class {
            ErrorClass::BadRequest => StatusCode::BAD_REQUEST,
            ErrorClass::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorClass::NotFound => StatusCode::NOT_FOUND,
            ErrorClass::Conflict => StatusCode::CONFLICT,
            ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self {
            status,
            code,
            message,
            details: cause.clone().filter(|_| expose_details),
            cause,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::from_auth_error(err, false)
    }
}

impl From<EmployeeError> for ApiError {
    fn from(err: EmployeeError) -> Self {
        Self::from_employee_error(err, false)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            details: Some(rejection.body_text()),
            ..Self::bad_request("Invalid request payload")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = self.status.as_u16(),
                code = self.code,
                message = %self.message,
                cause = ?self.cause,
                "Request failed"
            );
        } else {
            tracing::warn!(
                status = self.status.as_u16(),
                code = self.code,
                message = %self.message,
                "Request rejected"
            );
        }

        (
            self.status,
            Json(ApiResponseBody::new_error(
                self.status,
                ApiErrorData {
                    code: self.code.to_string(),
                    message: self.message,
                    details: self.details,
                },
            )),
        )
            .into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, data: ApiErrorData) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Public view of an account; the password hash never leaves the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: String,
    pub tenant_id: String,
    pub email: String,
    pub name: String,
    pub phone_number: String,
    pub role: String,
    pub created_at: String,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            tenant_id: account.tenant_id.to_string(),
            email: account.email.to_string(),
            name: account.name.clone(),
            phone_number: account.phone_number.clone(),
            role: account.role.to_string(),
            created_at: account.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Token pair plus account view returned by login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AccountData,
}

impl From<&AuthSession> for AuthResponseData {
    fn from(session: &AuthSession) -> Self {
        Self {
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
            user: (&session.account).into(),
        }
    }
}
