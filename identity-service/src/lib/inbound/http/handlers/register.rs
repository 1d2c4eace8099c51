use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AuthError;
use crate::account::errors::EmailError;
use crate::account::errors::FieldError;
use crate::account::errors::IdError;
use crate::account::errors::PasswordPolicyError;
use crate::account::models::EmailAddress;
use crate::account::models::Password;
use crate::account::models::RegisterCommand;
use crate::account::models::TenantId;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let Json(body) = payload?;
    let command = body.try_into_command().map_err(|e| state.reject(e))?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(|e| state.reject(e))
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    name: String,
    email: String,
    password: String,
    phone_number: String,
    tenant_id: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid tenant_id: {0}")]
    TenantId(#[from] IdError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let tenant_id = TenantId::from_string(&self.tenant_id)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(RegisterCommand::new(
            self.name,
            email,
            password,
            self.phone_number,
            tenant_id,
        )?)
    }
}

impl From<ParseRegisterRequestError> for AuthError {
    fn from(err: ParseRegisterRequestError) -> Self {
        AuthError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "password1".to_string(),
            phone_number: "+1".to_string(),
            tenant_id: "a1b2c3d4-e5f6-4a7b-8c9d-0f1e2d3c4b5a".to_string(),
        }
    }

    #[test]
    fn test_valid_request_becomes_command() {
        let command = request().try_into_command().unwrap();

        assert_eq!(command.email.as_str(), "ann@x.com");
        assert_eq!(
            command.tenant_id.to_string(),
            "a1b2c3d4-e5f6-4a7b-8c9d-0f1e2d3c4b5a"
        );
    }

    #[test]
    fn test_each_invalid_field_is_named() {
        let cases = [
            (
                RegisterRequest {
                    tenant_id: "acme".to_string(),
                    ..request()
                },
                "tenant_id",
            ),
            (
                RegisterRequest {
                    email: "not-an-email".to_string(),
                    ..request()
                },
                "email",
            ),
            (
                RegisterRequest {
                    password: "short".to_string(),
                    ..request()
                },
                "password",
            ),
            (
                RegisterRequest {
                    name: "".to_string(),
                    ..request()
                },
                "name",
            ),
        ];

        for (request, field) in cases {
            let err = AuthError::from(request.try_into_command().unwrap_err());

            assert_eq!(err.code(), "BAD_REQUEST");
            assert!(err.to_string().contains(field), "{} not in {}", field, err);
        }
    }
}
