use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::account::errors::AuthError;
use crate::account::errors::FieldError;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::models::Password;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = payload?;
    let command = body.try_into_command().map_err(|e| state.reject(e))?;

    state
        .auth_service
        .login(command)
        .await
        .map_err(|e| state.reject(e))
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, AuthError> {
        let email = EmailAddress::new(self.email)?;
        if self.password.is_empty() {
            return Err(FieldError::Required("password").into());
        }

        Ok(LoginCommand {
            email,
            password: Password::unchecked(self.password),
        })
    }
}
