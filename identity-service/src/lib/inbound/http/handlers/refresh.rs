use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::account::errors::FieldError;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = payload?;
    if body.refresh_token.trim().is_empty() {
        return Err(state.reject(FieldError::Required("refresh_token")));
    }

    state
        .auth_service
        .refresh(&body.refresh_token)
        .await
        .map_err(|e| state.reject(e))
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequest {
    refresh_token: String,
}
