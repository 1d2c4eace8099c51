use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::EmployeeData;
use crate::account::models::EmailAddress;
use crate::employee::errors::EmployeeError;
use crate::employee::models::CreateEmployeeCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::IdentityContext;
use crate::inbound::http::router::AppState;

pub async fn create_employee(
    State(state): State<AppState>,
    identity: IdentityContext,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Result<ApiSuccess<EmployeeData>, ApiError> {
    let Json(body) = payload?;
    let command = body
        .try_into_command()
        .map_err(|e| state.reject_employee(e))?;

    state
        .employee_service
        .create(identity.tenant_id, command)
        .await
        .map_err(|e| state.reject_employee(e))
        .map(|ref employee| ApiSuccess::new(StatusCode::CREATED, employee.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateEmployeeRequest {
    name: String,
    email: String,
    phone_number: String,
}

impl CreateEmployeeRequest {
    fn try_into_command(self) -> Result<CreateEmployeeCommand, EmployeeError> {
        let email = EmailAddress::new(self.email)?;
        Ok(CreateEmployeeCommand::new(
            self.name,
            email,
            self.phone_number,
        )?)
    }
}
