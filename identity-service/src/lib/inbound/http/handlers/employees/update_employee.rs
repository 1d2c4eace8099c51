use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::EmployeeData;
use crate::account::models::EmailAddress;
use crate::employee::errors::EmployeeError;
use crate::employee::models::EmployeeId;
use crate::employee::models::UpdateEmployeeCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::IdentityContext;
use crate::inbound::http::router::AppState;

pub async fn update_employee(
    State(state): State<AppState>,
    identity: IdentityContext,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> Result<ApiSuccess<EmployeeData>, ApiError> {
    let employee_id = EmployeeId::from_string(&id).map_err(|e| state.reject_employee(e))?;
    let Json(body) = payload?;
    let command = body
        .try_into_command()
        .map_err(|e| state.reject_employee(e))?;

    state
        .employee_service
        .update(identity.tenant_id, employee_id, command)
        .await
        .map_err(|e| state.reject_employee(e))
        .map(|ref employee| ApiSuccess::new(StatusCode::OK, employee.into()))
}

/// Fields left out of the body keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateEmployeeRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
}

impl UpdateEmployeeRequest {
    fn try_into_command(self) -> Result<UpdateEmployeeCommand, EmployeeError> {
        let email = self.email.map(EmailAddress::new).transpose()?;
        Ok(UpdateEmployeeCommand::new(
            self.name,
            email,
            self.phone_number,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_stay_unset() {
        let request: UpdateEmployeeRequest =
            serde_json::from_str(r#"{"phone_number": "+2"}"#).unwrap();

        let command = request.try_into_command().unwrap();

        assert_eq!(command.name, None);
        assert_eq!(command.email, None);
        assert_eq!(command.phone_number.as_deref(), Some("+2"));
    }

    #[test]
    fn test_invalid_email_is_bad_request() {
        let request = UpdateEmployeeRequest {
            email: Some("nope".to_string()),
            ..Default::default()
        };

        let err = request.try_into_command().unwrap_err();

        assert_eq!(err.code(), "BAD_REQUEST");
    }
}
