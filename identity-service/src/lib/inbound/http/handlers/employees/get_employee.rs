use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::EmployeeData;
use crate::employee::models::EmployeeId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::IdentityContext;
use crate::inbound::http::router::AppState;

pub async fn get_employee(
    State(state): State<AppState>,
    identity: IdentityContext,
    Path(id): Path<String>,
) -> Result<ApiSuccess<EmployeeData>, ApiError> {
    let employee_id = EmployeeId::from_string(&id).map_err(|e| state.reject_employee(e))?;

    state
        .employee_service
        .get(identity.tenant_id, employee_id)
        .await
        .map_err(|e| state.reject_employee(e))
        .map(|ref employee| ApiSuccess::new(StatusCode::OK, employee.into()))
}
