use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::employee::models::EmployeeId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::IdentityContext;
use crate::inbound::http::router::AppState;

pub async fn delete_employee(
    State(state): State<AppState>,
    identity: IdentityContext,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let employee_id = EmployeeId::from_string(&id).map_err(|e| state.reject_employee(e))?;

    state
        .employee_service
        .delete(identity.tenant_id, employee_id)
        .await
        .map_err(|e| state.reject_employee(e))
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
