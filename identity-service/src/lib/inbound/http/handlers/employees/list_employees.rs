use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::EmployeePageData;
use crate::employee::models::PageRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::IdentityContext;
use crate::inbound::http::router::AppState;

/// `GET /api/employees?page=&limit=&query=`
pub async fn list_employees(
    State(state): State<AppState>,
    identity: IdentityContext,
    params: Result<Query<ListEmployeesParams>, QueryRejection>,
) -> Result<ApiSuccess<EmployeePageData>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let request = PageRequest::new(params.page, params.limit, params.query)
        .map_err(|e| state.reject_employee(e))?;

    state
        .employee_service
        .list(identity.tenant_id, request)
        .await
        .map_err(|e| state.reject_employee(e))
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListEmployeesParams {
    page: Option<u32>,
    limit: Option<u32>,
    query: Option<String>,
}
