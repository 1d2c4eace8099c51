use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::employees::create_employee;
use super::handlers::employees::delete_employee;
use super::handlers::employees::get_employee;
use super::handlers::employees::list_employees;
use super::handlers::employees::update_employee;
use super::handlers::health::health;
use super::handlers::health::info;
use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::handlers::ApiError;
use super::middleware::authorize;
use super::recovery::panic_handler;
use crate::account::errors::AuthError;
use crate::account::ports::AuthServicePort;
use crate::config::AppConfig;
use crate::employee::errors::EmployeeError;
use crate::employee::ports::EmployeeServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub employee_service: Arc<dyn EmployeeServicePort>,
    pub tokens: Arc<TokenService>,
    pub app: AppConfig,
    pub expose_error_details: bool,
}

impl AppState {
    /// Turn a domain error into a response, honouring the detail policy.
    pub fn reject(&self, err: impl Into<AuthError>) -> ApiError {
        ApiError::from_auth_error(err.into(), self.expose_error_details)
    }

    pub fn reject_employee(&self, err: impl Into<EmployeeError>) -> ApiError {
        ApiError::from_employee_error(err.into(), self.expose_error_details)
    }
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    employee_service: Arc<dyn EmployeeServicePort>,
    tokens: Arc<TokenService>,
    app: AppConfig,
) -> Router {
    let expose_error_details = !app.is_production();
    let state = AppState {
        auth_service,
        employee_service,
        tokens,
        app,
        expose_error_details,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/employees", get(list_employees).post(create_employee))
        .route(
            "/api/employees/:id",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

    // Headers stay out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CatchPanicLayer::custom(panic_handler(expose_error_details)))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
