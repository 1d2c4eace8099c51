use axum::extract::State;
use axum::http::StatusCode;
use chrono::SecondsFormat;
use chrono::Utc;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Liveness probe.
pub async fn health() -> ApiSuccess<HealthData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthData {
            status: "ok".to_string(),
        },
    )
}

pub async fn info(State(state): State<AppState>) -> ApiSuccess<InfoData> {
    ApiSuccess::new(
        StatusCode::OK,
        InfoData {
            name: state.app.name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: state.app.environment.clone(),
            time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoData {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub time: String,
}
