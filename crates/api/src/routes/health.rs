use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` or `error`.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// `postgres` or `not_configured`.
    pub database: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /health -- returns service and storage health.
///
/// Without configured storage the service is still healthy. A configured
/// but unreachable database yields 503.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database: "not_configured",
        timestamp: chrono::Utc::now(),
        message: None,
    };

    let Some(pool) = &state.pool else {
        return (StatusCode::OK, Json(response));
    };

    response.database = "postgres";
    match putting_db::health_check(pool).await {
        Ok(()) => (StatusCode::OK, Json(response)),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            response.status = "error";
            response.message = Some(e.to_string());
            (StatusCode::SERVICE_UNAVAILABLE, Json(response))
        }
    }
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
