//! Readiness endpoint

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{AppError, Envelope};
use database::mongodb::{HealthStatus, check_health_detailed};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    status: &'static str,
    mongodb: &'static str,
    response_time_ms: u64,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - pings MongoDB
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses(
        (status = 200, description = "MongoDB reachable", body = ReadinessResponse),
        (status = 503, description = "MongoDB unreachable", body = Envelope)
    )
)]
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, AppError> {
    readiness(check_health_detailed(&state.mongo_client).await).map(Json)
}

fn readiness(health: HealthStatus) -> Result<ReadinessResponse, AppError> {
    if !health.healthy {
        let reason = health
            .message
            .unwrap_or_else(|| "MongoDB ping failed".to_string());
        tracing::warn!(error = %reason, "Readiness check failed");
        return Err(AppError::ServiceUnavailable(reason));
    }

    Ok(ReadinessResponse {
        status: "ready",
        mongodb: "connected",
        response_time_ms: health.response_time_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};

    #[test]
    fn test_healthy_store_is_ready() {
        let response = readiness(HealthStatus {
            healthy: true,
            message: None,
            response_time_ms: 3,
        })
        .unwrap();

        assert_eq!(response.status, "ready");
        assert_eq!(response.mongodb, "connected");
    }

    #[test]
    fn test_unreachable_store_is_503() {
        let err = readiness(HealthStatus {
            healthy: false,
            message: Some("Server selection timeout".to_string()),
            response_time_ms: 30_000,
        })
        .unwrap_err();

        assert!(matches!(err, AppError::ServiceUnavailable(ref m) if m == "Server selection timeout"));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
