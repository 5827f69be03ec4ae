pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::envelope::Envelope;

/// Application error type that can be converted to HTTP responses.
///
/// Every variant renders the failure envelope
/// `{ "success": false, "message": <default message>, "error": <detail> }`.
/// Store failures pass the driver message through as `error`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// HTTP status and error code for this error.
    pub fn classify(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::JsonExtractorRejection(_) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidJson),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationError),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseError),
            AppError::Serialization(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::SerializationError,
            ),
            AppError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::ServiceUnavailable)
            }
        }
    }

    fn detail(self) -> String {
        match self {
            AppError::JsonExtractorRejection(e) => e.body_text(),
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Database(msg)
            | AppError::Serialization(msg)
            | AppError::ServiceUnavailable(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();
        let detail = self.detail();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), "{}: {}", code, detail);
        } else {
            tracing::info!(error_code = code.code(), "{}: {}", code, detail);
        }

        (
            status,
            Json(Envelope::failure(code.default_message(), detail)),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn envelope_of(error: AppError) -> (StatusCode, Envelope) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_bad_request_maps_to_400_envelope() {
        let (status, body) = envelope_of(AppError::BadRequest("eventId is required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("eventId is required"));
        assert_eq!(
            body.message.as_deref(),
            Some(ErrorCode::ValidationError.default_message())
        );
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let (status, body) = envelope_of(AppError::NotFound("Event x not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.as_deref(), Some("Event x not found"));
    }

    #[tokio::test]
    async fn test_database_error_passes_message_through() {
        let (status, body) =
            envelope_of(AppError::Database("connection reset by peer".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("connection reset by peer"));
    }

    #[test]
    fn test_classify_service_unavailable() {
        let (status, code) = AppError::ServiceUnavailable("down".into()).classify();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(code, ErrorCode::ServiceUnavailable);
    }
}
