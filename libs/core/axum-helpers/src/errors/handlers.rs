use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::ErrorCode;
use crate::envelope::Envelope;

/// Fallback handler for unmatched routes.
pub async fn not_found() -> Response {
    let body = Json(Envelope::failure(
        ErrorCode::NotFound.default_message(),
        "The requested route was not found",
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}
