//! Uniform response wrapper returned by every JSON route.
//!
//! ```json
//! { "success": true, "message": "Event created", "insertedId": "65f0c0ffee..." }
//! { "success": true, "data": [ ... ] }
//! { "success": false, "message": "Resource not found", "error": "Event 65f0... not found" }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Response envelope `{success, message?, data?, error?, insertedId?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Whether the request succeeded
    pub success: bool,
    /// Human-readable summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload of a successful request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
    /// Failure detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Identifier generated by an insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<String>,
}

impl Envelope {
    /// Successful response carrying `data`.
    pub fn data(data: impl Into<Value>) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data.into()),
            error: None,
            inserted_id: None,
        }
    }

    /// Successful insert reporting the generated identifier.
    pub fn inserted(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
            inserted_id: Some(id.into()),
        }
    }

    /// Failed request.
    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error: Some(error.into()),
            inserted_id: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
