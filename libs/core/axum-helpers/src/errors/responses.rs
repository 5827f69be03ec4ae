//! Reusable OpenAPI response types for consistent API documentation.

use crate::envelope::Envelope;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error - store failure",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Database operation failed",
        "error": "Kind: Server selection timeout: No available servers"
    })
)]
pub struct InternalServerErrorResponse(pub Envelope);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - missing identifier or malformed body",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Request validation failed",
        "error": "userId is required"
    })
)]
pub struct BadRequestResponse(pub Envelope);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Resource not found",
        "error": "Event 65f0c0ffee0000000000abcd not found"
    })
)]
pub struct NotFoundResponse(pub Envelope);
