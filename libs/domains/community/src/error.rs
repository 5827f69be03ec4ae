use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommunityError {
    /// Missing or malformed input, rejected before the store is touched
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Driver failure; the message is passed to the client as-is
    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    Serialization(String),
}

pub type CommunityResult<T> = Result<T, CommunityError>;

impl CommunityError {
    pub fn event_not_found(id: &str) -> Self {
        CommunityError::NotFound(format!("Event {} not found", id))
    }

    pub fn required(field: &str) -> Self {
        CommunityError::Validation(format!("{} is required", field))
    }
}

/// Convert CommunityError to AppError for standardized error responses
impl From<CommunityError> for AppError {
    fn from(err: CommunityError) -> Self {
        match err {
            CommunityError::Validation(msg) => AppError::BadRequest(msg),
            CommunityError::NotFound(msg) => AppError::NotFound(msg),
            CommunityError::Database(msg) => AppError::Database(msg),
            CommunityError::Serialization(msg) => AppError::Serialization(msg),
        }
    }
}

impl IntoResponse for CommunityError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CommunityError {
    fn from(err: mongodb::error::Error) -> Self {
        CommunityError::Database(err.to_string())
    }
}

impl From<bson::ser::Error> for CommunityError {
    fn from(err: bson::ser::Error) -> Self {
        CommunityError::Serialization(err.to_string())
    }
}

impl From<bson::de::Error> for CommunityError {
    fn from(err: bson::de::Error) -> Self {
        CommunityError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for CommunityError {
    fn from(err: serde_json::Error) -> Self {
        CommunityError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (CommunityError::required("userId"), StatusCode::BAD_REQUEST),
            (CommunityError::event_not_found("abc"), StatusCode::NOT_FOUND),
            (
                CommunityError::Database("connection reset".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CommunityError::Serialization("bad value".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_database_message_is_verbatim() {
        let err = CommunityError::Database("E11000 duplicate key".into());
        assert_eq!(err.to_string(), "E11000 duplicate key");
    }
}
