//! Single path parameter extractor that rejects blank values.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Extractor for a route's single path parameter.
///
/// The value is trimmed; an empty result is rejected with a 400 envelope
/// naming the parameter, before the handler runs.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::RequiredPath;
///
/// async fn members(RequiredPath(event_id): RequiredPath) -> String {
///     event_id
/// }
///
/// let app: Router = Router::new().route("/joined-event/{eventId}", get(members));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredPath(pub String);

impl<S> FromRequestParts<S> for RequiredPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()).into_response())?;

        let Some((name, value)) = params.into_iter().next() else {
            return Err(AppError::BadRequest("path parameter is required".to_string()).into_response());
        };

        let value = value.trim();
        if value.is_empty() {
            return Err(AppError::BadRequest(format!("{name} is required")).into_response());
        }

        Ok(RequiredPath(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/joined-event/{eventId}",
            get(|RequiredPath(id): RequiredPath| async move { id }),
        )
    }

    #[tokio::test]
    async fn test_extracts_and_trims_value() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/joined-event/%20abc%20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"abc");
    }

    #[tokio::test]
    async fn test_blank_value_is_rejected_with_parameter_name() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/joined-event/%20%20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "eventId is required");
    }
}
