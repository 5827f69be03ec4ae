//! JSON body extractors that reply with failure envelopes.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// JSON extractor without schema checks.
///
/// Malformed JSON, a wrong content type, or a body that does not fit `T`
/// becomes a 400 envelope instead of axum's plain-text rejection.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(JsonBody(data))
    }
}

/// JSON extractor with automatic validation.
///
/// Validates the request body using the `validator` crate's `Validate` trait.
///
/// # Example
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct JoinEvent {
///     #[serde(default, rename = "userId")]
///     #[validate(length(min = 1, message = "userId is required"))]
///     user_id: String,
/// }
///
/// async fn join(ValidatedJson(body): ValidatedJson<JoinEvent>) -> String {
///     body.user_id
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(data) = JsonBody::<T>::from_request(req, state).await?;

        data.validate()
            .map_err(|e| AppError::BadRequest(describe(&e)).into_response())?;

        Ok(ValidatedJson(data))
    }
}

/// Flatten validation errors into one line, preferring each rule's message.
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid ({})", err.code),
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct JoinBody {
        #[serde(default, rename = "userId")]
        #[validate(length(min = 1, message = "userId is required"))]
        user_id: String,
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/join",
                post(|ValidatedJson(body): ValidatedJson<JoinBody>| async move { body.user_id }),
            )
            .route(
                "/raw",
                post(|JsonBody(body): JsonBody<serde_json::Map<String, serde_json::Value>>| async move {
                    body.len().to_string()
                }),
            )
    }

    async fn send(uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let (status, body) = send("/join", r#"{"userId":"u2"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"u2");
    }

    #[tokio::test]
    async fn test_missing_field_is_400_with_rule_message() {
        let (status, body) = send("/join", "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "userId is required");
    }

    #[tokio::test]
    async fn test_non_object_body_is_400_envelope() {
        let (status, body) = send("/raw", "[1,2,3]").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_malformed_json_is_400_envelope() {
        let (status, _) = send("/raw", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
