//! API routes module
//!
//! Every route is mounted at the root; there is no `/api` prefix.

pub mod community;
pub mod health;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Plain-text liveness greeting served at `/`
pub const GREETING: &str = "Together, Make Bangladesh Great!";

async fn root() -> &'static str {
    GREETING
}

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(community::router(state))
        .merge(health::router(state.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_root_returns_greeting() {
        let app = Router::new().route("/", get(root));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], GREETING.as_bytes());
    }
}
