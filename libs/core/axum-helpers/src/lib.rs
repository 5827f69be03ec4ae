//! # Axum Helpers
//!
//! Utilities shared by the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`envelope`]**: the `{success, message?, data?, error?, insertedId?}` response wrapper
//! - **[`errors`]**: `AppError` and its envelope-shaped responses
//! - **[`extractors`]**: required path parameters and JSON bodies with envelope rejections
//! - **[`http`]**: CORS configuration
//! - **[`server`]**: router setup, health endpoint, graceful shutdown

pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use envelope::Envelope;
pub use errors::{AppError, ErrorCode};
pub use extractors::{JsonBody, RequiredPath, ValidatedJson};
pub use server::{
    HealthResponse, ShutdownCoordinator, create_production_app, create_router, health_router,
    shutdown_signal,
};
