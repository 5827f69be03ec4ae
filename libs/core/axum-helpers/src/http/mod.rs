//! HTTP middleware module.
//!
//! ```ignore
//! use axum_helpers::http::cors_layer_from_env;
//!
//! let app = Router::new().layer(cors_layer_from_env()?);
//! ```

pub mod cors;

pub use cors::{cors_layer_from_env, create_cors_layer, create_permissive_cors_layer};
