//! Custom extractors for Axum handlers.
//!
//! Rejections are rendered as failure envelopes, so clients see the same
//! shape for extraction errors as for handler errors.

pub mod required_path;
pub mod validated_json;

pub use required_path::RequiredPath;
pub use validated_json::{JsonBody, ValidatedJson};
