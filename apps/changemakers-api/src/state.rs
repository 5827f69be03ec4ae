//! Shared application state.

use mongodb::{Client, Database};

/// State built once at startup and shared by every route.
///
/// Cloning is cheap: the MongoDB client shares one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client, held for the lifetime of the process
    pub mongo_client: Client,
    pub db: Database,
}
