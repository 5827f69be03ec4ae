//! Wires the community domain to HTTP routes.

use axum::Router;
use domain_community::{CommunityService, MongoCommunityRepository, handlers};
use mongodb::Database;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoCommunityRepository::new(state.db.clone());
    handlers::router(CommunityService::new(repository))
}

/// Ensure the indexes the community queries rely on.
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoCommunityRepository::new(db.clone())
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create community indexes: {}", e))
}
