//! Community Domain
//!
//! Users register, create events, and join each other's events. Everything
//! is persisted in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Presence checks, not-found rules, creator lookup
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Free-form records, membership entries
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_community::{handlers, mongodb::MongoCommunityRepository, service::CommunityService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoCommunityRepository::new(client.database("changemakers"));
//! repository.create_indexes().await?;
//!
//! let router = handlers::router(CommunityService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{CommunityError, CommunityResult};
pub use handlers::ApiDoc;
pub use models::{JoinEventRequest, Member, Record};
pub use mongodb::MongoCommunityRepository;
pub use repository::CommunityRepository;
pub use service::CommunityService;
