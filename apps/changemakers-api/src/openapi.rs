//! OpenAPI documentation configuration

use utoipa::{Modify, OpenApi};

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Changemakers API",
        version = "0.1.0",
        description = "Community events: register users, publish events, join them",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(crate::api::health::readiness_check),
    modifiers(&CommunityRoutes),
    tags(
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Community routes are mounted at the root, so their document is merged
/// as-is rather than nested under a prefix.
struct CommunityRoutes;

impl Modify for CommunityRoutes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(domain_community::ApiDoc::openapi());
    }
}
