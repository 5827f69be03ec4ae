use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use axum_helpers::{
    Envelope, JsonBody, RequiredPath, ValidatedJson,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};
use serde_json::{Value, json};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CommunityResult;
use crate::models::{EventDocument, JoinEventRequest, Member, Record, UserDocument};
use crate::repository::CommunityRepository;
use crate::service::CommunityService;

/// OpenAPI documentation for the community API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_user,
        create_event,
        list_events,
        get_event,
        list_owned_events,
        update_event,
        delete_event,
        join_event,
        list_members,
        list_joined_events,
    ),
    components(
        schemas(Envelope, Member, JoinEventRequest, UserDocument, EventDocument),
        responses(BadRequestResponse, NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Users", description = "User registration"),
        (name = "Events", description = "Event management"),
        (name = "Membership", description = "Joining events and listing members")
    )
)]
pub struct ApiDoc;

/// Create the community router with all HTTP endpoints.
///
/// `GET /manage-event/{id}` lists the events owned by the user `{id}`; `PUT`
/// and `DELETE` on the same path address the event `{id}`.
pub fn router<R: CommunityRepository + 'static>(service: CommunityService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/user", post(create_user))
        .route("/event", get(list_events).post(create_event))
        .route("/event/{id}", get(get_event))
        .route(
            "/manage-event/{id}",
            get(list_owned_events).put(update_event).delete(delete_event),
        )
        .route("/join-event/{eventId}", post(join_event))
        .route("/joined-event/{eventId}", get(list_members))
        .route("/joined-events/{userId}", get(list_joined_events))
        .with_state(shared_service)
}

fn records(records: Vec<Record>) -> Value {
    Value::Array(records.into_iter().map(Value::Object).collect())
}

/// Register a user
#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    request_body = UserDocument,
    responses(
        (status = 200, description = "User stored", body = Envelope),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    JsonBody(user): JsonBody<Record>,
) -> CommunityResult<Envelope> {
    let id = service.create_user(user).await?;
    Ok(Envelope::inserted(id, "User created"))
}

/// Create an event
#[utoipa::path(
    post,
    path = "/event",
    tag = "Events",
    request_body = EventDocument,
    responses(
        (status = 200, description = "Event stored", body = Envelope),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    JsonBody(event): JsonBody<Record>,
) -> CommunityResult<Envelope> {
    let id = service.create_event(event).await?;
    Ok(Envelope::inserted(id, "Event created"))
}

/// List all events, earliest `eventDate` first
#[utoipa::path(
    get,
    path = "/event",
    tag = "Events",
    responses(
        (status = 200, description = "Events sorted by date", body = Envelope),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
) -> CommunityResult<Envelope> {
    let events = service.list_events().await?;
    Ok(Envelope::data(records(events)))
}

/// Get an event with its creator
#[utoipa::path(
    get,
    path = "/event/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event with `creator` (null when unknown)", body = Envelope),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    RequiredPath(id): RequiredPath,
) -> CommunityResult<Envelope> {
    let event = service.get_event(&id).await?;
    Ok(Envelope::data(Value::Object(event)))
}

/// List the events a user created
#[utoipa::path(
    get,
    path = "/manage-event/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Owner's userId")
    ),
    responses(
        (status = 200, description = "Owned events sorted by date", body = Envelope),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_owned_events<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    RequiredPath(user_id): RequiredPath,
) -> CommunityResult<Envelope> {
    let events = service.list_events_by_owner(&user_id).await?;
    Ok(Envelope::data(records(events)))
}

/// Overwrite fields of an event
#[utoipa::path(
    put,
    path = "/manage-event/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    request_body = EventDocument,
    responses(
        (status = 200, description = "Event updated", body = Envelope),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    RequiredPath(id): RequiredPath,
    JsonBody(fields): JsonBody<Record>,
) -> CommunityResult<Envelope> {
    let modified = service.update_event(&id, fields).await?;
    Ok(Envelope::data(json!({ "modifiedCount": modified })).with_message("Event updated"))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/manage-event/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event deleted", body = Envelope),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_event<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    RequiredPath(id): RequiredPath,
) -> CommunityResult<Envelope> {
    let deleted = service.delete_event(&id).await?;
    Ok(Envelope::data(json!({ "deletedCount": deleted })).with_message("Event deleted"))
}

/// Join an event
#[utoipa::path(
    post,
    path = "/join-event/{eventId}",
    tag = "Membership",
    params(
        ("eventId" = String, Path, description = "Event ID")
    ),
    request_body = JoinEventRequest,
    responses(
        (status = 200, description = "Membership recorded", body = Envelope),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn join_event<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    RequiredPath(event_id): RequiredPath,
    ValidatedJson(body): ValidatedJson<JoinEventRequest>,
) -> CommunityResult<Envelope> {
    let member = service.join_event(&event_id, &body.user_id).await?;
    Ok(Envelope::data(serde_json::to_value(member)?).with_message("Joined event"))
}

/// List the members of an event
#[utoipa::path(
    get,
    path = "/joined-event/{eventId}",
    tag = "Membership",
    params(
        ("eventId" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Members, empty when nobody joined", body = Envelope),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_members<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    RequiredPath(event_id): RequiredPath,
) -> CommunityResult<Envelope> {
    let members = service.list_members(&event_id).await?;
    Ok(Envelope::data(serde_json::to_value(members)?))
}

/// List the events a user joined
#[utoipa::path(
    get,
    path = "/joined-events/{userId}",
    tag = "Membership",
    params(
        ("userId" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Joined events sorted by date", body = Envelope),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_joined_events<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    RequiredPath(user_id): RequiredPath,
) -> CommunityResult<Envelope> {
    let events = service.list_joined_events(&user_id).await?;
    Ok(Envelope::data(records(events)))
}
