//! MongoDB implementation of CommunityRepository
//!
//! Users and events are stored as free-form documents. Membership lives in
//! `joinedEvents`, one document per event: `{eventId, members: [{userId, joinedAt}]}`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Bson, Document, doc, oid::ObjectId},
    options::IndexOptions,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::error::{CommunityError, CommunityResult};
use crate::models::{EVENT_DATE_FIELD, ID_FIELD, Member, Record, USER_ID_FIELD};
use crate::repository::CommunityRepository;

pub const USERS_COLLECTION: &str = "users";
pub const EVENTS_COLLECTION: &str = "events";
pub const JOINED_EVENTS_COLLECTION: &str = "joinedEvents";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JoinedEventDocument {
    #[serde(rename = "eventId")]
    event_id: String,
    #[serde(default)]
    members: Vec<StoredMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredMember {
    #[serde(rename = "userId")]
    user_id: String,
    #[serde(rename = "joinedAt")]
    joined_at: bson::DateTime,
}

impl From<&Member> for StoredMember {
    fn from(member: &Member) -> Self {
        Self {
            user_id: member.user_id.clone(),
            joined_at: bson::DateTime::from_millis(member.joined_at.timestamp_millis()),
        }
    }
}

impl From<StoredMember> for Member {
    fn from(stored: StoredMember) -> Self {
        let joined_at = DateTime::<Utc>::from_timestamp_millis(stored.joined_at.timestamp_millis())
            .unwrap_or_default();
        Member::new(stored.user_id, joined_at)
    }
}

/// MongoDB implementation of the CommunityRepository
#[derive(Clone)]
pub struct MongoCommunityRepository {
    users: Collection<Document>,
    events: Collection<Document>,
    joined_events: Collection<JoinedEventDocument>,
}

impl MongoCommunityRepository {
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoCommunityRepository::new(client.database("changemakers"));
    /// repo.create_indexes().await?;
    /// ```
    pub fn new(db: Database) -> Self {
        Self {
            users: db.collection(USERS_COLLECTION),
            events: db.collection(EVENTS_COLLECTION),
            joined_events: db.collection(JOINED_EVENTS_COLLECTION),
        }
    }

    /// Create the indexes the queries rely on. Safe to call on every startup.
    ///
    /// `joinedEvents.eventId` is unique so concurrent first joins of the
    /// same event cannot create two membership records.
    pub async fn create_indexes(&self) -> CommunityResult<()> {
        self.events
            .create_indexes(vec![
                IndexModel::builder().keys(doc! { EVENT_DATE_FIELD: 1 }).build(),
                IndexModel::builder().keys(doc! { USER_ID_FIELD: 1 }).build(),
            ])
            .await?;

        self.users
            .create_index(IndexModel::builder().keys(doc! { USER_ID_FIELD: 1 }).build())
            .await?;

        self.joined_events
            .create_indexes(vec![
                IndexModel::builder()
                    .keys(doc! { "eventId": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
                IndexModel::builder().keys(doc! { "members.userId": 1 }).build(),
            ])
            .await?;

        tracing::info!("Community indexes ensured");
        Ok(())
    }

    async fn find_events(&self, filter: Document) -> CommunityResult<Vec<Record>> {
        let cursor = self
            .events
            .find(filter)
            .sort(doc! { EVENT_DATE_FIELD: 1 })
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        documents.into_iter().map(to_record).collect()
    }
}

/// Parse a hex identifier, rejecting malformed ones as invalid input.
fn parse_object_id(id: &str) -> CommunityResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| CommunityError::Validation(format!("Invalid id: {}", id)))
}

/// Render a stored document as JSON with `_id` flattened to its hex string.
fn to_record(mut document: Document) -> CommunityResult<Record> {
    if let Some(Bson::ObjectId(oid)) = document.get(ID_FIELD) {
        let hex = oid.to_hex();
        document.insert(ID_FIELD, hex);
    }

    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(record) => Ok(record),
        other => Err(CommunityError::Serialization(format!(
            "expected a document, got {}",
            other
        ))),
    }
}

fn to_document(record: &Record) -> CommunityResult<Document> {
    Ok(bson::to_document(record)?)
}

fn inserted_id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

#[async_trait]
impl CommunityRepository for MongoCommunityRepository {
    #[instrument(skip(self, user))]
    async fn insert_user(&self, user: Record) -> CommunityResult<String> {
        let result = self.users.insert_one(to_document(&user)?).await?;
        let id = inserted_id_to_string(result.inserted_id);

        tracing::info!(user_id = %id, "User created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn find_user_by_user_id(&self, user_id: &str) -> CommunityResult<Option<Record>> {
        self.users
            .find_one(doc! { USER_ID_FIELD: user_id })
            .await?
            .map(to_record)
            .transpose()
    }

    #[instrument(skip(self, event))]
    async fn insert_event(&self, event: Record) -> CommunityResult<String> {
        let result = self.events.insert_one(to_document(&event)?).await?;
        let id = inserted_id_to_string(result.inserted_id);

        tracing::info!(event_id = %id, "Event created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn list_events(&self) -> CommunityResult<Vec<Record>> {
        self.find_events(doc! {}).await
    }

    #[instrument(skip(self))]
    async fn find_event(&self, id: &str) -> CommunityResult<Option<Record>> {
        let oid = parse_object_id(id)?;
        self.events
            .find_one(doc! { ID_FIELD: oid })
            .await?
            .map(to_record)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn list_events_by_owner(&self, user_id: &str) -> CommunityResult<Vec<Record>> {
        self.find_events(doc! { USER_ID_FIELD: user_id }).await
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn list_events_by_ids(&self, ids: Vec<String>) -> CommunityResult<Vec<Record>> {
        let oids: Vec<ObjectId> = ids
            .iter()
            .filter_map(|id| ObjectId::parse_str(id).ok())
            .collect();
        if oids.is_empty() {
            return Ok(Vec::new());
        }

        self.find_events(doc! { ID_FIELD: { "$in": oids } }).await
    }

    #[instrument(skip(self, fields))]
    async fn update_event(&self, id: &str, fields: Record) -> CommunityResult<u64> {
        let oid = parse_object_id(id)?;
        let result = self
            .events
            .update_one(doc! { ID_FIELD: oid }, doc! { "$set": to_document(&fields)? })
            .await?;

        tracing::info!(event_id = %id, modified = result.modified_count, "Event updated");
        Ok(result.modified_count)
    }

    #[instrument(skip(self))]
    async fn delete_event(&self, id: &str) -> CommunityResult<u64> {
        let oid = parse_object_id(id)?;
        let result = self.events.delete_one(doc! { ID_FIELD: oid }).await?;

        tracing::info!(event_id = %id, deleted = result.deleted_count, "Event deleted");
        Ok(result.deleted_count)
    }

    #[instrument(skip(self, member), fields(user_id = %member.user_id))]
    async fn add_member(&self, event_id: &str, member: Member) -> CommunityResult<()> {
        let stored = bson::to_bson(&StoredMember::from(&member))?;
        self.joined_events
            .update_one(
                doc! { "eventId": event_id },
                doc! { "$addToSet": { "members": stored } },
            )
            .upsert(true)
            .await?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_members(&self, event_id: &str) -> CommunityResult<Option<Vec<Member>>> {
        let record = self
            .joined_events
            .find_one(doc! { "eventId": event_id })
            .await?;

        Ok(record.map(|r| r.members.into_iter().map(Member::from).collect()))
    }

    #[instrument(skip(self))]
    async fn joined_event_ids(&self, user_id: &str) -> CommunityResult<Vec<String>> {
        let cursor = self
            .joined_events
            .find(doc! { "members.userId": user_id })
            .projection(doc! { "eventId": 1 })
            .await?;
        let records: Vec<JoinedEventDocument> = cursor.try_collect().await?;

        Ok(records.into_iter().map(|r| r.event_id).collect())
    }
}
