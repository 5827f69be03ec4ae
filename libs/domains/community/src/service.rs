//! Community Service - Business logic layer

use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{CommunityError, CommunityResult};
use crate::models::{CREATOR_FIELD, ID_FIELD, Member, Record, USER_ID_FIELD};
use crate::repository::CommunityRepository;

/// Users, events and event membership.
///
/// Presence checks happen here so every entry point rejects blank
/// identifiers before the store is touched.
pub struct CommunityService<R: CommunityRepository> {
    repository: Arc<R>,
}

impl<R: CommunityRepository> CommunityService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Store a user document, returning its generated id.
    ///
    /// `_id` is always assigned by the store; a caller-supplied one is dropped.
    #[instrument(skip(self, user))]
    pub async fn create_user(&self, mut user: Record) -> CommunityResult<String> {
        user.remove(ID_FIELD);
        self.repository.insert_user(user).await
    }

    /// Store an event document, returning its generated id.
    ///
    /// `_id` is always assigned by the store; a caller-supplied one is dropped.
    #[instrument(skip(self, event))]
    pub async fn create_event(&self, mut event: Record) -> CommunityResult<String> {
        event.remove(ID_FIELD);
        self.repository.insert_event(event).await
    }

    #[instrument(skip(self))]
    pub async fn list_events(&self) -> CommunityResult<Vec<Record>> {
        self.repository.list_events().await
    }

    /// Fetch one event with its creator merged under `creator`.
    ///
    /// The creator is looked up only once the event exists, and is `null`
    /// when the event has no string `userId` or no user matches.
    #[instrument(skip(self))]
    pub async fn get_event(&self, id: &str) -> CommunityResult<Record> {
        let id = required(id, "id")?;
        let mut event = self
            .repository
            .find_event(id)
            .await?
            .ok_or_else(|| CommunityError::event_not_found(id))?;

        let creator = match event.get(USER_ID_FIELD) {
            Some(Value::String(user_id)) => self.repository.find_user_by_user_id(user_id).await?,
            _ => None,
        };
        event.insert(
            CREATOR_FIELD.to_string(),
            creator.map_or(Value::Null, Value::Object),
        );

        Ok(event)
    }

    #[instrument(skip(self))]
    pub async fn list_events_by_owner(&self, user_id: &str) -> CommunityResult<Vec<Record>> {
        let user_id = required(user_id, "userId")?;
        self.repository.list_events_by_owner(user_id).await
    }

    /// Overwrite the given fields of an event.
    ///
    /// `_id` is never overwritten. Fails with not found when no document
    /// changed, which covers a missing event and an update that alters nothing.
    #[instrument(skip(self, fields))]
    pub async fn update_event(&self, id: &str, mut fields: Record) -> CommunityResult<u64> {
        let id = required(id, "id")?;
        fields.remove(ID_FIELD);
        if fields.is_empty() {
            return Err(CommunityError::NotFound(format!(
                "Event {} not found or nothing to update",
                id
            )));
        }

        let modified = self.repository.update_event(id, fields).await?;
        if modified == 0 {
            return Err(CommunityError::NotFound(format!(
                "Event {} not found or unchanged",
                id
            )));
        }

        Ok(modified)
    }

    /// Delete an event. Membership records of the event are left in place.
    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: &str) -> CommunityResult<u64> {
        let id = required(id, "id")?;
        let deleted = self.repository.delete_event(id).await?;
        if deleted == 0 {
            return Err(CommunityError::event_not_found(id));
        }

        Ok(deleted)
    }

    /// Record that `user_id` joined `event_id` now.
    ///
    /// The event itself is not checked for existence.
    #[instrument(skip(self))]
    pub async fn join_event(&self, event_id: &str, user_id: &str) -> CommunityResult<Member> {
        let event_id = required(event_id, "eventId")?;
        let user_id = required(user_id, "userId")?;

        let member = Member::joined_now(user_id);
        self.repository.add_member(event_id, member.clone()).await?;

        tracing::info!(event_id, user_id, "User joined event");
        Ok(member)
    }

    /// Members of an event; empty when nobody joined it yet
    #[instrument(skip(self))]
    pub async fn list_members(&self, event_id: &str) -> CommunityResult<Vec<Member>> {
        let event_id = required(event_id, "eventId")?;
        Ok(self
            .repository
            .find_members(event_id)
            .await?
            .unwrap_or_default())
    }

    /// Events `user_id` joined, ascending by `eventDate`
    #[instrument(skip(self))]
    pub async fn list_joined_events(&self, user_id: &str) -> CommunityResult<Vec<Record>> {
        let user_id = required(user_id, "userId")?;
        let ids = self.repository.joined_event_ids(user_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.repository.list_events_by_ids(ids).await
    }
}

fn required<'a>(value: &'a str, field: &str) -> CommunityResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CommunityError::required(field));
    }
    Ok(value)
}
