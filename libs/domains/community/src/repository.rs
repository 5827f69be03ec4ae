use async_trait::async_trait;

use crate::error::CommunityResult;
use crate::models::{Member, Record};

/// Data access for users, events and event memberships.
///
/// Identifiers are the hex form of the store-generated `_id`. Implementations
/// reject malformed identifiers with [`CommunityError::Validation`].
///
/// [`CommunityError::Validation`]: crate::error::CommunityError::Validation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// Store a user document, returning its generated id
    async fn insert_user(&self, user: Record) -> CommunityResult<String>;

    /// First user whose `userId` equals `user_id`
    async fn find_user_by_user_id(&self, user_id: &str) -> CommunityResult<Option<Record>>;

    /// Store an event document, returning its generated id
    async fn insert_event(&self, event: Record) -> CommunityResult<String>;

    /// All events, ascending by `eventDate`
    async fn list_events(&self) -> CommunityResult<Vec<Record>>;

    async fn find_event(&self, id: &str) -> CommunityResult<Option<Record>>;

    /// Events whose `userId` equals `user_id`, ascending by `eventDate`
    async fn list_events_by_owner(&self, user_id: &str) -> CommunityResult<Vec<Record>>;

    /// Events with the given ids, ascending by `eventDate`.
    /// Ids that cannot be parsed are skipped.
    async fn list_events_by_ids(&self, ids: Vec<String>) -> CommunityResult<Vec<Record>>;

    /// Overwrite the given fields, returning the number of modified documents
    async fn update_event(&self, id: &str, fields: Record) -> CommunityResult<u64>;

    /// Returns the number of deleted documents
    async fn delete_event(&self, id: &str) -> CommunityResult<u64>;

    /// Add `member` to the event's member set, creating the record if needed
    async fn add_member(&self, event_id: &str, member: Member) -> CommunityResult<()>;

    /// Members of an event, or `None` when nobody ever joined it
    async fn find_members(&self, event_id: &str) -> CommunityResult<Option<Vec<Member>>>;

    /// Ids of events whose member set contains `user_id`
    async fn joined_event_ids(&self, user_id: &str) -> CommunityResult<Vec<String>>;
}
