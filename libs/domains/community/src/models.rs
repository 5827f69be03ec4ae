use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// A schema-free document as stored: user and event payloads are kept as-is.
pub type Record = Map<String, Value>;

/// Field holding the store-generated identifier.
pub const ID_FIELD: &str = "_id";
/// Field events are sorted by.
pub const EVENT_DATE_FIELD: &str = "eventDate";
/// Owner reference on events, and the foreign key users are looked up by.
pub const USER_ID_FIELD: &str = "userId";
/// Field the creator user is merged under when fetching one event.
pub const CREATOR_FIELD: &str = "creator";

/// One membership entry of a joined event.
///
/// Entries are deduplicated only by the full `{userId, joinedAt}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// User that joined
    pub user_id: String,
    /// When the join happened (millisecond precision)
    pub joined_at: DateTime<Utc>,
}

impl Member {
    pub fn new(user_id: impl Into<String>, joined_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            joined_at: joined_at.trunc_subsecs(3),
        }
    }

    /// Entry stamped with the current time.
    pub fn joined_now(user_id: impl Into<String>) -> Self {
        Self::new(user_id, Utc::now())
    }
}

/// Body of `POST /join-event/{eventId}`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct JoinEventRequest {
    /// User joining the event
    #[serde(default, rename = "userId")]
    #[validate(custom(function = "not_blank"))]
    pub user_id: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("userId is required".into()));
    }
    Ok(())
}

/// Example user document for the OpenAPI schema
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    /// Foreign key events reference
    pub user_id: String,
    /// Any further fields are stored unchanged
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Record,
}

/// Example event document for the OpenAPI schema
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDocument {
    /// Sort key, compared as stored (ISO dates sort correctly as strings)
    pub event_date: String,
    /// Owner reference
    pub user_id: String,
    /// Any further fields are stored unchanged
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Record,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_member_serializes_camel_case() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let value = serde_json::to_value(Member::new("u2", at)).unwrap();
        assert_eq!(value, json!({ "userId": "u2", "joinedAt": "2025-01-01T12:00:00Z" }));
    }

    #[test]
    fn test_member_truncates_to_millis() {
        let at = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let member = Member::new("u1", at);
        assert_eq!(member.joined_at.timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn test_join_request_requires_user_id() {
        let missing: JoinEventRequest = serde_json::from_value(json!({})).unwrap();
        assert!(missing.validate().is_err());

        let blank: JoinEventRequest = serde_json::from_value(json!({ "userId": "  " })).unwrap();
        assert!(blank.validate().is_err());

        let ok: JoinEventRequest = serde_json::from_value(json!({ "userId": "u2" })).unwrap();
        assert!(ok.validate().is_ok());
    }
}
