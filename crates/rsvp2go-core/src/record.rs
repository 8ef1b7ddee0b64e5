//! Typed records stored as JSON values.
//!
//! The stored value never contains the record id; the id lives in the key.
//! Earlier deployments wrote form fields verbatim, so a missing field may
//! appear as JSON `null`. Text fields decode such values as empty strings.

use serde::{Deserialize, Deserializer, Serialize};

/// Fields of an event as submitted by its organizer.
///
/// Stored under `event_{id}` as
/// `{name, date, timezone, description, creatorEmail}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    /// What the event is.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Calendar date, kept exactly as submitted.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    /// IANA-style zone name, if the organizer gave one.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Free text, may be empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Lookup key for the organizer preview. Never verified.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub creator_email: String,
}

impl EventDetails {
    /// Whether `email` is this event's creator, ignoring case.
    ///
    /// Events stored without a creator email never match. No whitespace is
    /// trimmed on either side.
    pub fn created_by(&self, email: &str) -> bool {
        !self.creator_email.is_empty() && self.creator_email.to_lowercase() == email.to_lowercase()
    }
}

/// A stored event together with its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(flatten)]
    pub details: EventDetails,
}

/// Stored value of a single RSVP: `{eventId, name, email, timestamp}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpRecord {
    /// Event this response was submitted against. Not checked on write.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub event_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    /// Submission time in epoch milliseconds.
    #[serde(default)]
    pub timestamp: i64,
}

/// A stored RSVP together with its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub id: String,
    #[serde(flatten)]
    pub record: RsvpRecord,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
