//! Key layout for the two logical namespaces.
//!
//! ```text
//! event_{event-id}
//! rsvp_{event-id}_{timestamp-millis}_{suffix}
//! ```
//!
//! Listing all events is a scan over [`EVENT_PREFIX`]; listing the RSVPs of
//! one event is a scan over [`rsvp_prefix`].

use std::fmt;

/// Prefix shared by every event key.
pub const EVENT_PREFIX: &str = "event_";

/// Prefix shared by every RSVP key.
pub const RSVP_PREFIX: &str = "rsvp_";

/// A key in one of the rsvp2go namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey<'a> {
    /// event_{event-id}
    Event(&'a str),

    /// rsvp_{event-id}_{timestamp}_{suffix}
    ///
    /// The suffix keeps two submissions within the same millisecond apart.
    Rsvp {
        event_id: &'a str,
        timestamp: i64,
        suffix: &'a str,
    },
}

impl fmt::Display for StoreKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKey::Event(id) => write!(f, "{EVENT_PREFIX}{id}"),
            StoreKey::Rsvp {
                event_id,
                timestamp,
                suffix,
            } => write!(f, "{RSVP_PREFIX}{event_id}_{timestamp}_{suffix}"),
        }
    }
}

/// Scan prefix covering every RSVP recorded against `event_id`.
pub fn rsvp_prefix(event_id: &str) -> String {
    format!("{RSVP_PREFIX}{event_id}_")
}

/// Extract the event id from an `event_` key.
pub fn event_id_from_key(key: &str) -> Option<&str> {
    key.strip_prefix(EVENT_PREFIX)
}

/// Extract the RSVP id (the key without its namespace prefix).
pub fn rsvp_id_from_key(key: &str) -> Option<&str> {
    key.strip_prefix(RSVP_PREFIX)
}
