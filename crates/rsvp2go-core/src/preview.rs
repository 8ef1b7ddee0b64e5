//! Organizer preview: every event created by an email, with its RSVPs.
//!
//! The backing store only offers point reads and prefix scans, so
//! [`ScanAggregator`] answers with a client-side join:
//!
//! 1. list every event in the namespace (O(total events)),
//! 2. keep those whose creator email matches, ignoring case,
//! 3. prefix-scan the RSVPs of each match (O(matches × RSVPs)).
//!
//! Results come back in scan order. Because the store is eventually
//! consistent, an event created moments before a preview may be missing from
//! it; callers must tolerate that rather than paper over it.

use async_trait::async_trait;
use futures::future::try_join_all;
use serde::Serialize;

use crate::error::Result;
use crate::events::EventStore;
use crate::record::{Event, Rsvp};
use crate::rsvps::RsvpStore;

/// An event and every response recorded against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithRsvps {
    #[serde(flatten)]
    pub event: Event,
    /// Empty when nobody has responded yet.
    pub rsvps: Vec<Rsvp>,
}

/// Answer to a preview query.
///
/// No matching events is a valid answer, distinct from a failed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorPreview {
    /// The email exactly as queried.
    pub email: String,
    pub events: Vec<EventWithRsvps>,
}

impl CreatorPreview {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

/// Source of organizer previews.
///
/// Lets an indexed implementation replace the full scan without touching
/// the routes.
#[async_trait]
pub trait PreviewAggregator: Send + Sync {
    async fn preview(&self, creator_email: &str) -> Result<CreatorPreview>;
}

/// Full-scan implementation over [`EventStore`] and [`RsvpStore`].
#[derive(Debug, Clone)]
pub struct ScanAggregator {
    events: EventStore,
    rsvps: RsvpStore,
}

impl ScanAggregator {
    pub fn new(events: EventStore, rsvps: RsvpStore) -> Self {
        Self { events, rsvps }
    }
}

#[async_trait]
impl PreviewAggregator for ScanAggregator {
    async fn preview(&self, creator_email: &str) -> Result<CreatorPreview> {
        let all = self.events.list_all().await?;
        let scanned = all.len();

        let matched: Vec<Event> = all
            .into_iter()
            .map(|(_, event)| event)
            .filter(|event| event.details.created_by(creator_email))
            .collect();

        let rsvp_lists = try_join_all(
            matched
                .iter()
                .map(|event| self.rsvps.list_for_event(&event.id)),
        )
        .await?;

        let events: Vec<EventWithRsvps> = matched
            .into_iter()
            .zip(rsvp_lists)
            .map(|(event, rsvps)| EventWithRsvps { event, rsvps })
            .collect();

        tracing::debug!(scanned, matched = events.len(), "creator preview assembled");

        Ok(CreatorPreview {
            email: creator_email.to_string(),
            events,
        })
    }
}
