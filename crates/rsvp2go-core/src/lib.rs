//! Storage layer for rsvp2go.
//!
//! This crate provides:
//! - Typed event and RSVP records and their JSON layout
//! - The key layout of the two namespaces (`event_*`, `rsvp_*`)
//! - A [`KvStore`] abstraction with in-memory and Redis backends
//! - [`EventStore`] and [`RsvpStore`] over those namespaces
//! - The organizer preview join behind [`PreviewAggregator`]
//!
//! Nothing here validates field contents. Records are stored as given and
//! every listing follows store cursors to the end.

mod error;
pub mod events;
pub mod key;
pub mod kv;
pub mod preview;
mod record;
pub mod rsvps;

pub use error::{Error, Result};
pub use events::EventStore;
pub use kv::{KvStore, ListPage, MemoryKv, RedisKv};
pub use preview::{CreatorPreview, EventWithRsvps, PreviewAggregator, ScanAggregator};
pub use record::{Event, EventDetails, Rsvp, RsvpRecord};
pub use rsvps::RsvpStore;
