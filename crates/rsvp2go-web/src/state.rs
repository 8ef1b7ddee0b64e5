//! Application state shared across all request handlers.
//!
//! Everything here is an immutable handle. All durable state lives in the
//! key-value store; handlers share no mutable state with each other.

use std::sync::Arc;

use rsvp2go_core::{
    EventStore, KvStore, MemoryKv, PreviewAggregator, RedisKv, RsvpStore, ScanAggregator,
};

use crate::config::Config;
use crate::render::PageRenderer;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Event records (`event_*`).
    pub events: EventStore,

    /// RSVP records (`rsvp_*`).
    pub rsvps: RsvpStore,

    /// Organizer preview query.
    pub preview: Arc<dyn PreviewAggregator>,

    /// Wraps page fragments into themed documents.
    pub renderer: Arc<PageRenderer>,

    /// Application configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state, connecting to Redis when configured.
    pub async fn connect(config: Config) -> anyhow::Result<Self> {
        let (events_kv, rsvps_kv): (Arc<dyn KvStore>, Arc<dyn KvStore>) = match &config.redis_url
        {
            Some(url) => {
                let events = RedisKv::connect(url, format!("{}:events", config.redis_namespace))
                    .await?;
                let rsvps = RedisKv::with_connection(
                    events.connection(),
                    format!("{}:rsvps", config.redis_namespace),
                );
                tracing::info!("using redis key-value store");
                (Arc::new(events), Arc::new(rsvps))
            }
            None => {
                tracing::warn!("REDIS_URL not set, using in-memory store (data is lost on exit)");
                (Arc::new(MemoryKv::new()), Arc::new(MemoryKv::new()))
            }
        };

        Ok(Self::with_stores(config, events_kv, rsvps_kv))
    }

    /// Create application state over the given event and RSVP namespaces.
    pub fn with_stores(
        config: Config,
        events_kv: Arc<dyn KvStore>,
        rsvps_kv: Arc<dyn KvStore>,
    ) -> Self {
        let events = EventStore::new(events_kv).with_page_size(config.list_page_size);
        let rsvps = RsvpStore::new(rsvps_kv).with_page_size(config.list_page_size);
        let preview = Arc::new(ScanAggregator::new(events.clone(), rsvps.clone()));
        let renderer = Arc::new(PageRenderer::new(
            config.theme.clone(),
            config.site_name.clone(),
        ));

        tracing::info!(
            list_page_size = config.list_page_size,
            site_name = %config.site_name,
            "application state initialized"
        );

        Self {
            events,
            rsvps,
            preview,
            renderer,
            config: Arc::new(config),
        }
    }
}
