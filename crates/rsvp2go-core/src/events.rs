//! Event records: create, point lookup and full-namespace listing.
//!
//! There is no secondary index. Finding events by creator means scanning
//! every key under `event_` and filtering in process (see [`crate::preview`]).

use std::fmt;
use std::sync::Arc;

use futures::future::try_join_all;

use crate::error::{Error, Result};
use crate::key::{EVENT_PREFIX, StoreKey, event_id_from_key};
use crate::kv::{DEFAULT_PAGE_SIZE, KvStore, list_keys};
use crate::record::{Event, EventDetails};

/// How many fresh ids `create` tries before giving up.
pub const MAX_ID_ATTEMPTS: usize = 4;

/// Generator for new event ids.
pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Store for event records over a key-value namespace.
#[derive(Clone)]
pub struct EventStore {
    kv: Arc<dyn KvStore>,
    page_size: usize,
    next_id: IdGenerator,
}

impl fmt::Debug for EventStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStore")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl EventStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            page_size: DEFAULT_PAGE_SIZE,
            next_id: Arc::new(random_event_id),
        }
    }

    /// Number of keys requested per listing call.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Replace the id generator.
    pub fn with_id_generator(mut self, next_id: IdGenerator) -> Self {
        self.next_id = next_id;
        self
    }

    /// Persist a new event and return its id.
    ///
    /// Fields are stored as given; presence checks belong to the caller.
    /// Each id is claimed with [`KvStore::put_if_absent`], so an existing
    /// event is never overwritten.
    pub async fn create(&self, details: &EventDetails) -> Result<String> {
        let value = serde_json::to_string(details)?;

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = (self.next_id)();
            let key = StoreKey::Event(&id).to_string();

            if self.kv.put_if_absent(&key, &value).await? {
                tracing::debug!(event_id = %id, "event created");
                return Ok(id);
            }

            tracing::warn!(event_id = %id, attempt, "event id already taken, retrying");
        }

        Err(Error::IdAllocation(MAX_ID_ATTEMPTS))
    }

    /// Look up a single event. `Ok(None)` when the id is unknown.
    pub async fn get(&self, id: &str) -> Result<Option<Event>> {
        let key = StoreKey::Event(id).to_string();

        let Some(raw) = self.kv.get(&key).await? else {
            return Ok(None);
        };

        let details = decode(&key, &raw)?;
        Ok(Some(Event {
            id: id.to_string(),
            details,
        }))
    }

    /// Every event in the namespace as `(key, event)` pairs, in listing order.
    ///
    /// Keys that disappear between listing and reading are skipped, as are
    /// records that fail to decode.
    pub async fn list_all(&self) -> Result<Vec<(String, Event)>> {
        let keys = list_keys(self.kv.as_ref(), EVENT_PREFIX, self.page_size).await?;

        let values = try_join_all(keys.iter().map(|key| self.kv.get(key))).await?;

        let events = keys
            .into_iter()
            .zip(values)
            .filter_map(|(key, raw)| {
                let raw = raw?;
                let id = event_id_from_key(&key)?.to_string();
                match decode(&key, &raw) {
                    Ok(details) => Some((key, Event { id, details })),
                    Err(err) => {
                        tracing::warn!(error = %err, "skipping undecodable event record");
                        None
                    }
                }
            })
            .collect();

        Ok(events)
    }
}

/// Random 8-character lowercase hex id.
pub fn random_event_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

fn decode(key: &str, raw: &str) -> Result<EventDetails> {
    serde_json::from_str(raw).map_err(|source| Error::CorruptRecord {
        key: key.to_string(),
        source,
    })
}
