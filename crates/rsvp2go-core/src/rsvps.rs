//! Append-only RSVP records, listed per event by prefix scan.

use std::fmt;
use std::sync::Arc;

use futures::future::try_join_all;

use crate::error::{Error, Result};
use crate::key::{StoreKey, rsvp_id_from_key, rsvp_prefix};
use crate::kv::{DEFAULT_PAGE_SIZE, KvStore, list_keys};
use crate::record::{Rsvp, RsvpRecord};

/// Store for guest responses over a key-value namespace.
#[derive(Clone)]
pub struct RsvpStore {
    kv: Arc<dyn KvStore>,
    page_size: usize,
}

impl fmt::Debug for RsvpStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsvpStore")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl RsvpStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Number of keys requested per listing call.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Record a response and return its id.
    ///
    /// The event is never read, so responses to unknown event ids are
    /// stored like any other.
    pub async fn append(&self, event_id: &str, name: &str, email: &str) -> Result<String> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let suffix = random_suffix();
        let key = StoreKey::Rsvp {
            event_id,
            timestamp,
            suffix: &suffix,
        }
        .to_string();

        let record = RsvpRecord {
            event_id: event_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            timestamp,
        };
        self.kv.put(&key, &serde_json::to_string(&record)?).await?;

        tracing::debug!(event_id = %event_id, key = %key, "rsvp recorded");

        Ok(rsvp_id_from_key(&key).unwrap_or(&key).to_string())
    }

    /// Every response recorded against `event_id`, in listing order.
    ///
    /// The key prefix of one event id can cover another (`abc` and
    /// `abc_def`), so records are also matched on their stored event id.
    pub async fn list_for_event(&self, event_id: &str) -> Result<Vec<Rsvp>> {
        let prefix = rsvp_prefix(event_id);
        let keys = list_keys(self.kv.as_ref(), &prefix, self.page_size).await?;

        let values = try_join_all(keys.iter().map(|key| self.kv.get(key))).await?;

        let mut rsvps = Vec::with_capacity(keys.len());
        for (key, raw) in keys.into_iter().zip(values) {
            let Some(raw) = raw else {
                continue;
            };

            let record: RsvpRecord = match serde_json::from_str(&raw) {
                Ok(record) => record,
                Err(source) => {
                    let err = Error::CorruptRecord { key, source };
                    tracing::warn!(error = %err, "skipping undecodable rsvp record");
                    continue;
                }
            };

            if record.event_id != event_id {
                continue;
            }

            let id = rsvp_id_from_key(&key).unwrap_or(&key).to_string();
            rsvps.push(Rsvp { id, record });
        }

        Ok(rsvps)
    }
}

fn random_suffix() -> String {
    let mut suffix = uuid::Uuid::new_v4().simple().to_string();
    suffix.truncate(8);
    suffix
}
