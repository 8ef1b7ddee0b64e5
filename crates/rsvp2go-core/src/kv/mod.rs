//! Key-value store abstraction.
//!
//! The stores only need point reads, point writes (plain or claim-if-unused)
//! and a paginated prefix listing. Backends are assumed eventually consistent: a
//! key written by one request may not show up in a listing issued right
//! after it.

mod memory;
mod redis_kv;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::Result;

pub use self::memory::MemoryKv;
pub use self::redis_kv::RedisKv;

/// Default number of keys requested per listing call.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// One page of a prefix listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    /// Keys on this page. May be empty even when `cursor` is set.
    pub keys: Vec<String>,
    /// Continuation token, `None` once the listing is complete.
    pub cursor: Option<String>,
}

/// A key-value namespace with prefix listing.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value stored at `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` at `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Write `value` at `key` only if the key is unused.
    ///
    /// Returns `false`, leaving the stored value untouched, when the key
    /// already exists. The check and the write are a single atomic step.
    async fn put_if_absent(&self, key: &str, value: &str) -> Result<bool>;

    /// List keys starting with `prefix`, resuming from `cursor`.
    ///
    /// `limit` is a hint; backends may return fewer or more keys.
    async fn list(&self, prefix: &str, cursor: Option<&str>, limit: usize) -> Result<ListPage>;
}

/// List every key under `prefix`, following cursors until the listing ends.
///
/// Keys are returned in backend order with duplicates removed.
pub async fn list_keys(store: &dyn KvStore, prefix: &str, page_size: usize) -> Result<Vec<String>> {
    let page_size = page_size.max(1);
    let mut keys = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = store.list(prefix, cursor.as_deref(), page_size).await?;
        pages += 1;

        for key in page.keys {
            if seen.insert(key.clone()) {
                keys.push(key);
            }
        }

        match page.cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    tracing::debug!(prefix = %prefix, pages, keys = keys.len(), "prefix listing complete");

    Ok(keys)
}
