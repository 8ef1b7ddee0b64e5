//! Redis backend.
//!
//! Each logical namespace gets its own key prefix (`{namespace}:`) inside a
//! single Redis database. Listings use `SCAN ... MATCH`, whose cursor maps
//! directly onto [`ListPage::cursor`]. `SCAN` may return a key more than once
//! and its `COUNT` is only a hint; [`super::list_keys`] absorbs both.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use super::{KvStore, ListPage};
use crate::error::{Error, Result};

/// Redis-backed key-value namespace.
#[derive(Clone)]
pub struct RedisKv {
    conn: ConnectionManager,
    namespace: String,
}

impl RedisKv {
    /// Connect to `redis_url` and scope all keys under `namespace`.
    pub async fn connect(redis_url: &str, namespace: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self::with_connection(conn, namespace))
    }

    /// Build a namespace over an existing connection manager.
    ///
    /// Connection managers are cheap to clone, so several namespaces can
    /// share one connection.
    pub fn with_connection(conn: ConnectionManager, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        tracing::info!(namespace = %namespace, "redis namespace ready");
        Self { conn, namespace }
    }

    /// Handle to the underlying connection, for opening sibling namespaces.
    pub fn connection(&self) -> ConnectionManager {
        self.conn.clone()
    }

    fn physical_key(&self, key: &str) -> String {
        physical_key(&self.namespace, key)
    }
}

fn physical_key(namespace: &str, key: &str) -> String {
    format!("{namespace}:{key}")
}

/// Strip `{namespace}:` from a key returned by `SCAN`.
fn logical_key<'k>(namespace: &str, physical: &'k str) -> Option<&'k str> {
    physical
        .strip_prefix(namespace)
        .and_then(|rest| rest.strip_prefix(':'))
}

#[async_trait]
impl KvStore for RedisKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(self.physical_key(key)).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(self.physical_key(key), value).await?;
        Ok(())
    }

    async fn put_if_absent(&self, key: &str, value: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let created: bool = conn.set_nx(self.physical_key(key), value).await?;
        Ok(created)
    }

    async fn list(&self, prefix: &str, cursor: Option<&str>, limit: usize) -> Result<ListPage> {
        let start: u64 = match cursor {
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::Backend(format!("invalid scan cursor '{raw}'")))?,
            None => 0,
        };

        let pattern = format!("{}*", escape_glob(&self.physical_key(prefix)));

        let mut conn = self.conn.clone();
        let (next, physical): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(start)
            .arg("MATCH")
            .arg(&pattern)
            .arg("COUNT")
            .arg(limit)
            .query_async(&mut conn)
            .await?;

        let keys = physical
            .iter()
            .filter_map(|k| logical_key(&self.namespace, k))
            .map(str::to_string)
            .collect();

        let cursor = (next != 0).then(|| next.to_string());

        Ok(ListPage { keys, cursor })
    }
}

/// Escape Redis glob metacharacters so a prefix matches literally.
fn escape_glob(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\' | '^' | '-') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
