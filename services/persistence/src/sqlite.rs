//! SQLite-backed event store
//!
//! # Table
//! ```text
//! events(
//!     id          INTEGER PRIMARY KEY AUTOINCREMENT,
//!     event_type  TEXT    NOT NULL,
//!     occurred_at INTEGER NOT NULL   -- microseconds since Unix epoch, UTC
//! )
//! ```
//!
//! One connection is shared behind a mutex. Every operation runs on the
//! blocking pool so async workers never wait on disk I/O.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tracing::{debug, info};
use types::event::Event;

use crate::{EventStore, StoreError};

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS events (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    event_type  TEXT    NOT NULL,
    occurred_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_events_occurred_at ON events (occurred_at);
";

pub struct SqliteEventStore {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl SqliteEventStore {
    /// Open or create a database file in WAL mode. Within this process every
    /// call still goes through the one connection mutex, so a statistics read
    /// waits for an in-progress registration write.
    ///
    /// The schema is not created here; call [`EventStore::ensure_schema`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        info!(path = %path.display(), journal_mode = %mode, "Opened event database");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path.to_path_buf()),
        })
    }

    /// Create a private in-memory database.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        })
    }

    /// Database file path, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `op` against the connection on the blocking pool.
    async fn with_connection<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|e| StoreError::Poisoned(e.to_string()))?;
            op(&guard)
        })
        .await
        .map_err(|e| StoreError::Task(format!("spawn_blocking failed: {e}")))?
    }
}

#[async_trait]
impl EventStore for SqliteEventStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.with_connection(|conn| {
            conn.execute_batch(SCHEMA_SQL)?;
            Ok(())
        })
        .await?;
        info!("Event schema ready");
        Ok(())
    }

    async fn insert_event(&self, event: &Event) -> Result<(), StoreError> {
        let category = event.category.as_str().to_string();
        let occurred_at = event.occurred_at.timestamp_micros();

        let id = self
            .with_connection(move |conn| {
                conn.execute(
                    "INSERT INTO events (event_type, occurred_at) VALUES (?1, ?2)",
                    params![category, occurred_at],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        debug!(id, category = %event.category, "Event row inserted");
        Ok(())
    }

    async fn count_by_category_since(
        &self,
        lower_bound: DateTime<Utc>,
    ) -> Result<BTreeMap<String, u64>, StoreError> {
        let lower = lower_bound.timestamp_micros();

        self.with_connection(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT event_type, COUNT(*) FROM events \
                 WHERE occurred_at >= ?1 GROUP BY event_type",
            )?;
            let rows = stmt.query_map(params![lower], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?;

            let mut counts = BTreeMap::new();
            for row in rows {
                let (event_type, count) = row?;
                counts.insert(event_type, u64::try_from(count).unwrap_or(0));
            }
            Ok(counts)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use types::category::Category;

    fn event(name: &str, at: DateTime<Utc>) -> Event {
        Event::new(Category::try_new(name).unwrap(), at)
    }

    async fn store() -> SqliteEventStore {
        let store = SqliteEventStore::in_memory().unwrap();
        store.ensure_schema().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let store = store().await;
        store.ensure_schema().await.unwrap();
        store.ensure_schema().await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_without_schema_fails() {
        let store = SqliteEventStore::in_memory().unwrap();
        let err = store
            .insert_event(&event("a", Utc::now()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
        assert!(err.to_string().contains("no such table"));
    }

    #[tokio::test]
    async fn test_group_by_category() {
        let store = store().await;
        let now = Utc.with_ymd_and_hms(2024, 2, 17, 12, 0, 0).unwrap();

        for name in ["a", "b", "c", "a"] {
            store.insert_event(&event(name, now)).await.unwrap();
        }
        store
            .insert_event(&event("b", now - TimeDelta::hours(2)))
            .await
            .unwrap();

        let counts = store
            .count_by_category_since(now - TimeDelta::hours(1))
            .await
            .unwrap();
        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.get("b"), Some(&1));
        assert_eq!(counts.get("c"), Some(&1));

        let counts = store
            .count_by_category_since(now - TimeDelta::hours(48))
            .await
            .unwrap();
        assert_eq!(counts.get("b"), Some(&2));
    }

    #[tokio::test]
    async fn test_lower_bound_is_inclusive() {
        let store = store().await;
        let at = Utc.with_ymd_and_hms(2024, 2, 17, 12, 0, 0).unwrap();
        store.insert_event(&event("a", at)).await.unwrap();

        assert_eq!(
            store.count_by_category_since(at).await.unwrap().get("a"),
            Some(&1)
        );
        assert!(store
            .count_by_category_since(at + TimeDelta::microseconds(1))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_inserts() {
        let store = Arc::new(store().await);
        let now = Utc::now();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                let name = if i % 2 == 0 { "a" } else { "b" };
                tokio::spawn(async move { store.insert_event(&event(name, now)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let counts = store
            .count_by_category_since(now - TimeDelta::seconds(1))
            .await
            .unwrap();
        assert_eq!(counts.get("a"), Some(&16));
        assert_eq!(counts.get("b"), Some(&16));
    }
}
