//! Event Store
//!
//! Persists registered events and answers the one aggregation query the
//! gateway needs: how many events of each category were recorded at or
//! after a given instant.
//!
//! Two backends implement [`EventStore`]:
//! - [`SqliteEventStore`]: durable `events` table, blocking calls moved off
//!   the async workers with `spawn_blocking`
//! - [`MemoryEventStore`]: lock-sharded in-process store for tests and benches
//!
//! Write durability and read isolation are whatever the backend provides;
//! callers get no cross-request ordering guarantees.

pub mod error;
pub mod memory;
pub mod sqlite;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use types::event::Event;

pub use error::StoreError;
pub use memory::MemoryEventStore;
pub use sqlite::SqliteEventStore;

/// Storage collaborator consumed by the ingestion and aggregation paths.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Create the backing schema if it does not exist. Idempotent.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Append one event.
    async fn insert_event(&self, event: &Event) -> Result<(), StoreError>;

    /// Count events per category with `occurred_at >= lower_bound`.
    ///
    /// Categories with no events in range are absent from the map.
    async fn count_by_category_since(
        &self,
        lower_bound: DateTime<Utc>,
    ) -> Result<BTreeMap<String, u64>, StoreError>;
}
