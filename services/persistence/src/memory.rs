//! In-process event store
//!
//! Events are sharded by category so concurrent registrations of different
//! categories do not contend on a single lock.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;
use types::event::Event;

use crate::{EventStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryEventStore {
    // Maps category name to the timestamps recorded for it
    events: DashMap<String, Vec<DateTime<Utc>>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored events across all categories.
    pub fn len(&self) -> usize {
        self.events.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_event(&self, event: &Event) -> Result<(), StoreError> {
        self.events
            .entry(event.category.as_str().to_string())
            .or_default()
            .push(event.occurred_at);
        debug!(category = %event.category, "Event stored in memory");
        Ok(())
    }

    async fn count_by_category_since(
        &self,
        lower_bound: DateTime<Utc>,
    ) -> Result<BTreeMap<String, u64>, StoreError> {
        let mut counts = BTreeMap::new();
        for entry in self.events.iter() {
            let count = entry.value().iter().filter(|at| **at >= lower_bound).count() as u64;
            if count > 0 {
                counts.insert(entry.key().clone(), count);
            }
        }
        Ok(counts)
    }
}
