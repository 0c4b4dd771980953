//! Windowed per-category counts
//!
//! Read-only: safe to run concurrently with itself and with registrations.
//! No snapshot isolation is attempted; events written while the query runs
//! may or may not be counted.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use event_store::EventStore;
use tracing::{debug, error, info};
use types::category::AllowList;
use types::stats::CategoryCounts;
use types::window::Lookback;

use crate::error::AppError;

#[derive(Clone)]
pub struct AggregationService {
    allow_list: Arc<AllowList>,
    store: Arc<dyn EventStore>,
}

impl AggregationService {
    pub fn new(allow_list: Arc<AllowList>, store: Arc<dyn EventStore>) -> Self {
        Self { allow_list, store }
    }

    /// Counts for the window ending now.
    pub async fn aggregate(&self, lookback: Lookback) -> Result<CategoryCounts, AppError> {
        self.aggregate_at(lookback, Utc::now()).await
    }

    /// Counts for the window ending at `now`.
    ///
    /// Every allow-listed category is present (zero when unseen); store rows
    /// for categories outside the allow-list are dropped.
    pub async fn aggregate_at(
        &self,
        lookback: Lookback,
        now: DateTime<Utc>,
    ) -> Result<CategoryCounts, AppError> {
        let lower_bound = lookback.lower_bound(now);
        info!(hours = lookback.hours(), %lower_bound, "Statistics query begin");

        let observed = self
            .store
            .count_by_category_since(lower_bound)
            .await
            .inspect_err(|err| error!(error = %err, "Statistics query failed"))?;

        let mut counts = CategoryCounts::zero_filled(&self.allow_list);
        for (name, count) in &observed {
            if !counts.record(name, *count) {
                debug!(category = %name, count, "Ignoring count for category outside the allow-list");
            }
        }

        info!(hours = lookback.hours(), total = counts.total(), "Statistics query end");
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use event_store::MemoryEventStore;
    use types::category::Category;
    use types::event::Event;

    fn allow_list() -> Arc<AllowList> {
        Arc::new(AllowList::new(["a", "b", "c"]).unwrap())
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 17, 12, 0, 0).unwrap()
    }

    async fn seed(store: &MemoryEventStore, name: &str, occurred_at: DateTime<Utc>) {
        let event = Event::new(Category::try_new(name).unwrap(), occurred_at);
        store.insert_event(&event).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_store_is_zero_filled() {
        let svc = AggregationService::new(allow_list(), Arc::new(MemoryEventStore::new()));
        let counts = svc.aggregate(Lookback::default()).await.unwrap();
        assert_eq!(
            serde_json::to_string(&counts).unwrap(),
            r#"{"a":0,"b":0,"c":0}"#
        );
    }

    #[tokio::test]
    async fn test_window_and_foreign_categories() {
        let store = Arc::new(MemoryEventStore::new());
        seed(&store, "a", at()).await;
        seed(&store, "a", at() - TimeDelta::minutes(59)).await;
        seed(&store, "b", at() - TimeDelta::hours(5)).await;
        seed(&store, "legacy", at()).await;

        let svc = AggregationService::new(allow_list(), store);

        let last_hour = svc
            .aggregate_at(Lookback::default(), at())
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_string(&last_hour).unwrap(),
            r#"{"a":2,"b":0,"c":0}"#
        );

        let two_days = svc
            .aggregate_at(Lookback::from_hours(48), at())
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_string(&two_days).unwrap(),
            r#"{"a":2,"b":1,"c":0}"#
        );
    }

    #[tokio::test]
    async fn test_negative_window_is_empty() {
        let store = Arc::new(MemoryEventStore::new());
        seed(&store, "a", at()).await;

        let svc = AggregationService::new(allow_list(), store);
        let counts = svc
            .aggregate_at(Lookback::from_hours(-1), at())
            .await
            .unwrap();
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.iter().count(), 3);
    }

    #[tokio::test]
    async fn test_repeated_queries_are_identical() {
        let store = Arc::new(MemoryEventStore::new());
        seed(&store, "c", at()).await;
        let svc = AggregationService::new(allow_list(), store);

        let first = svc.aggregate_at(Lookback::default(), at()).await.unwrap();
        let second = svc.aggregate_at(Lookback::default(), at()).await.unwrap();
        assert_eq!(first, second);
    }
}
