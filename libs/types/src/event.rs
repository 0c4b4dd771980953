//! The event record
//!
//! Created exactly once per accepted registration and never mutated.

use crate::category::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub category: Category,
    pub occurred_at: DateTime<Utc>,
}

impl Event {
    /// Create an event with an already captured timestamp
    pub fn new(category: Category, occurred_at: DateTime<Utc>) -> Self {
        Self {
            category,
            occurred_at,
        }
    }

    /// Create an event stamped with the current wall-clock time
    pub fn now(category: Category) -> Self {
        Self::new(category, Utc::now())
    }
}
