//! Zero-filled per-category counts
//!
//! The result of a statistics query is keyed exactly by allow-list
//! membership: every allow-listed category appears (zero when unseen) and
//! categories unknown to the allow-list never appear.

use crate::category::AllowList;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-category event counts for one window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryCounts(BTreeMap<String, u64>);

impl CategoryCounts {
    /// Seed every allow-listed category with a zero count
    pub fn zero_filled(allow_list: &AllowList) -> Self {
        Self(
            allow_list
                .iter()
                .map(|c| (c.as_str().to_string(), 0))
                .collect(),
        )
    }

    /// Overwrite the count for `name` if it is allow-listed.
    ///
    /// Returns false when the name was dropped.
    pub fn record(&mut self, name: &str, count: u64) -> bool {
        match self.0.get_mut(name) {
            Some(slot) => {
                *slot = count;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.0.get(name).copied()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
