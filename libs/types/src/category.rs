//! Category names and the allow-list
//!
//! A category is only ever accepted when it is an exact, case-sensitive
//! member of the allow-list fixed at startup.

use crate::errors::CategoryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Path segment owned by the statistics endpoint; it can never be a category.
pub const RESERVED_NAMES: &[&str] = &["stat"];

/// Name of an event category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Try to create a Category, rejecting empty names
    pub fn try_new(name: impl Into<String>) -> Result<Self, CategoryError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CategoryError::Empty);
        }
        Ok(Self(name))
    }

    /// Get the category name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Immutable set of valid categories.
///
/// Built once from configuration and shared read-only by ingestion and
/// aggregation. Ordered so statistics always serialize in the same key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    categories: BTreeSet<Category>,
}

impl AllowList {
    /// Build an allow-list from category names.
    ///
    /// Duplicates collapse into one entry. Empty and reserved names are rejected.
    pub fn new<I, S>(names: I) -> Result<Self, CategoryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories = BTreeSet::new();
        for name in names {
            let category = Category::try_new(name)?;
            if RESERVED_NAMES.contains(&category.as_str()) {
                return Err(CategoryError::Reserved(category.0));
            }
            categories.insert(category);
        }
        Ok(Self { categories })
    }

    /// Resolve a raw name into an allow-listed category.
    pub fn resolve(&self, name: &str) -> Result<Category, CategoryError> {
        self.categories
            .iter()
            .find(|c| c.as_str() == name)
            .cloned()
            .ok_or_else(|| CategoryError::Undefined(name.to_string()))
    }

    /// Iterate categories in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
