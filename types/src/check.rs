//! Checks and their canonical traversal order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a check, as issued by the check repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckId(String);

impl CheckId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CheckId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CheckId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One yes/no question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub id: CheckId,
    pub priority: i64,
    pub description: String,
}

impl Check {
    pub fn new(id: impl Into<CheckId>, priority: i64, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            priority,
            description: description.into(),
        }
    }
}

/// Checks sorted ascending by priority.
///
/// Equal priorities keep the order in which the repository returned them, so
/// the sequence is deterministic for a given input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSequence {
    checks: Vec<Check>,
}

impl CheckSequence {
    #[must_use]
    pub fn from_unordered(mut checks: Vec<Check>) -> Self {
        // `sort_by_key` is stable.
        checks.sort_by_key(|check| check.priority);
        Self { checks }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Check> {
        self.checks.get(index)
    }

    /// Position of `id` within the sequence.
    #[must_use]
    pub fn position(&self, id: &CheckId) -> Option<usize> {
        self.checks.iter().position(|check| &check.id == id)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Check> {
        self.checks.iter()
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = &CheckId> {
        self.checks.iter().map(|check| &check.id)
    }
}

impl<'a> IntoIterator for &'a CheckSequence {
    type Item = &'a Check;
    type IntoIter = std::slice::Iter<'a, Check>;

    fn into_iter(self) -> Self::IntoIter {
        self.checks.iter()
    }
}
