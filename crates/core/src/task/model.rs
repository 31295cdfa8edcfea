//! Task model definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Task priority level, fixed at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Priority {
    /// Storage representation of the priority
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which subset of the collection a read operation returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    All,
    Active,
    Completed,
}

impl Default for FilterMode {
    fn default() -> Self {
        Self::All
    }
}

impl FilterMode {
    /// Whether a task belongs to this filter's subset
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// A single to-do item
///
/// `priority` is a plain string at this layer: the API constrains new tasks
/// to [`Priority`], but values loaded from disk are pass-through data and
/// round-trip unchanged even when they match no known priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Description as entered by the user
    #[serde(rename = "task")]
    pub text: String,
    pub completed: bool,
    pub priority: String,
}

impl Task {
    /// Create a new, not yet completed task
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            text: text.into(),
            completed: false,
            priority: priority.as_str().to_string(),
        }
    }
}

/// Completion counts over the whole collection
///
/// Carries the raw counts only; ratio math (and its zero-total edge case)
/// belongs to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}
