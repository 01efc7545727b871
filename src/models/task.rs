//! Task model
//!
//! A task is a server-owned record: a numeric id assigned by the remote
//! service plus its display text. The client only ever holds a cached copy.

use serde::{Deserialize, Serialize};

/// Server-assigned task identifier
pub type TaskId = i64;

/// A task as returned by the remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier (assigned by the server)
    pub id: TaskId,

    /// Display text (the wire field is literally named `Task`)
    #[serde(rename = "Task")]
    pub text: String,
}

/// Request body for create and update calls: `{"Task": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPayload {
    /// New task text
    #[serde(rename = "Task")]
    pub text: String,
}

impl Task {
    /// Create a task value (mostly useful for tests and mocks)
    #[must_use]
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    /// Return a copy of this task carrying new text
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            id: self.id,
            text: text.into(),
        }
    }
}

impl TaskPayload {
    /// Build a payload from any string-like value
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.text)
    }
}
