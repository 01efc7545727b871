//! Client error types
//!
//! Every failure the view can show collapses to one human-readable message.
//! Validation errors never reach the network; request errors carry the HTTP
//! status when there was one.

use thiserror::Error;

/// Which remote operation failed (drives the fallback message)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `GET /tasks/get_all_tasks`
    List,
    /// `POST /tasks/create_task`
    Create,
    /// `PUT /tasks/update_task_by_id/{id}`
    Update,
    /// `DELETE /tasks/delete_task_by_id/{id}`
    Delete,
}

impl Operation {
    /// Verb phrase used in fallback messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "load tasks",
            Self::Create => "create task",
            Self::Update => "update task",
            Self::Delete => "delete task",
        }
    }

    /// Message used when the server gave no usable error body
    #[must_use]
    pub fn fallback_message(self, status: u16) -> String {
        format!("Failed to {}: {status}", self.as_str())
    }
}

/// Normalized failure of a remote call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    /// HTTP status, `None` for network/transport failures
    pub status: Option<u16>,
    /// Human-readable message shown to the user verbatim
    pub message: String,
}

impl RequestError {
    /// Error for a non-success HTTP response
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Error for a failure below HTTP (connect, DNS, decode)
    #[must_use]
    pub fn network(cause: impl std::fmt::Display) -> Self {
        Self {
            status: None,
            message: format!("Network error: {cause}"),
        }
    }

    /// Whether the server answered at all
    #[must_use]
    pub const fn is_network(&self) -> bool {
        self.status.is_none()
    }
}

/// Any error the view can surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Rejected locally before any request was made
    #[error("{0}")]
    Validation(String),

    /// The remote call failed
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl ClientError {
    /// Create a validation error
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The single message shown to the user
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}
