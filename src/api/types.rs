//! Wire types for the remote task service
//!
//! Endpoint paths and the error body shapes the service is known to return.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::Operation;
use crate::models::TaskId;

// =============================================================================
// ENDPOINTS
// =============================================================================

/// `GET` - list every task
pub const LIST_PATH: &str = "/tasks/get_all_tasks";

/// `POST` - create a task
pub const CREATE_PATH: &str = "/tasks/create_task";

/// `PUT` - prefix for the id-scoped update endpoint
pub const UPDATE_PATH: &str = "/tasks/update_task_by_id";

/// `DELETE` - prefix for the id-scoped delete endpoint
pub const DELETE_PATH: &str = "/tasks/delete_task_by_id";

/// Every path the service exposes, in the order `probe` reports them
pub const KNOWN_PATHS: [&str; 4] = [LIST_PATH, CREATE_PATH, UPDATE_PATH, DELETE_PATH];

/// Build the URL for an id-scoped endpoint
#[must_use]
pub fn id_url(base_url: &str, prefix: &str, id: TaskId) -> String {
    format!("{base_url}{prefix}/{id}")
}

// =============================================================================
// ERROR BODIES
// =============================================================================

/// Error body as sent by the service
///
/// Validation failures look like `{"detail": [{"msg": "..."}]}`, other
/// failures like `{"message": "..."}`. The body is kept as raw JSON and only
/// those two paths are read, each on its own, so a badly shaped field never
/// hides a usable one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ErrorBody(Value);

impl ErrorBody {
    /// Parse a raw response body, `None` if it is not JSON at all
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok().map(Self)
    }

    /// `detail[0].msg`, if it is a non-empty string
    #[must_use]
    pub fn detail_message(&self) -> Option<&str> {
        self.0
            .get("detail")
            .and_then(|detail| detail.get(0))
            .and_then(|entry| entry.get("msg"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
    }

    /// Top-level `message`, if it is a non-empty string
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str).filter(|m| !m.is_empty())
    }

    /// First usable message: `detail[0].msg`, then `message`
    #[must_use]
    pub fn first_message(&self) -> Option<&str> {
        self.detail_message().or_else(|| self.message())
    }
}

/// Pick the user-facing message for a failed mutation
///
/// Uses the structured body when it has one, else falls back to a
/// status-code message for the operation.
#[must_use]
pub fn error_message(body: Option<&ErrorBody>, op: Operation, status: u16) -> String {
    body.and_then(ErrorBody::first_message)
        .map_or_else(|| op.fallback_message(status), str::to_string)
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// Outcome of probing one endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointProbe {
    /// Full URL that was requested
    pub url: String,
    /// HTTP status if the server answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Transport error if it did not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EndpointProbe {
    /// Whether the server answered (any status counts)
    #[must_use]
    pub const fn reachable(&self) -> bool {
        self.status.is_some()
    }
}
