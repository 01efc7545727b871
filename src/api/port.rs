//! Task service port
//!
//! The view controller depends only on this trait, so it can be driven by
//! the real HTTP client or by an in-memory implementation in tests.

use async_trait::async_trait;

use super::error::RequestError;
use crate::models::{Task, TaskId};

/// Remote task service
///
/// Every call suspends until the remote side answers. Implementations must
/// not retry and must not time out on their own.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetch the full task list
    async fn list_tasks(&self) -> Result<Vec<Task>, RequestError>;

    /// Create a task with the given text, returns the stored task
    async fn create_task(&self, text: &str) -> Result<Task, RequestError>;

    /// Replace a task's text, returns the stored task
    async fn update_task(&self, id: TaskId, text: &str) -> Result<Task, RequestError>;

    /// Delete a task, returns the server's echo of the removed task
    async fn delete_task(&self, id: TaskId) -> Result<Task, RequestError>;
}
