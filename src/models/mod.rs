//! Data models for tasklist
//!
//! - Task: a server-owned record with numeric id and text
//! - TaskPayload: the `{"Task": ...}` body sent on create and update

pub mod task;

pub use task::{Task, TaskId, TaskPayload};
