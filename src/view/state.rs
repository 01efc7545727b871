//! View state and its pure transitions
//!
//! [`ViewState`] is a plain value. Every user action is split into a
//! `begin_*` step (guards, flags, and the work to do) and a `finish_*` step
//! that folds the remote result back in. Both consume the state and return
//! the next one, so the whole state machine can be exercised without a
//! runtime or a network.

use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;

use crate::api::{ClientError, RequestError};
use crate::models::{Task, TaskId};

/// Message shown when a draft is empty after trimming
pub const EMPTY_DRAFT_MESSAGE: &str = "Task text cannot be empty";

/// Message shown when saving with no task in edit mode
pub const NOT_EDITING_MESSAGE: &str = "No task is being edited";

/// What a `begin_*` step decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Begin<T> {
    /// Go ahead with the remote call using this input
    Run(T),
    /// The same action is already in flight; nothing to do
    Busy,
    /// Rejected locally; the message is already in the state
    Rejected(ClientError),
}

impl<T> Default for Begin<T> {
    fn default() -> Self {
        Self::Busy
    }
}

impl<T> Begin<T> {
    /// `Ok(Some(input))` to run, `Ok(None)` when busy, `Err` when rejected
    pub fn into_result(self) -> Result<Option<T>, ClientError> {
        match self {
            Self::Run(input) => Ok(Some(input)),
            Self::Busy => Ok(None),
            Self::Rejected(e) => Err(e),
        }
    }
}

/// Where a list refresh came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshKind {
    /// Triggered by the user; failures are shown
    Manual,
    /// Fired by the background timer; failures are only logged
    Periodic,
}

/// The task currently in edit mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditDraft {
    /// Task being edited
    pub id: TaskId,
    /// Unsaved text
    pub text: String,
}

/// In-flight flags and edit mode
///
/// Flags only stop the same action from being submitted twice. They do not
/// stop a different action from overlapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UiState {
    /// A create is in flight
    pub is_adding: bool,
    /// A delete is in flight
    pub is_deleting: bool,
    /// An update is in flight
    pub is_updating: bool,
    /// A manual refresh is in flight
    pub is_refreshing: bool,
    /// At most one task may be in edit mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing: Option<EditDraft>,
}

/// Everything the view renders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    /// Cached copy of the server's list, in server order
    pub tasks: Vec<Task>,
    /// Flags and edit mode
    pub ui: UiState,
    /// Text typed for a new task
    pub draft: String,
    /// Visible error message, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Initial load failed; the whole view is replaced by this message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fatal: Option<String>,
    /// When the list was last replaced from the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl ViewState {
    /// Id of the task in edit mode
    #[must_use]
    pub fn editing_id(&self) -> Option<TaskId> {
        self.ui.editing.as_ref().map(|e| e.id)
    }

    /// Look up a cached task
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Whether the view is showing the fatal error screen
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.fatal.is_some()
    }

    /// Message to show, fatal first
    #[must_use]
    pub fn visible_error(&self) -> Option<&str> {
        self.fatal.as_deref().or(self.error.as_deref())
    }

    fn with_error(mut self, error: &ClientError) -> Self {
        self.error = Some(error.message());
        self
    }

    fn reject<T>(self, error: ClientError) -> (Self, Begin<T>) {
        (self.with_error(&error), Begin::Rejected(error))
    }

    fn replace_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self.refreshed_at = Some(Utc::now());
        self
    }

    // =========================================================================
    // INITIAL LOAD
    // =========================================================================

    /// Fold in the result of the one unconditional load on mount
    ///
    /// There is no retry path, so a failure here is fatal to the view.
    #[must_use]
    pub fn finish_initial_load(self, result: Result<Vec<Task>, RequestError>) -> Self {
        match result {
            Ok(tasks) => self.replace_tasks(tasks),
            Err(e) => Self {
                fatal: Some(e.message),
                ..self
            },
        }
    }

    // =========================================================================
    // ADD
    // =========================================================================

    /// Replace the add-draft text
    #[must_use]
    pub fn set_draft(mut self, text: impl Into<String>) -> Self {
        self.draft = text.into();
        self
    }

    /// Start an add: returns the trimmed text to create, if the add should run
    ///
    /// An empty draft sets the validation message. A second submit while one
    /// is in flight is ignored.
    #[must_use]
    pub fn begin_add(mut self) -> (Self, Begin<String>) {
        if self.ui.is_adding {
            return (self, Begin::Busy);
        }
        let text = self.draft.trim().to_string();
        if text.is_empty() {
            return self.reject(ClientError::validation(EMPTY_DRAFT_MESSAGE));
        }
        self.error = None;
        self.ui.is_adding = true;
        (self, Begin::Run(text))
    }

    /// Finish an add with the re-fetched list (or the first failure)
    #[must_use]
    pub fn finish_add(mut self, result: Result<Vec<Task>, ClientError>) -> Self {
        self.ui.is_adding = false;
        match result {
            Ok(tasks) => {
                self.draft.clear();
                self.replace_tasks(tasks)
            },
            Err(e) => self.with_error(&e),
        }
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    /// Start a delete of `id`
    #[must_use]
    pub fn begin_delete(mut self, id: TaskId) -> (Self, Begin<TaskId>) {
        if self.ui.is_deleting {
            return (self, Begin::Busy);
        }
        self.ui.is_deleting = true;
        (self, Begin::Run(id))
    }

    /// Finish a delete with the re-fetched list (or the first failure)
    #[must_use]
    pub fn finish_delete(mut self, result: Result<Vec<Task>, ClientError>) -> Self {
        self.ui.is_deleting = false;
        match result {
            Ok(tasks) => self.replace_tasks(tasks),
            Err(e) => self.with_error(&e),
        }
    }

    // =========================================================================
    // EDIT
    // =========================================================================

    /// Put a task into edit mode, seeding the draft with its text
    ///
    /// Any other task in edit mode leaves it.
    #[must_use]
    pub fn start_edit(mut self, task: &Task) -> Self {
        self.ui.editing = Some(EditDraft {
            id: task.id,
            text: task.text.clone(),
        });
        self
    }

    /// Put a cached task into edit mode by id; rejected if it is not cached
    #[must_use]
    pub fn start_edit_by_id(self, id: TaskId) -> (Self, Begin<TaskId>) {
        match self.task(id).cloned() {
            Some(task) => (self.start_edit(&task), Begin::Run(id)),
            None => self.reject(ClientError::validation(format!("Task #{id} not found"))),
        }
    }

    /// Replace the edit draft text; no-op outside edit mode
    #[must_use]
    pub fn set_edit_text(mut self, text: impl Into<String>) -> Self {
        if let Some(editing) = self.ui.editing.as_mut() {
            editing.text = text.into();
        }
        self
    }

    /// Leave edit mode without saving
    #[must_use]
    pub fn cancel_edit(mut self) -> Self {
        self.ui.editing = None;
        self
    }

    /// Start saving the edit: returns `(id, trimmed text)` if the save should run
    #[must_use]
    pub fn begin_save_edit(mut self) -> (Self, Begin<(TaskId, String)>) {
        if self.ui.is_updating {
            return (self, Begin::Busy);
        }
        let Some(editing) = self.ui.editing.as_ref() else {
            return self.reject(ClientError::validation(NOT_EDITING_MESSAGE));
        };
        let id = editing.id;
        let text = editing.text.trim().to_string();
        if text.is_empty() {
            return self.reject(ClientError::validation(EMPTY_DRAFT_MESSAGE));
        }
        self.error = None;
        self.ui.is_updating = true;
        (self, Begin::Run((id, text)))
    }

    /// Finish a save: patch only the matching task locally, no re-fetch
    ///
    /// On failure the edit stays open so the user can retry.
    #[must_use]
    pub fn finish_save_edit(
        mut self,
        id: TaskId,
        text: &str,
        result: Result<Task, ClientError>,
    ) -> Self {
        self.ui.is_updating = false;
        if let Err(e) = result {
            return self.with_error(&e);
        }
        for task in self.tasks.iter_mut().filter(|t| t.id == id) {
            text.clone_into(&mut task.text);
        }
        if self.editing_id() == Some(id) {
            self.ui.editing = None;
        }
        self
    }

    // =========================================================================
    // REFRESH
    // =========================================================================

    /// Start a refresh
    ///
    /// Periodic refreshes never touch the flags or the error; a manual one
    /// is skipped while another manual one is in flight.
    #[must_use]
    pub fn begin_refresh(mut self, kind: RefreshKind) -> (Self, Begin<RefreshKind>) {
        if kind == RefreshKind::Periodic {
            return (self, Begin::Run(kind));
        }
        if self.ui.is_refreshing {
            return (self, Begin::Busy);
        }
        self.error = None;
        self.ui.is_refreshing = true;
        (self, Begin::Run(kind))
    }

    /// Fold in a refresh result
    ///
    /// Success replaces the whole list (last write wins). A periodic failure
    /// is logged and otherwise ignored; a manual failure is shown.
    #[must_use]
    pub fn finish_refresh(mut self, kind: RefreshKind, result: Result<Vec<Task>, RequestError>) -> Self {
        match kind {
            RefreshKind::Manual => {
                self.ui.is_refreshing = false;
                match result {
                    Ok(tasks) => self.replace_tasks(tasks),
                    Err(e) => self.with_error(&e.into()),
                }
            },
            RefreshKind::Periodic => match result {
                Ok(tasks) => self.replace_tasks(tasks),
                Err(e) => {
                    warn!("Periodic refresh failed: {e}");
                    self
                },
            },
        }
    }
}
