//! Task view controller
//!
//! Owns the [`ViewState`] inside a `watch` channel, drives the [`TaskApi`]
//! for each user action and publishes every state change to subscribers.
//! The state lock is only held while a pure transition runs, never across a
//! remote call, so different actions can overlap freely.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};
use tokio::sync::watch;

use super::refresher::PeriodicRefresh;
use super::state::{Begin, RefreshKind, ViewState};
use crate::api::{ClientError, RequestError, TaskApi};
use crate::models::{Task, TaskId};

/// State and API shared between the view and its background refresher
pub(crate) struct Shared<A> {
    api: A,
    state: watch::Sender<ViewState>,
}

impl<A: TaskApi> Shared<A> {
    fn apply(&self, transition: impl FnOnce(ViewState) -> ViewState) {
        self.state
            .send_modify(|state| *state = transition(std::mem::take(state)));
    }

    fn begin<T>(&self, step: impl FnOnce(ViewState) -> (ViewState, Begin<T>)) -> Begin<T> {
        let mut decision = Begin::default();
        self.state.send_modify(|state| {
            let (next, begun) = step(std::mem::take(state));
            *state = next;
            decision = begun;
        });
        decision
    }

    /// Run one list refresh of the given kind
    pub(crate) async fn refresh(&self, kind: RefreshKind) -> Result<(), ClientError> {
        if self.begin(|s| s.begin_refresh(kind)).into_result()?.is_none() {
            return Ok(());
        }
        let result = self.api.list_tasks().await;
        let failure = result.as_ref().err().cloned();
        self.apply(|s| s.finish_refresh(kind, result));
        if failure.is_none() {
            debug!("{kind:?} refresh applied");
        }
        failure.map_or(Ok(()), |e| Err(e.into()))
    }

    async fn create_then_list(&self, text: &str) -> Result<Vec<Task>, RequestError> {
        let created = self.api.create_task(text).await?;
        info!("Created task #{}", created.id);
        self.api.list_tasks().await
    }

    async fn delete_then_list(&self, id: TaskId) -> Result<Vec<Task>, RequestError> {
        let removed = self.api.delete_task(id).await?;
        info!("Deleted task #{}", removed.id);
        self.api.list_tasks().await
    }
}

/// The task list view
///
/// Actions report their failure both in the state (as the visible message)
/// and as the returned error. An action skipped because the same action is
/// already in flight returns `Ok(())`.
pub struct TaskView<A: TaskApi + 'static> {
    shared: Arc<Shared<A>>,
    refresher: Option<PeriodicRefresh>,
}

impl<A: TaskApi + 'static> TaskView<A> {
    /// Create an unmounted view with an empty list
    #[must_use]
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            shared: Arc::new(Shared { api, state }),
            refresher: None,
        }
    }

    /// The underlying API
    #[must_use]
    pub fn api(&self) -> &A {
        &self.shared.api
    }

    /// Copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> ViewState {
        self.shared.state.borrow().clone()
    }

    /// Receiver that sees every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.shared.state.subscribe()
    }

    /// Whether the periodic refresher is running
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.refresher.is_some()
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Perform the one unconditional initial load
    ///
    /// A failure is fatal to the view: the state switches to the fatal error
    /// screen and there is no retry.
    pub async fn load(&self) -> Result<(), ClientError> {
        let result = self.shared.api.list_tasks().await;
        let failure = result.as_ref().err().cloned();
        self.shared.apply(|s| s.finish_initial_load(result));
        match failure {
            Some(e) => {
                error!("Initial load failed: {e}");
                Err(e.into())
            },
            None => Ok(()),
        }
    }

    /// Initial load, then start refreshing every `period`
    ///
    /// The refresher is not started when the initial load fails.
    pub async fn mount(&mut self, period: Duration) -> Result<(), ClientError> {
        self.unmount().await;
        self.load().await?;
        self.refresher = Some(PeriodicRefresh::spawn(Arc::clone(&self.shared), period));
        info!("View mounted, refreshing every {}s", period.as_secs());
        Ok(())
    }

    /// Stop the periodic refresher and wait for it to finish
    pub async fn unmount(&mut self) {
        if let Some(refresher) = self.refresher.take() {
            refresher.stop().await;
            info!("View unmounted");
        }
    }

    // =========================================================================
    // ADD
    // =========================================================================

    /// Replace the add-draft text
    pub fn set_draft(&self, text: impl Into<String>) {
        let text = text.into();
        self.shared.apply(|s| s.set_draft(text));
    }

    /// Create a task from the draft, then re-fetch the whole list
    pub async fn add(&self) -> Result<(), ClientError> {
        let Some(text) = self.shared.begin(ViewState::begin_add).into_result()? else {
            debug!("Add already in flight");
            return Ok(());
        };
        let result = self.shared.create_then_list(&text).await.map_err(ClientError::from);
        let failure = result.as_ref().err().cloned();
        self.shared.apply(|s| s.finish_add(result));
        failure.map_or(Ok(()), Err)
    }

    /// Set the draft and submit it
    pub async fn submit(&self, text: impl Into<String>) -> Result<(), ClientError> {
        self.set_draft(text);
        self.add().await
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    /// Delete a task, then re-fetch the whole list
    pub async fn delete(&self, id: TaskId) -> Result<(), ClientError> {
        let Some(id) = self.shared.begin(|s| s.begin_delete(id)).into_result()? else {
            debug!("Delete already in flight");
            return Ok(());
        };
        let result = self.shared.delete_then_list(id).await.map_err(ClientError::from);
        let failure = result.as_ref().err().cloned();
        self.shared.apply(|s| s.finish_delete(result));
        failure.map_or(Ok(()), Err)
    }

    // =========================================================================
    // EDIT
    // =========================================================================

    /// Put a task into edit mode
    pub fn start_edit(&self, task: &Task) {
        self.shared.apply(|s| s.start_edit(task));
    }

    /// Put a cached task into edit mode by id
    ///
    /// An unknown id sets the visible error.
    pub fn start_edit_by_id(&self, id: TaskId) -> Result<(), ClientError> {
        self.shared.begin(|s| s.start_edit_by_id(id)).into_result().map(drop)
    }

    /// Replace the edit draft text
    pub fn set_edit_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.shared.apply(|s| s.set_edit_text(text));
    }

    /// Leave edit mode without any remote call
    pub fn cancel_edit(&self) {
        self.shared.apply(ViewState::cancel_edit);
    }

    /// Save the edit and patch the matching task locally
    pub async fn save_edit(&self) -> Result<(), ClientError> {
        let Some((id, text)) = self.shared.begin(ViewState::begin_save_edit).into_result()? else {
            debug!("Update already in flight");
            return Ok(());
        };
        let result = self.shared.api.update_task(id, &text).await.map_err(ClientError::from);
        let failure = result.as_ref().err().cloned();
        self.shared.apply(|s| s.finish_save_edit(id, &text, result));
        if failure.is_none() {
            info!("Updated task #{id}");
        }
        failure.map_or(Ok(()), Err)
    }

    // =========================================================================
    // REFRESH
    // =========================================================================

    /// Manually re-fetch the list; failures are shown
    pub async fn refresh(&self) -> Result<(), ClientError> {
        self.shared.refresh(RefreshKind::Manual).await
    }
}

impl<A: TaskApi + 'static> Drop for TaskView<A> {
    fn drop(&mut self) {
        if let Some(refresher) = self.refresher.take() {
            refresher.abort();
        }
    }
}

impl<A: TaskApi + 'static> fmt::Debug for TaskView<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskView")
            .field("state", &*self.shared.state.borrow())
            .field("mounted", &self.refresher.is_some())
            .finish_non_exhaustive()
    }
}
