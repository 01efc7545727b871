//! Task view: client-side state synchronized with the remote service
//!
//! - [`state`] - the [`ViewState`] value and its pure transitions
//! - [`TaskView`] - drives the API for each action and owns the periodic
//!   refresher for the lifetime of a mounted view
//!
//! ## Synchronization rules
//!
//! - add and delete re-fetch the whole list on success
//! - a saved edit patches only the matching task locally
//! - refreshes replace the whole list; the last response applied wins
//! - periodic refresh failures are logged, never shown

mod controller;
mod refresher;
pub mod state;

pub use controller::TaskView;
pub use refresher::MIN_PERIOD;
pub use state::{
    Begin, EMPTY_DRAFT_MESSAGE, EditDraft, NOT_EDITING_MESSAGE, RefreshKind, UiState, ViewState,
};

/// Default interval between periodic refreshes
pub const DEFAULT_REFRESH_INTERVAL: std::time::Duration = std::time::Duration::from_secs(30);
