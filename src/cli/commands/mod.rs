//! Command implementations

mod config_cmd;
mod probe;
mod shell;
mod tasks;
mod watch;

use std::time::Duration;

use tasklist::api::HttpTaskClient;
use tasklist::config::GlobalConfig;
use tasklist::output::{OutputMode, ViewResult};
use tasklist::view::{TaskView, ViewState};

pub use config_cmd::config_cmd;
pub use probe::probe;
pub use shell::shell;
pub use tasks::{add, delete, edit, list, refresh};
pub use watch::watch;

/// Settings shared by every command
#[derive(Debug)]
pub struct Context {
    /// Loaded (or default) config file
    pub config: GlobalConfig,
    /// Resolved base URL of the task service
    pub base_url: String,
    /// How to print results
    pub mode: OutputMode,
}

impl Context {
    /// Resolve config and base URL for this invocation
    pub fn new(api_url: Option<&str>, mode: OutputMode) -> Self {
        let config = GlobalConfig::load();
        let base_url = config.resolve_base_url(api_url);
        log::debug!("Using task service at {base_url}");
        Self {
            config,
            base_url,
            mode,
        }
    }

    /// HTTP client for the resolved base URL
    pub fn client(&self) -> HttpTaskClient {
        HttpTaskClient::new(self.base_url.as_str())
    }

    /// Fresh, unmounted view backed by the HTTP client
    pub fn view(&self) -> TaskView<HttpTaskClient> {
        TaskView::new(self.client())
    }

    /// Refresh interval: explicit seconds, else the configured one
    pub fn interval(&self, secs: Option<u64>) -> Duration {
        secs.map_or_else(|| self.config.refresh.interval(), Duration::from_secs)
    }
}

/// Print the view and exit non-zero if it ended with an error
fn finish(state: &ViewState, mode: OutputMode) -> anyhow::Result<()> {
    ViewResult::new(state).render(mode);
    if state.visible_error().is_some() {
        std::process::exit(1);
    }
    Ok(())
}
