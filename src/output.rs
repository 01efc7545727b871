//! Output formatting for human and JSON modes
//!
//! Everything the CLI prints goes through here, so the same view can be
//! rendered as human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::api::EndpointProbe;
use crate::view::ViewState;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Heading printed above the list
pub const TITLE: &str = "Project ToDo";

/// Shown instead of the list when it is empty
pub const EMPTY_LIST_MESSAGE: &str = "The task list is empty. Add your first task!";

/// Render the whole view as human-readable text
///
/// A fatal error replaces everything else, like the error screen it stands
/// for.
#[must_use]
pub fn render_view(state: &ViewState) -> String {
    if let Some(fatal) = &state.fatal {
        return format!("{} {fatal}\n", "Error:".red().bold());
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n", TITLE.bold()));

    if let Some(error) = &state.error {
        out.push_str(&format!("{} {error}\n", "Error:".red().bold()));
    }

    let busy = busy_labels(state);
    if !busy.is_empty() {
        out.push_str(&format!("{}\n", busy.join(" ").dimmed()));
    }

    out.push('\n');
    if state.tasks.is_empty() {
        out.push_str(&format!("  {EMPTY_LIST_MESSAGE}\n"));
        return out;
    }

    for task in &state.tasks {
        match &state.ui.editing {
            Some(editing) if editing.id == task.id => {
                out.push_str(&format!(
                    "  {} {} {}\n",
                    format!("#{}", task.id).cyan(),
                    editing.text,
                    "(editing)".yellow()
                ));
            },
            _ => {
                out.push_str(&format!("  {} {}\n", format!("#{}", task.id).cyan(), task.text));
            },
        }
    }
    out
}

fn busy_labels(state: &ViewState) -> Vec<&'static str> {
    let ui = &state.ui;
    [
        (ui.is_adding, "[adding]"),
        (ui.is_deleting, "[deleting]"),
        (ui.is_updating, "[saving]"),
        (ui.is_refreshing, "[refreshing]"),
    ]
    .into_iter()
    .filter_map(|(on, label)| on.then_some(label))
    .collect()
}

/// Result of a view-producing command
#[derive(Debug, Serialize)]
pub struct ViewResult<'a> {
    /// Whether the view ended without an error
    pub success: bool,
    /// Number of tasks shown
    pub total: usize,
    /// The view itself
    pub view: &'a ViewState,
}

impl<'a> ViewResult<'a> {
    /// Wrap a state for rendering
    #[must_use]
    pub fn new(view: &'a ViewState) -> Self {
        Self {
            success: view.visible_error().is_none(),
            total: view.tasks.len(),
            view,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", render_view(self.view)),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

/// Result of an endpoint probe
#[derive(Debug, Serialize)]
pub struct ProbeResult {
    /// Base URL that was probed
    pub base_url: String,
    /// One entry per endpoint
    pub endpoints: Vec<EndpointProbe>,
}

impl ProbeResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }

    fn render_human(&self) {
        println!("Probing endpoints at {}...\n", self.base_url);
        for probe in &self.endpoints {
            match (probe.status, &probe.error) {
                (Some(status), _) => println!("  {} {}: {status}", "ok".green(), probe.url),
                (None, Some(error)) => println!("  {} {}: {error}", "down".red(), probe.url),
                (None, None) => println!("  {} {}", "down".red(), probe.url),
            }
        }
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
