//! One-shot task commands
//!
//! Each command drives a fresh view through a single action and prints the
//! resulting state. Commands that need the cached list first (list, edit)
//! start with the initial load, which is fatal on failure as it is for a
//! mounted view. Add and delete re-fetch the list themselves.

use super::{Context, finish};

/// List all tasks
pub async fn list(ctx: &Context) -> anyhow::Result<()> {
    let view = ctx.view();
    // Failures land in the view state that `finish` renders.
    let _ = view.load().await;
    finish(&view.snapshot(), ctx.mode)
}

/// Add a task, then show the re-fetched list
pub async fn add(ctx: &Context, text: &str) -> anyhow::Result<()> {
    let view = ctx.view();
    // Failures land in the view state that `finish` renders.
    let _ = view.submit(text).await;
    finish(&view.snapshot(), ctx.mode)
}

/// Replace a task's text
pub async fn edit(ctx: &Context, id: i64, text: &str) -> anyhow::Result<()> {
    let view = ctx.view();
    if view.load().await.is_ok() && view.start_edit_by_id(id).is_ok() {
        view.set_edit_text(text);
        // Failures land in the view state that `finish` renders.
        let _ = view.save_edit().await;
    }
    finish(&view.snapshot(), ctx.mode)
}

/// Delete a task, then show the re-fetched list
pub async fn delete(ctx: &Context, id: i64) -> anyhow::Result<()> {
    let view = ctx.view();
    // Failures land in the view state that `finish` renders.
    let _ = view.delete(id).await;
    finish(&view.snapshot(), ctx.mode)
}

/// Manual refresh; a failure is shown but is not fatal
pub async fn refresh(ctx: &Context) -> anyhow::Result<()> {
    let view = ctx.view();
    // Failures land in the view state that `finish` renders.
    let _ = view.refresh().await;
    finish(&view.snapshot(), ctx.mode)
}
