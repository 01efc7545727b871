//! Watch command - keep the list on screen while it refreshes

use log::info;
use tasklist::output::{OutputMode, ViewResult};
use tasklist::view::ViewState;

use super::{Context, finish};

/// Mount the view and re-render whenever the list or the error changes
pub async fn watch(ctx: &Context, interval: Option<u64>) -> anyhow::Result<()> {
    let period = ctx.interval(interval);
    let mut view = ctx.view();

    if view.mount(period).await.is_err() {
        return finish(&view.snapshot(), ctx.mode);
    }

    let mut updates = view.subscribe();
    let mut shown = view.snapshot();
    render(&shown, ctx.mode);
    if ctx.mode == OutputMode::Human {
        println!("\nRefreshing every {}s. Press Ctrl+C to stop.", period.as_secs());
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = updates.borrow_and_update().clone();
                if needs_render(&shown, &current) {
                    render(&current, ctx.mode);
                    shown = current;
                }
            }
        }
    }

    view.unmount().await;
    info!("Stopped watching");
    Ok(())
}

/// Only list, error, or refresh-time changes are worth a redraw
fn needs_render(shown: &ViewState, current: &ViewState) -> bool {
    shown.tasks != current.tasks
        || shown.error != current.error
        || shown.refreshed_at != current.refreshed_at
}

fn render(state: &ViewState, mode: OutputMode) {
    if mode == OutputMode::Human {
        if let Some(at) = state.refreshed_at {
            println!("\n--- {} ---", at.format("%H:%M:%S"));
        }
    }
    ViewResult::new(state).render(mode);
}
