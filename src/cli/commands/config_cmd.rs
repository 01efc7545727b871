//! Config command - show or change stored settings

use tasklist::config::{API_URL_ENV, GlobalConfig};
use tasklist::output::{OperationResult, OutputMode};

use super::Context;
use crate::cli::app::ConfigAction;

/// Handle config subcommands
pub fn config_cmd(ctx: &Context, action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            show(ctx);
            Ok(())
        },
        ConfigAction::SetUrl { url } => {
            let mut config = ctx.config.clone();
            config.set_base_url(&url)?;
            config.save()?;
            OperationResult {
                success: true,
                message: format!(
                    "Base URL set to {}",
                    config.api.base_url.as_deref().unwrap_or_default()
                ),
            }
            .render(ctx.mode);
            Ok(())
        },
        ConfigAction::SetInterval { secs } => {
            let mut config = ctx.config.clone();
            config.set_interval_secs(secs)?;
            config.save()?;
            OperationResult {
                success: true,
                message: format!("Refresh interval set to {secs}s"),
            }
            .render(ctx.mode);
            Ok(())
        },
    }
}

fn show(ctx: &Context) {
    let path = GlobalConfig::config_path();
    if ctx.mode == OutputMode::Json {
        println!(
            "{}",
            serde_json::json!({
                "config_path": path,
                "base_url": ctx.base_url,
                "stored_base_url": ctx.config.api.base_url,
                "interval_secs": ctx.config.refresh.interval_secs,
            })
        );
    } else {
        println!("Config file:      {}", path.display());
        println!("Base URL:         {}", ctx.base_url);
        println!(
            "Stored base URL:  {}",
            ctx.config.api.base_url.as_deref().unwrap_or("(not set)")
        );
        println!("Refresh interval: {}s", ctx.config.refresh.interval_secs);
        println!("\nOverride with --api-url or ${API_URL_ENV}.");
    }
}
