//! CLI definitions and entry point

use clap::{Parser, Subcommand};

use super::commands;
use tasklist::output::OutputMode;

/// tasklist - a to-do client for a remote task service
#[derive(Parser, Debug)]
#[command(
    name = "tasklist",
    version,
    about = "A to-do client for a remote task service",
    long_about = "List, create, edit and delete tasks stored by a remote task service.\n\n\
                  The service is reached at --api-url, $TASKLIST_API_URL, the configured\n\
                  base URL, or http://localhost:8000, in that order."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Base URL of the task service
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all tasks
    List,

    /// Add a task
    Add {
        /// Task text
        text: String,
    },

    /// Replace a task's text
    Edit {
        /// Task ID
        id: i64,

        /// New text
        text: String,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },

    /// Re-fetch the task list
    Refresh,

    /// Keep the list on screen, re-rendering on every refresh
    Watch {
        /// Seconds between refreshes (defaults to the configured interval)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Interactive session (type `help` inside for commands)
    Shell {
        /// Seconds between background refreshes
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Report the HTTP status of every known endpoint
    Probe,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved configuration
    Show,

    /// Store the base URL of the task service
    SetUrl {
        /// Base URL, e.g. http://localhost:8000
        url: String,
    },

    /// Store the periodic refresh interval
    SetInterval {
        /// Seconds between refreshes
        secs: u64,
    },
}

/// Run the CLI
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let ctx = commands::Context::new(cli.api_url.as_deref(), output_mode);

    match cli.command {
        Some(Command::List) => commands::list(&ctx).await,
        Some(Command::Add { text }) => commands::add(&ctx, &text).await,
        Some(Command::Edit { id, text }) => commands::edit(&ctx, id, &text).await,
        Some(Command::Delete { id }) => commands::delete(&ctx, id).await,
        Some(Command::Refresh) => commands::refresh(&ctx).await,
        Some(Command::Watch { interval }) => commands::watch(&ctx, interval).await,
        Some(Command::Shell { interval }) => commands::shell(&ctx, interval).await,
        Some(Command::Probe) => commands::probe(&ctx).await,
        Some(Command::Config { action }) => commands::config_cmd(&ctx, action),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("tasklist v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("tasklist v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'tasklist --help' for usage");
                println!("Run 'tasklist list' to see your tasks");
            }
            Ok(())
        },
    }
}
