//! Interactive session
//!
//! Mounts the view (initial load plus background refresh), then reads one
//! action per line from stdin. The list is re-rendered after every action
//! and whenever a background refresh changes it.

use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};

use tasklist::api::HttpTaskClient;
use tasklist::output::{OutputMode, ViewResult};
use tasklist::view::{TaskView, ViewState};

use super::{Context, finish};

const HELP: &str = "\
Commands:
  add <text>         create a task
  edit <id> [text]   start editing a task (optionally setting the new text)
  text <text>        replace the text being edited
  save               save the edit
  cancel             leave edit mode
  rm <id>            delete a task
  refresh            re-fetch the list
  list               show the list again
  help               show this help
  quit               leave the session";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Add(String),
    Edit(i64, Option<String>),
    Text(String),
    Save,
    Cancel,
    Delete(i64),
    Refresh,
    List,
    Help,
    Quit,
    Empty,
}

fn parse_id(arg: &str) -> Result<i64, String> {
    arg.trim()
        .parse()
        .map_err(|_| format!("Invalid task id: '{}'", arg.trim()))
}

/// Parse one line of input
fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match word {
        "" => Ok(ShellCommand::Empty),
        "add" | "a" => Ok(ShellCommand::Add(rest.to_string())),
        "edit" | "e" => {
            let (id, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let text = text.trim();
            Ok(ShellCommand::Edit(
                parse_id(id)?,
                (!text.is_empty()).then(|| text.to_string()),
            ))
        },
        "text" | "t" => Ok(ShellCommand::Text(rest.to_string())),
        "save" | "s" => Ok(ShellCommand::Save),
        "cancel" | "c" => Ok(ShellCommand::Cancel),
        "rm" | "delete" | "del" => Ok(ShellCommand::Delete(parse_id(rest)?)),
        "refresh" | "r" => Ok(ShellCommand::Refresh),
        "list" | "ls" => Ok(ShellCommand::List),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("Unknown command '{other}'. Type 'help' for commands.")),
    }
}

/// Run the interactive session
pub async fn shell(ctx: &Context, interval: Option<u64>) -> anyhow::Result<()> {
    let mut view = ctx.view();
    if view.mount(ctx.interval(interval)).await.is_err() {
        return finish(&view.snapshot(), ctx.mode);
    }

    let mut updates = view.subscribe();
    let mut shown = view.snapshot();
    render(&shown, ctx.mode);
    if ctx.mode == OutputMode::Human {
        println!("\nType 'help' for commands.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    Ok(ShellCommand::Quit) => break,
                    Ok(ShellCommand::Empty) => {},
                    Ok(ShellCommand::Help) => println!("{HELP}"),
                    Ok(command) => {
                        dispatch(&view, command).await;
                        shown = view.snapshot();
                        render(&shown, ctx.mode);
                    },
                    Err(message) => eprintln!("{message}"),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = updates.borrow_and_update().clone();
                if current.tasks != shown.tasks {
                    render(&current, ctx.mode);
                    shown = current;
                }
            }
        }
    }

    view.unmount().await;
    info!("Session closed");
    Ok(())
}

/// Apply one action; failures end up in the view state
async fn dispatch(view: &TaskView<HttpTaskClient>, command: ShellCommand) {
    let result = match command {
        ShellCommand::Add(text) => view.submit(text).await,
        ShellCommand::Edit(id, text) => view.start_edit_by_id(id).map(|()| {
            if let Some(text) = text {
                view.set_edit_text(text);
            }
        }),
        ShellCommand::Text(text) => {
            view.set_edit_text(text);
            Ok(())
        },
        ShellCommand::Save => view.save_edit().await,
        ShellCommand::Cancel => {
            view.cancel_edit();
            Ok(())
        },
        ShellCommand::Delete(id) => view.delete(id).await,
        ShellCommand::Refresh => view.refresh().await,
        ShellCommand::List | ShellCommand::Help | ShellCommand::Quit | ShellCommand::Empty => {
            Ok(())
        },
    };
    if let Err(e) = result {
        log::debug!("Action failed: {e}");
    }
}

fn render(state: &ViewState, mode: OutputMode) {
    ViewResult::new(state).render(mode);
}
