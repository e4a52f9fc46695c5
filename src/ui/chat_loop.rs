//! Line-oriented chat loop.
//!
//! Reads one line at a time, routes local commands, and hands everything else
//! to the session. Each submission is awaited before the next line is read,
//! so there is never more than one request in flight.

use crate::api::transport::Transport;
use crate::commands::{is_confirmation, process_input, CommandResult, HELP_TEXT};
use crate::core::chat::ChatSession;
use crate::core::storage::Storage;
use crate::ui::presenter::Presenter;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

pub const WELCOME: &str =
    "👨‍🍳 ChefBot is in the kitchen. Ask about recipes, techniques or menus. Type `help` for commands.";
pub const CLEAR_PROMPT: &str =
    "Are you sure you want to clear the chat history? This will delete all recipe memories. (y/N) ";
pub const CLEARED: &str = "The slate is clean. What shall we cook?";

/// Runs until `quit`/`exit` or end of input. `out` receives prompts and
/// notices; conversation turns go through `presenter`.
pub async fn run_chat<S, T, P, R, W>(
    session: &mut ChatSession<S, T>,
    presenter: &mut P,
    input: R,
    out: &mut W,
) -> io::Result<()>
where
    S: Storage,
    T: Transport,
    P: Presenter + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write + ?Sized,
{
    writeln!(out, "{WELCOME}")?;
    writeln!(out)?;
    session.replay(presenter);

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match process_input(&line) {
            CommandResult::Quit => break,
            CommandResult::Help => {
                writeln!(out, "{HELP_TEXT}")?;
                writeln!(out)?;
            }
            CommandResult::Clear => {
                write!(out, "{CLEAR_PROMPT}")?;
                out.flush()?;
                let answer = lines.next_line().await?.unwrap_or_default();
                if is_confirmation(&answer) {
                    session.clear();
                    info!("Chat history cleared by user");
                    writeln!(out, "{CLEARED}")?;
                }
                writeln!(out)?;
            }
            CommandResult::ProcessAsMessage(text) => {
                session.submit(&text, presenter).await;
            }
        }
    }

    Ok(())
}
