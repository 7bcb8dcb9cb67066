//! Interactive chat loop
//!
//! Reads one line per turn, routes it, prints `Bot: <reply>` and carries the
//! returned session state into the next turn.

use crate::models::SessionState;
use crate::router::Router;
use crate::Result;
use std::borrow::Cow;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

pub const BANNER: &str = "Personal Finance Bot (type 'exit' to quit)";

pub const INPUT_HINT: &str = "Enter your spending details (Ex: I spent 1000 for house rent, \
     What is my total expenses, Give me 3 money saving tips), or 'exit' to quit:";

const EXIT_KEYWORDS: &[&str] = &["exit", "quit"];

/// True only for the exact exit keywords, ignoring case and surrounding blanks.
pub fn is_exit_command(line: &str) -> bool {
    let trimmed = line.trim();
    EXIT_KEYWORDS
        .iter()
        .any(|kw| trimmed.eq_ignore_ascii_case(kw))
}

/// Run a chat session until an exit keyword or end of input.
///
/// Returns the final session state.
pub async fn run_chat<R, W>(router: &Router, mut input: R, mut output: W) -> Result<SessionState>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut state = SessionState::new();
    let mut buf = Vec::new();

    info!(session_id = %state.session_id, "Starting Personal Finance Bot");
    output.write_all(format!("{}\n", BANNER).as_bytes()).await?;

    loop {
        output.write_all(format!("{}\n", INPUT_HINT).as_bytes()).await?;
        output.flush().await?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            info!(session_id = %state.session_id, "Input closed, ending session");
            break;
        }

        // Undecodable bytes are replaced, not fatal: the line is still a turn.
        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            warn!(session_id = %state.session_id, "Input line was not valid UTF-8");
        }

        let user_input = line.trim();
        if is_exit_command(user_input) {
            output.write_all(b"Goodbye!\n").await?;
            info!(session_id = %state.session_id, "User exited the chat");
            break;
        }

        debug!(session_id = %state.session_id, input = %user_input, "Processing user input");

        let outcome = router.step(&state, user_input).await;
        output
            .write_all(format!("Bot: {}\n", outcome.state.last_response).as_bytes())
            .await?;

        state = outcome.state;
    }

    output.flush().await?;
    Ok(state)
}
