//! Interactive chat loop

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::assistant::{TravelAssistant, reply_guarded};

const BANNER: &str = "TourGuide is ready! Ask about a destination, or type 'exit' to quit.\n";
const GOODBYE: &str = "AI: Goodbye! Have a nice trip.";

fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}

/// Read one question per line until `exit`, `quit` or end of input
pub async fn run<R, W>(assistant: Arc<TravelAssistant>, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(format!("{BANNER}\n").as_bytes()).await?;

    let mut lines = input.lines();
    loop {
        output.write_all(b"You: ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            output.write_all(b"\n").await?;
            break;
        };

        if is_exit_command(&line) {
            break;
        }

        let reply = reply_guarded(assistant.clone(), line).await;
        output.write_all(format!("AI: {reply}\n").as_bytes()).await?;
    }

    output.write_all(format!("{GOODBYE}\n").as_bytes()).await?;
    output.flush().await?;
    Ok(())
}
