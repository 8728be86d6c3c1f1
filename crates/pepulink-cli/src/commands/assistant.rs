//! Assistant commands (one-shot ask and interactive chat)

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use pepulink_core::{Assistant, SpendingAnalysis};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::Session;

pub fn cmd_ask(session: &Session, message: &str, json: bool) -> Result<()> {
    let assistant = Assistant::new(session.config.assistant.clone());
    let response = assistant.respond(message, &session.analysis());

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("🤖 {}", response.text);
    }

    Ok(())
}

pub async fn cmd_chat(session: &Session, think_ms: u64) -> Result<()> {
    println!("🤖 PEPULink assistant. Ask about your spending, or type 'quit' to leave.");

    let stdin = BufReader::new(tokio::io::stdin());
    let replies = chat_loop(session, stdin, think_ms).await?;

    println!();
    println!("👋 Bye! ({} replies)", replies);
    Ok(())
}

/// Answer one message per input line until EOF or `quit`/`exit`
///
/// Returns the number of replies given.
pub async fn chat_loop<R>(session: &Session, mut input: R, think_ms: u64) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let assistant = Assistant::new(session.config.assistant.clone());
    let analysis: SpendingAnalysis = session.analysis();
    let mut replies = 0;
    let mut line = String::new();

    loop {
        print!("you> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .await
            .context("Failed to read input")?;
        if read == 0 {
            break;
        }

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("quit") || message.eq_ignore_ascii_case("exit") {
            break;
        }

        if think_ms > 0 {
            println!("   🤔 thinking...");
            tokio::time::sleep(Duration::from_millis(think_ms)).await;
        }

        let response = assistant.respond(message, &analysis);
        println!("🤖 {}", response.text);
        println!();
        replies += 1;
    }

    Ok(replies)
}
