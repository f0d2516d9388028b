use super::HandlerContext;
use crate::presentation::print_json;
use crate::presentation::views::ChatEntryView;
use anyhow::Result;
use bisoshi_api::Transport;
use bisoshi_sdk::Client;
use is_terminal::IsTerminal;
use std::io::{self, BufRead, Write};

pub async fn handle<T: Transport + Clone>(
    client: &Client<T>,
    question: Option<String>,
    ctx: &HandlerContext,
) -> Result<()> {
    let mut chat = client.chat();
    if !chat.is_online() {
        log::info!("[CHAT] no chatbot endpoint configured, using canned replies");
    }

    if let Some(question) = question {
        if chat.ask(&question).await.is_none() {
            anyhow::bail!("question is empty");
        }
        if ctx.is_json() {
            print_json(&chat.history())?;
        } else if let Some(answer) = chat.history().last() {
            println!("{}", answer.text);
        }
        return Ok(());
    }

    let interactive = io::stdin().is_terminal();
    if interactive {
        eprintln!("Ask a question (empty line skips, 'exit' quits).");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            eprint!("> ");
            io::stderr().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }
        if let Some(answer) = chat.ask(&line).await
            && !ctx.is_json()
        {
            println!(
                "{}",
                ChatEntryView {
                    entry: answer,
                    palette: ctx.palette,
                }
            );
        }
    }

    if ctx.is_json() {
        print_json(&chat.history())?;
    }
    Ok(())
}
