//! The interactive chat session.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use confab_core::{run_turn, Conversation, TurnEnding};
use confab_openai::ChatClient;

use crate::console::{self, TermRenderer};
use crate::settings;

/// Run the session loop until the user quits.
///
/// Ctrl-C while a reply is streaming cancels just that turn; Ctrl-C at the
/// prompt (or EOF, or `exit`/`quit`) ends the session with a farewell.
/// Either way the exit is graceful and the conversation keeps every partial
/// reply, so a cancelled turn never breaks the context of the next one.
pub async fn run() -> Result<()> {
    console::print_banner();

    let config = match settings::load_client_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            settings::print_credentials_hint();
            return Ok(());
        }
    };

    let model = config.model.clone();
    let client = ChatClient::new(config);
    let mut conversation = match std::env::var("SYSTEM_PROMPT") {
        Ok(prompt) if !prompt.trim().is_empty() => Conversation::with_system(prompt),
        _ => Conversation::new(),
    };

    println!("Confab (model: {model}) is ready! Type 'exit' or 'quit' to end.");
    println!("{}", "-".repeat(50));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let Some(line) = read_prompt(&mut lines).await? else {
            console::print_farewell();
            break;
        };
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            console::print_farewell();
            break;
        }

        let cancel = CancellationToken::new();
        let watcher = tokio::spawn({
            let cancel = cancel.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            }
        });

        let mut renderer = TermRenderer::new();
        let outcome = run_turn(&client, &mut conversation, input, &mut renderer, &cancel).await;
        watcher.abort();
        println!();

        match outcome.ending {
            TurnEnding::Completed => {
                debug!(turns = conversation.turns(), "turn completed");
            }
            TurnEnding::Cancelled => println!("(cancelled)"),
            TurnEnding::Failed(err) => eprintln!("Error: {err}"),
        }
    }

    Ok(())
}

/// Show the input prompt and wait for a line, Ctrl-C or EOF.
///
/// Returns `None` when the session should end.
async fn read_prompt(lines: &mut Lines<BufReader<Stdin>>) -> Result<Option<String>> {
    use std::io::Write;

    print!("You > ");
    std::io::stdout().flush()?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            println!();
            Ok(None)
        }
        line = lines.next_line() => Ok(line?),
    }
}
