//! Credential loading and the `confab config` command.

use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use confab_core::ChatError;
use confab_openai::{ClientConfig, ClientConfigBuilder, DEFAULT_MODEL};

/// Load and validate the client configuration from the environment.
///
/// The `.env` file (if any) has already been loaded by `main`. A missing
/// credential aborts starting the session, not the process — callers print
/// the hint and return to the shell.
pub fn load_client_config() -> Result<ClientConfig, ChatError> {
    ClientConfigBuilder::from_env().build()
}

/// Printed when credentials are missing so the user knows where to put them.
pub fn print_credentials_hint() {
    eprintln!("Please create a .env file with your API credentials, e.g.");
    eprintln!("    API_KEY=sk-...");
    eprintln!("    API_BASE_URL=https://api.openai.com/v1");
    eprintln!("    MODEL_NAME={DEFAULT_MODEL}");
    eprintln!("or run `confab config` to create one interactively.");
}

/// Interactively collect credentials and write them to `.env`.
pub fn configure() -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let key = prompt(&mut lines, "API Key", None)?;
    let url = prompt(&mut lines, "API Base URL", None)?;
    let model = prompt(&mut lines, "Model Name", Some(DEFAULT_MODEL))?;

    fs::write(".env", env_file_contents(&key, &url, &model)).context("writing .env file")?;
    println!("Configuration saved to .env");
    Ok(())
}

fn prompt<B: BufRead>(
    lines: &mut io::Lines<B>,
    label: &str,
    default: Option<&str>,
) -> Result<String> {
    match default {
        Some(d) => print!("{label} [{d}]: "),
        None => print!("{label}: "),
    }
    io::stdout().flush()?;

    let answer = lines
        .next()
        .transpose()
        .context("reading stdin")?
        .unwrap_or_default();
    let answer = answer.trim();

    if answer.is_empty() {
        match default {
            Some(d) => Ok(d.to_owned()),
            // Re-prompting would loop forever on a closed stdin.
            None => anyhow::bail!("{label} must not be empty"),
        }
    } else {
        Ok(answer.to_owned())
    }
}

fn env_file_contents(key: &str, url: &str, model: &str) -> String {
    format!("API_KEY={key}\nAPI_BASE_URL={url}\nMODEL_NAME={model}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_file_has_one_assignment_per_line() {
        let contents = env_file_contents("sk-x", "https://api.example.com/v1", "gpt-3.5-turbo");
        assert_eq!(
            contents,
            "API_KEY=sk-x\nAPI_BASE_URL=https://api.example.com/v1\nMODEL_NAME=gpt-3.5-turbo\n"
        );
    }
}
