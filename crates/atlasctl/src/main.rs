//! Atlas Control - CLI for the country-info agent.
//!
//! Asks three expert resolvers (capital, language, population) about a
//! country and prints one synthesized sentence.

mod errors;

use anyhow::{Context, Result};
use atlas_common::{AtlasConfig, FinalAnswer, HttpCompletionClient, Pipeline, PipelineError, Subject};
use clap::Parser;
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "atlasctl")]
#[command(about = "Atlas - country information agent", long_about = None)]
#[command(version)]
struct Cli {
    /// Country to look up; prompts interactively when omitted
    subject: Option<String>,

    /// Per-request timeout in seconds (overrides config)
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match AtlasConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}  {:#}", "✗".red(), e);
            std::process::exit(errors::EXIT_GENERAL_ERROR);
        }
    };
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    if config.requires_api_key() && config.api_key.is_none() {
        eprintln!(
            "{}  No API key configured. Set ATLAS_API_KEY or add api_key to ~/.config/atlas/config.toml.",
            "✗".red()
        );
        std::process::exit(errors::EXIT_MISSING_CREDENTIALS);
    }

    match run(&cli, &config).await {
        Ok(()) => std::process::exit(errors::EXIT_SUCCESS),
        Err(e) => {
            eprintln!("{}  {:#}", "✗".red(), e);
            std::process::exit(errors::EXIT_GENERAL_ERROR);
        }
    }
}

async fn run(cli: &Cli, config: &AtlasConfig) -> Result<()> {
    let raw_subject = match &cli.subject {
        Some(subject) => subject.clone(),
        None => prompt_subject()?,
    };

    let subject = match Subject::parse(&raw_subject) {
        Ok(subject) => subject,
        Err(PipelineError::InvalidSubject) => {
            // Still a handled outcome: one error line, success exit.
            println!("{}", "Please enter a country name.".yellow());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!(
        "Using backend {} with model {} (timeout {}s)",
        config.endpoint,
        config.model,
        config.timeout_secs
    );

    let client = HttpCompletionClient::new(config).context("Failed to build backend client")?;
    let pipeline = Pipeline::new(Arc::new(client));

    match pipeline.run(&subject).await {
        Ok(answer) => {
            print_answer(&answer);
            Ok(())
        }
        Err(PipelineError::Aborted) => {
            println!("{}", "The lookup was cancelled before it finished.".yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Interactive prompt when no subject was given on the command line.
fn prompt_subject() -> Result<String> {
    println!("{}", "Welcome to the Atlas country info agent".bright_white().bold());
    print!("Enter country name: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read country name")?;
    Ok(line)
}

fn print_answer(answer: &FinalAnswer) {
    println!();
    println!("{}", answer.text);
    if answer.degraded {
        println!();
        println!(
            "{}",
            "Some sources were unavailable; this answer may be incomplete.".dimmed()
        );
    }
}
