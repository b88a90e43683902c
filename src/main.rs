//! `license-report-check` — classify the dependencies listed in a
//! `license-report` JSON document against allowed and forbidden license lists.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load and resolve configuration ([`config::load_config`], [`config::resolve`]).
//! 3. Stream the report from a file or stdin into the classifier ([`pipeline::run`]).
//! 4. Render the result as json, csv or table ([`report::render`]).
//! 5. Exit with `2 | 4 | 8` for non-empty not-allowed / forbidden / unknown
//!    buckets ([`models::ClassificationResult::exit_code`]), `0` when clean and
//!    `1` on any error.

mod cli;
mod config;
mod error;
mod license;
mod models;
mod pipeline;
mod report;
mod source;

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::{load_config, resolve};

/// Exit code for configuration, input and usage errors. Classification exit
/// codes only ever set bits 1 to 3, so this cannot be mistaken for one.
const ERROR_EXIT_CODE: i32 = 1;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { ERROR_EXIT_CODE } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    init_tracing();

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            std::process::exit(ERROR_EXIT_CODE);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let base_dir = std::env::current_dir().context("failed to determine current directory")?;
    let config = load_config(&base_dir, cli.config.as_deref())?;
    let settings = resolve(config, &cli)?;
    tracing::debug!(?settings, "resolved settings");

    let result = pipeline::run(settings.source, settings.policy).await?;

    let rendered = report::render(&result, &settings.output).context("failed to render result")?;
    println!("{}", rendered);

    if settings.summary {
        eprintln!("{}", report::summary::render(&result, &settings.output.classifications));
    }

    let code = result.exit_code();
    tracing::info!(
        not_allowed = result.bucket(models::Bucket::NotAllowed).len(),
        forbidden = result.bucket(models::Bucket::Forbidden).len(),
        unknown = result.bucket(models::Bucket::Unknown).len(),
        exit_code = code,
        "license check finished"
    );
    Ok(code)
}

/// Log to stderr so stdout only carries the rendered report. `RUST_LOG`
/// overrides the default `warn` level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}
