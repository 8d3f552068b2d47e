//! DocIQ command line client
//!
//! Uploads contracts for risk analysis, browses the document history and
//! applies suggested rewrites to risky clauses.

mod commands;
mod render;

use analysis_client::{ClientConfig, HttpAnalysisClient};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use commands::{RewriteOptions, Source};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "dociq")]
#[command(version, about = "Contract risk review from the terminal")]
struct Args {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config and DOCIQ_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token (overrides config and DOCIQ_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Fail instead of retrying on the demo endpoints after a 401
    #[arg(long, global = true)]
    no_demo_fallback: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a PDF, DOCX or TXT file, or pasted text
    Analyze {
        /// Document to upload
        path: Option<PathBuf>,

        /// Analyze this text instead of a file
        #[arg(long, conflicts_with = "path")]
        text: Option<String>,

        /// Highlight risk N (1-based) in the output
        #[arg(long)]
        select: Option<usize>,
    },

    /// List previously analyzed documents
    History,

    /// Show a stored document with its highlights
    Open {
        id: i64,

        /// Select risk N (1-based) and show its suggestions
        #[arg(long)]
        select: Option<usize>,
    },

    /// Replace a risky clause with one of its suggestions
    Rewrite {
        id: i64,

        /// Risk number (1-based)
        risk: usize,

        /// Which suggestion to apply (1-3)
        #[arg(long, default_value = "1")]
        suggestion: usize,

        /// Use this replacement text instead of a suggestion
        #[arg(long, conflicts_with = "suggestion")]
        text: Option<String>,

        /// Save the edited text back to the history
        #[arg(long)]
        save: bool,

        /// Export path for the edited text
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn client_config(args: &Args) -> Result<ClientConfig> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    }
    .with_env_overrides();

    if let Some(url) = &args.api_url {
        config.base_url = url.clone();
    }
    if let Some(token) = &args.token {
        config.token = Some(token.clone());
    }
    if args.no_demo_fallback {
        config.demo_fallback = false;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // stdout carries the report; logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = client_config(&args)?;
    tracing::debug!(base_url = %config.base_url, "using backend");
    let client = HttpAnalysisClient::new(config).context("Invalid client configuration")?;

    match args.command {
        Command::Analyze { path, text, select } => {
            let source = match (path, text) {
                (Some(path), None) => Source::File(path),
                (None, Some(text)) => Source::Text(text),
                _ => bail!("Provide a file to upload or --text"),
            };
            commands::analyze(&client, source, select).await
        }
        Command::History => commands::history(&client).await,
        Command::Open { id, select } => commands::open(&client, id, select).await,
        Command::Rewrite {
            id,
            risk,
            suggestion,
            text,
            save,
            output,
        } => {
            let options = RewriteOptions {
                id,
                risk,
                suggestion,
                text,
                save,
                output,
            };
            commands::rewrite(&client, options).await
        }
    }
}
