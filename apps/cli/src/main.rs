use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{GenerationError, GenerationSession, HttpGenerationService};
use shared::domain::{MaxIterations, Tone, TweetLength};
use tokio::io::{self, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod clipboard;
mod config;
mod interactive;
mod render;

use clipboard::SystemClipboard;
use config::{load_settings, Settings, DEFAULT_CONFIG_PATH};
use render::{render_health, render_view};

#[derive(Parser, Debug)]
#[command(name = "tweetgen", about = "Generate and refine tweets through the generation service")]
struct Args {
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit one request and print the result.
    Generate(GenerateArgs),
    /// Query the service health endpoint.
    Health,
    /// Keep a session open and read topics and commands from stdin.
    Interactive,
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    #[arg(long)]
    topic: String,
    #[arg(long)]
    tone: Option<Tone>,
    #[arg(long)]
    length: Option<TweetLength>,
    #[arg(long)]
    max_iterations: Option<MaxIterations>,
    #[arg(long)]
    uncensored: bool,
    /// Copy the generated tweet to the clipboard.
    #[arg(long)]
    copy: bool,
    /// Print the raw result as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.timeout_secs = timeout_secs;
    }
    let session = build_session(&settings)?;

    match args.command {
        Command::Generate(generate) => run_generate(&session, &settings, generate).await,
        Command::Health => {
            let health = session
                .health()
                .await
                .with_context(|| format!("health check against {} failed", settings.server_url))?;
            print!("{}", render_health(&health));
            Ok(())
        }
        Command::Interactive => {
            let defaults = settings.default_params();
            session.update_params(|params| *params = defaults).await;
            interactive::run(&session, BufReader::new(io::stdin()), io::stdout()).await
        }
    }
}

fn build_session(settings: &Settings) -> Result<Arc<GenerationSession>> {
    let service = HttpGenerationService::new(&settings.server_url, settings.request_timeout())
        .context("failed to configure generation service")?;
    info!(
        server_url = %service.base_url(),
        timeout_secs = settings.timeout_secs,
        "generation service configured"
    );
    Ok(GenerationSession::new_with_clipboard(
        Arc::new(service),
        Arc::new(SystemClipboard),
    ))
}

async fn run_generate(
    session: &GenerationSession,
    settings: &Settings,
    args: GenerateArgs,
) -> Result<()> {
    let mut params = settings.default_params();
    params.topic = args.topic;
    if let Some(tone) = args.tone {
        params.tone = tone;
    }
    if let Some(length) = args.length {
        params.length = length;
    }
    if let Some(max_iterations) = args.max_iterations {
        params.max_iterations = max_iterations;
    }
    params.uncensored |= args.uncensored;

    match session.submit(params).await {
        Ok(result) => {
            let copied = args.copy && session.copy_current_tweet().await;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_view(&session.view().await));
            }
            if args.copy && !copied {
                eprintln!("clipboard unavailable; tweet not copied");
            }
            Ok(())
        }
        Err(GenerationError::Validation(err)) => bail!("{err}"),
        Err(err) => bail!("{}", err.banner_message()),
    }
}

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
