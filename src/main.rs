//! CLI entry point for the ripper tool.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use ripper_core::engine::{AutoAbort, AutoConfirm, StdinPrompt};
use ripper_core::service::{SearchKind, Searcher};
use ripper_core::{
    ConsoleInput, Dispatcher, PathProbe, RetryController, RetryPrompt, RunConfig, RunContext,
    RunOutcome, ServiceClient, build_batch, resolve_token,
};
use tracing::{debug, info};

mod cli;
mod prompt;

use cli::{Args, OnErrorArg};

fn print_usage() {
    eprintln!("Usage: ripper [options] [url1 url2 ...]");
    eprintln!("Search Usage: ripper --search [album|song|artist] [query]");
    eprintln!();
    let _ = Args::command().write_help(&mut std::io::stderr());
}

fn init_tracing(default_level: &str) {
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    init_tracing(args.default_log_level());
    debug!(?args, "CLI arguments parsed");

    let mut config = match RunConfig::load(&args.config) {
        Ok(config) => config,
        Err(error) => {
            println!("load Config failed: {error}");
            return Ok(());
        }
    };

    let client = match ServiceClient::new(&config.service_url) {
        Ok(client) => client,
        Err(error) => {
            println!("{error}");
            return Ok(());
        }
    };

    let token = match resolve_token(&client, &config).await {
        Ok(token) => token,
        Err(error) => {
            debug!(error = %error, "token resolution failed");
            println!("Failed to get token.");
            return Ok(());
        }
    };

    args.apply_overrides(&mut config);
    let mut options = args.acquire_options();
    let input = ConsoleInput::stdin();

    let initial = if let Some(search) = args.search {
        if args.urls.is_empty() {
            println!("Error: --search flag requires a query.");
            print_usage();
            return Ok(());
        }
        let kind = SearchKind::from(search);
        let query = args.urls.join(" ");
        let results = match client.search(kind, &query, &token).await {
            Ok(results) => results,
            Err(error) => {
                println!("\nSearch process failed: {error}");
                return Ok(());
            }
        };
        match prompt::choose_search_result(&input, &results)
            .await
            .context("failed to read search choice")?
        {
            Some(url) => {
                if kind == SearchKind::Song {
                    options.song = true;
                }
                vec![url]
            }
            None => {
                println!("\nExiting.");
                return Ok(());
            }
        }
    } else {
        if args.urls.is_empty() {
            println!("No URLs provided.");
            print_usage();
            return Ok(());
        }
        args.urls.clone()
    };

    let mut ctx = RunContext::new(config, token, options).with_artist_select(args.artist_select);

    let catalog = prompt::SelectingCatalog::new(&client, &input);
    let batch = match build_batch(initial, &mut ctx, &catalog).await {
        Ok(batch) => batch,
        Err(error) => {
            println!("{error}");
            return Ok(());
        }
    };
    info!(locators = batch.len(), "Batch ready");

    let probe = PathProbe;
    let controller = RetryController::new(
        Dispatcher::new(&client, &probe),
        args.retry_mode.into(),
    );
    let mut retry_prompt: Box<dyn RetryPrompt + '_> = match args.on_error {
        OnErrorArg::Prompt => Box::new(StdinPrompt::new(&input)),
        OnErrorArg::Retry => Box::new(AutoConfirm),
        OnErrorArg::Abort => Box::new(AutoAbort),
    };

    let report = controller.run(&batch, &ctx, retry_prompt.as_mut()).await;
    info!(
        passes = report.passes,
        completed = report.counters.success,
        errors = report.counters.error,
        clean = report.outcome == RunOutcome::Clean,
        "Run finished"
    );

    Ok(())
}
