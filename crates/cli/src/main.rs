mod args;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reel_core::{movie, EncoderKind, ProgramLocator, WhichLocator};

use args::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.quiet { "warn" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the movie was made.
fn run(args: &Args) -> Result<bool> {
    if args.list_encoders {
        list_encoders();
        return Ok(true);
    }

    let config = args
        .encoding_config()
        .context("Failed to load configuration")?;
    info!(
        encoder = ?config.encoder,
        fps = config.fps,
        "Configuration loaded"
    );

    let outcome = movie(&config).context("Could not make movie")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }
    Ok(outcome.is_success())
}

fn list_encoders() {
    let locator = WhichLocator::new();
    for encoder in EncoderKind::ALL {
        let state = if locator.is_available(encoder.program()) {
            "installed"
        } else {
            "missing"
        };
        println!("{:<12} {}", encoder, state);
    }
}
