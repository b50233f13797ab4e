//! Button input daemon
//!
//! Wires a press-logging handler for every button, starts the poll loop
//! and runs until SIGINT. `--check` runs the health suite instead and
//! exits with its aggregate code.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use inky_buttons::{AppConfig, ButtonManager, GpioLines, build_info, health, identity};

#[derive(Debug, Parser)]
#[command(
    name = "buttond",
    about = "Button input service for e-ink display HATs",
    version
)]
struct Args {
    /// Configuration profile to load (debug, release)
    #[arg(long)]
    profile: Option<String>,

    /// Run the health check suite and exit
    #[arg(long)]
    check: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.check {
        let report = health::run_all_checks();
        health::print_report(&report);
        return ExitCode::from(report.exit_code() as u8);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "buttond failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.profile {
        Some(profile) => AppConfig::load(profile),
        None => AppConfig::load_from_env(),
    }
    .unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using default configuration");
        AppConfig::default()
    });

    info!(
        profile = %config.profile,
        build = %build_info::version_string(),
        git = %build_info::git_sha_short(),
        "starting buttond"
    );

    let manager = match GpioLines::detect() {
        Ok(lines) => ButtonManager::new(&config.buttons, Arc::new(lines)),
        Err(e) => {
            warn!(error = %e, "GPIO unavailable, button input disabled");
            ButtonManager::disabled()
        }
    };

    for label in identity::LABELS {
        manager.registry().register(
            label,
            Arc::new(|button| info!(button = %button, "button pressed")),
        )?;
    }

    if manager.start() {
        info!(status = ?manager.status(), "button input running");
    } else {
        // The feature disables itself instead of taking the process down;
        // the status snapshot is how a monitoring endpoint observes this
        warn!(status = ?manager.status(), "button input not started");
    }

    // No event loop of our own: park on the shutdown signal
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async { tokio::signal::ctrl_c().await })?;
    info!("shutdown signal received");

    manager.stop();
    info!(status = ?manager.status(), "buttond stopped");
    Ok(())
}
