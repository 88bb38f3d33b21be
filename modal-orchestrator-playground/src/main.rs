//! Modal Orchestrator playground
//!
//! Runs scripted modal scenarios against the in-memory surface tree and prints
//! a JSON report on stdout. Lifecycle logging goes to stderr; set `RUST_LOG`
//! or `--log-level` to see the engine's own `debug`/`trace` records.

mod scenarios;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use modal_orchestrator_core::ModalConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Modal playground - scripted lifecycle scenarios
#[derive(Parser)]
#[command(name = "modal-playground")]
#[command(about = "Drive scripted modal scenarios against an in-memory surface tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON modal configuration layered over the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off), overridden by `RUST_LOG`
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Open several modals on top of each other, then close them all
    Stack {
        /// Number of modals to open
        #[arg(long, default_value_t = 3)]
        count: usize,
    },
    /// Open modals in two containers, then open an exclusive one
    Exclusive {
        /// Only close modals in the new modal's container
        #[arg(long)]
        in_container: bool,
    },
    /// Request a close while the modal is still opening
    QueuedClose,
    /// Feed wheel, touch and key input through an open modal
    Scroll,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;

    let report = match cli.command {
        Commands::Stack { count } => scenarios::stack(config, count).await?,
        Commands::Exclusive { in_container } => scenarios::exclusive(config, in_container).await?,
        Commands::QueuedClose => scenarios::queued_close(config).await?,
        Commands::Scroll => scenarios::scroll(config).await?,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ModalConfig> {
    let Some(path) = path else {
        return Ok(ModalConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = ModalConfig::from_json(&json)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    tracing::info!("Loaded modal configuration from {}", path.display());
    Ok(config)
}
