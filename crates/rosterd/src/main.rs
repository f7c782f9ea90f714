//! rosterd — the Roster daemon.
//!
//! Single binary that assembles all Roster subsystems:
//! - Reference tables (offices, departments) loaded from JSON datasets
//! - Upstream directory client
//! - Shared manager cache
//! - REST API
//!
//! # Usage
//!
//! ```text
//! rosterd serve --config roster.toml --port 8000
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use roster_core::RosterConfig;
use roster_directory::HttpDirectory;
use roster_expand::{EmployeeService, ManagerCache, ReferenceStore};

#[derive(Parser)]
#[command(name = "rosterd", about = "Roster employee directory aggregator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the expansion API in front of the upstream directory.
    Serve {
        /// Path to roster.toml.
        #[arg(long, default_value = "roster.toml")]
        config: PathBuf,

        /// Port to listen on (overrides `server.port`).
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,rosterd=debug,roster=debug")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, port } => run_serve(&config, port).await,
    }
}

async fn run_serve(config_path: &Path, port: Option<u16>) -> anyhow::Result<()> {
    info!(config = ?config_path, "Roster daemon starting");

    let mut config = RosterConfig::from_file(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if let Some(base) = config_path.parent() {
        config.rebase_data_paths(base);
    }

    // ── Initialize subsystems ──────────────────────────────────

    // Reference tables. Missing or malformed datasets abort startup.
    let references = ReferenceStore::load(&config.data.offices, &config.data.departments)
        .context("loading reference datasets")?;
    info!(
        offices = references.office_count(),
        departments = references.department_count(),
        "reference tables loaded"
    );

    // Upstream directory.
    let directory = HttpDirectory::from_config(&config.directory)?;
    info!(
        base_url = %config.directory.base_url,
        batch_size = config.directory.batch_size,
        "directory client initialized"
    );

    let service = EmployeeService::new(
        Arc::new(directory),
        Arc::new(references),
        ManagerCache::new(),
    );

    // ── Start API server ───────────────────────────────────────

    let router = roster_api::build_router(service, config.defaults.clone());
    let addr = SocketAddr::from(([0, 0, 0, 0], port.unwrap_or(config.server.port)));

    info!(%addr, "API server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
            }
        })
        .await?;

    info!("Roster daemon stopped");
    Ok(())
}
