//! Profile Directory service binary
//!
//! CLI → config → logging → runtime → store → services → HTTP server.

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use profile_directory::api::{self, AppState};
use profile_directory::cli::{Cli, Commands, ConfigSubcommand};
use profile_directory::config::{self, ServiceConfig};
use profile_directory::error::{Error, Result};
use profile_directory::logging;
use profile_directory::services::{AvatarUrl, Services};
use profile_directory::store::{EntityStore, MemoryStore};
use profile_directory::version;

fn main() {
    if let Err(e) = run() {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    let (config_path, bind, port) = match cli.command {
        Commands::Version => {
            version::print_version();
            return Ok(());
        }
        Commands::Config { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            return handle_config_command(subcommand);
        }
        Commands::Serve { config, bind, port } => (config, bind, port),
    };

    let mut config = ServiceConfig::load(config_path.as_deref())?;
    config.apply_cli_overrides(bind.as_deref(), port);
    config.validate()?;

    // The guards must be kept alive for the lifetime of the program
    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    let build = version::build_info();
    info!(
        version = %build.full_version(),
        target = %build.target,
        profile = %build.profile,
        "Starting Profile Directory"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(config.worker_threads())
        .thread_name("profile-directory")
        .build()
        .map_err(|e| Error::Internal(format!("Failed to create async runtime: {}", e)))?;

    runtime.block_on(serve(config))
}

async fn serve(config: ServiceConfig) -> Result<()> {
    let store: Arc<dyn EntityStore> = Arc::new(MemoryStore::new());
    let services = Services::new(Arc::clone(&store), AvatarUrl::new(config.avatar.base_url.clone()));
    let app = api::router(AppState::new(services));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await.map_err(|e| {
        Error::Internal(format!("Failed to bind {}: {}", addr, e))
    })?;
    info!(addr = %addr, store = store.name(), "Listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await?;
    info!("Shutdown complete");

    served.map_err(|e| Error::Internal(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for Ctrl+C, running until killed");
            std::future::pending::<()>().await;
        }
    }
}

fn handle_config_command(subcommand: ConfigSubcommand) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show { config } => {
            let cfg = ServiceConfig::load(config.as_deref())?;
            println!("{}", cfg.to_toml()?);
        }
        ConfigSubcommand::Init { path, force } => {
            let written = config::init_config(path.as_deref(), force)?;
            println!("Configuration file created: {}", written.display());
        }
        ConfigSubcommand::Validate { config } => {
            ServiceConfig::load(config.as_deref())?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}
