use autosrv::config::Config;
use autosrv::driver::ControlLoopDriver;
use autosrv::error::{AutosrvError, Result};
use autosrv::table::MemoryPointTable;
use clap::{Parser, Subcommand};
use level_control::Role;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the control loop against the in-memory loopback table
    Run,

    /// Load and print the effective configuration, then exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;

    // Initialize logging: RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.service.log_level))
        .map_err(|e| AutosrvError::ConfigError(format!("Invalid log level: {}", e)))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting {}", config.service.name);

    match args.command {
        Some(Commands::Run) | None => run_service(&config).await?,
        Some(Commands::Check) => check_config(&config)?,
    }

    Ok(())
}

/// Run the control loop in loopback mode: dispatched writes land back in the
/// in-memory table, so the process converges over successive cycles.
async fn run_service(config: &Config) -> Result<()> {
    let table = Arc::new(MemoryPointTable::new());
    for role in Role::ALL {
        let entry = config.points.entry(role);
        table.seed(entry.id(), entry.initial_raw, entry.point_config());
        info!(role = %role, point = %entry.id(), initial = entry.initial_raw, "Seeded point");
    }

    let driver = Arc::new(ControlLoopDriver::new(
        table.clone(),
        table.clone(),
        config.points.monitored_set(),
        config.automation.unit_address,
    ));

    let loop_driver = driver.clone();
    let poll_interval = config.automation.poll_interval_seconds;
    let handle = tokio::spawn(async move {
        loop_driver.start(poll_interval).await;
    });

    wait_for_shutdown().await;
    info!("Shutdown signal received, stopping control loop");
    driver.stop();
    if let Err(e) = handle.await {
        warn!("Control loop task ended abnormally: {}", e);
    }

    Ok(())
}

/// Print the effective configuration and binding
fn check_config(config: &Config) -> Result<()> {
    let yaml = serde_yaml::to_string(config)
        .map_err(|e| AutosrvError::ConfigError(e.to_string()))?;
    println!("{}", yaml);
    for role in Role::ALL {
        println!("{} -> {}", role, config.points.entry(role).id());
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM on Unix, Ctrl+C elsewhere
async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let term_signal = match signal(SignalKind::terminate()) {
            Ok(sig) => Some(sig),
            Err(e) => {
                warn!(
                    "Failed to install SIGTERM handler: {}. Service will only respond to Ctrl+C",
                    e
                );
                None
            },
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = async {
                if let Some(mut sig) = term_signal {
                    sig.recv().await;
                } else {
                    std::future::pending::<()>().await
                }
            } => {},
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
