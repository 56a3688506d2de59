//! Station registry server
//!
//! Reads configuration from a TOML file (default
//! `~/.config/station-registry/config.toml`).

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use station_registry::server::{init_tracing, ServerHandle, ServerOptions};
use station_registry::{default_config_path, AppConfig};

#[derive(Parser, Debug)]
#[command(name = "station-registry", version, about = "EV charging station registry API")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "STATION_REGISTRY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Override the log level (e.g. debug, info, warn)
    #[arg(long)]
    log_level: Option<String>,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup
    #[arg(long)]
    no_migrate: bool,

    /// Do not create the bootstrap admin account
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = AppConfig::load(&config_path)?;

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level.clone() {
        config.logging.level = level;
    }

    if cli.check {
        print_summary(&config_path, &config);
        return Ok(());
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return Err(e);
        }
    };

    info!("Press Ctrl+C to shutdown gracefully.");
    handle.install_signal_handler();
    handle.wait().await;
    Ok(())
}

fn print_summary(path: &std::path::Path, config: &AppConfig) {
    println!("Configuration OK ({})", path.display());
    println!("  listen:    {}", config.server.address());
    println!("  database:  {}", config.database.url);
    println!("  token ttl: {}h", config.security.jwt_expiration_hours);
    println!(
        "  admin:     {}",
        config
            .admin
            .as_ref()
            .map(|a| a.email.as_str())
            .unwrap_or("(none)")
    );
    println!("  logging:   {} ({})", config.logging.level, config.logging.format);
    if config.uses_default_secret() {
        println!("  warning:   JWT secret is the built-in default");
    }
}
