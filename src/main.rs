//! brandkit - HTTP front-end for icon resizing and white-label provisioning.
//!
//! Main entry point for the brandkit CLI and server.

mod cli;
mod server;

use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let work_dir = match cli.work_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let config_path = if cli.config.is_absolute() {
        cli.config.clone()
    } else {
        work_dir.join(&cli.config)
    };
    let (mut config, found) = server::load_config(&config_path, &work_dir)?;

    match cli.command {
        Some(Commands::CheckConfig) => server::check_config(&config, &config_path, found),
        command => {
            if let Some(Commands::Run { host, port }) = command {
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }
            }

            server::init_tracing(&config.logging)?;
            if found {
                tracing::info!("Loaded configuration from {}", config_path.display());
            } else {
                tracing::info!(
                    "No configuration at {}, using defaults",
                    config_path.display()
                );
            }
            server::run_server(config).await
        }
    }
}
