//! CLI definitions for brandkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// brandkit CLI.
#[derive(Debug, Parser)]
#[command(name = "brandkit")]
#[command(about = "HTTP front-end for icon resizing and white-label provisioning scripts")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/brandkit.toml", global = true)]
    pub config: PathBuf,

    /// Working directory (default: current directory). Relative paths in the
    /// configuration resolve against it, including `scripts.dir`, so the
    /// collaborator scripts are looked up here unless an absolute scripts
    /// directory is configured.
    #[arg(short, long, global = true)]
    pub work_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Run the server in foreground (default)
    Run {
        /// Server host, overrides the configuration
        #[arg(long)]
        host: Option<String>,

        /// Server port, overrides the configuration and PORT
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate the configuration and print the resolved settings
    CheckConfig,
}
