use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use openclaw_manager::backend::LocalBackend;
use openclaw_manager::config::ManagerConfig;

mod cli;

#[derive(Parser)]
#[command(name = "openclaw-manager")]
#[command(about = "Desktop manager for an OpenClaw installation")]
#[command(version)]
struct Cli {
    /// Path to the manager config (defaults to ~/.openclaw-manager/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// OpenClaw data directory (overrides the config; defaults to ~/.openclaw)
    #[arg(long, global = true)]
    openclaw_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the manager window (default)
    Gui,

    /// Write a default manager config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Copy the OpenClaw configuration to a file
    Export {
        /// Destination file
        path: PathBuf,
    },

    /// Replace the OpenClaw configuration with a file
    Import {
        /// Source file (must be a JSON object)
        path: PathBuf,
    },

    /// List agents and routing bindings
    Agents {
        /// Print the raw agents/bindings JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config_path = cli
        .config
        .unwrap_or_else(ManagerConfig::global_config_path);
    let openclaw_dir = cli.openclaw_dir;
    let load_config = || -> Result<ManagerConfig> {
        let mut config = ManagerConfig::load_or_default(&config_path)?;
        if let Some(dir) = &openclaw_dir {
            config.openclaw_dir = Some(dir.clone());
        }
        debug!("[manager] OpenClaw dir: {}", config.openclaw_dir().display());
        Ok(config)
    };

    match cli.command {
        Some(Commands::Init { force }) => {
            cli::init::init_command(&config_path, force)?;
        }
        Some(Commands::Export { path }) => {
            let backend = LocalBackend::new(&load_config()?);
            cli::transfer::export_command(&backend, &path)?;
        }
        Some(Commands::Import { path }) => {
            let backend = LocalBackend::new(&load_config()?);
            cli::transfer::import_command(&backend, &path)?;
        }
        Some(Commands::Agents { json }) => {
            let backend = LocalBackend::new(&load_config()?);
            cli::agents::agents_command(&backend, json)?;
        }
        Some(Commands::Gui) | None => {
            // Default: run the GUI
            openclaw_manager::gui::run_gui(load_config()?)?;
        }
    }

    Ok(())
}
