use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wayfarer::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "wayfarer")]
#[command(about = "Wayfarer - levels, experience and achievements for travelers")]
#[command(version)]
struct Cli {
    /// Working directory used for config discovery (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Path to the config file (defaults to .wayfarer/config.toml, then ~/.wayfarer/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the level reached with a given amount of experience
    Level {
        /// Cumulative experience
        #[arg(allow_negative_numbers = true)]
        exp: i64,
    },

    /// Print the level table
    Table {
        /// Only show the first N levels
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Replay a JSON session script against a fresh progress store
    Replay {
        /// Path to the session script
        script: PathBuf,

        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new .wayfarer/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));

    let load_config = || Config::resolve(cli.config.as_deref(), &work_dir);

    match cli.command {
        Commands::Level { exp } => {
            cli::level::level_command(&load_config()?, exp)?;
        }
        Commands::Table { limit } => {
            cli::table::table_command(&load_config()?, limit)?;
        }
        Commands::Replay { script, json } => {
            cli::replay::replay_command(&load_config()?, &script, json)?;
        }
        Commands::Init { force } => {
            cli::init::init_command(&work_dir, cli.config.clone(), force)?;
        }
    }

    Ok(())
}
