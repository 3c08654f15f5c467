use crate::config::{DEFAULT_CONFIG_PATH, Preset};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for kodebase-config
#[derive(Parser, Debug, Clone)]
#[command(name = "kodebase-config")]
#[command(about = "Inspect, validate and scaffold Kodebase git automation settings")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Project root the configuration path is resolved against
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    pub project_root: PathBuf,

    /// Configuration file path, relative to the project root
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the effective configuration (defaults when no file exists)
    Show,

    /// Check the configuration file against the schema
    Validate,

    /// Write a preset to the configuration path
    Init {
        /// Preset name: solo, small_team, enterprise or default
        #[arg(long, value_name = "NAME", default_value = "default")]
        preset: Preset,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Migrate the configuration file between format versions and print it
    Migrate {
        /// Source version; detected from the file when omitted
        #[arg(long, value_name = "VERSION")]
        from: Option<String>,

        /// Target version; the newest supported version when omitted
        #[arg(long, value_name = "VERSION")]
        to: Option<String>,
    },

    /// List the available presets
    Presets,
}
