//! `kodebase-config` - Configuration for Kodebase git automation
//!
//! This library defines the settings that drive Kodebase's git hooks,
//! cascade pull requests and commit conventions. It validates YAML settings
//! against a schema with per-block defaults, ships presets for common team
//! sizes, loads `.kodebase/config/settings.yml` (falling back to defaults
//! when it is absent) and migrates configurations between format versions.
//!
//! ```no_run
//! use kodebase_config::config::load_config;
//! use kodebase_config::system::RealSystem;
//! use std::path::Path;
//!
//! let config = load_config(&RealSystem::new(), Path::new("."), None)?;
//! println!("artifacts live in {}", config.artifacts_dir);
//! # Ok::<(), kodebase_config::error::ConfigLoadError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod operations;
pub mod system;
pub mod utils;

use anyhow::Result;
use cli::{Args, Command};
use config::{MigrationOptions, Preset};
use system::System;

/// Main entry point for the kodebase-config library
///
/// Runs the selected subcommand and returns the text to print.
///
/// # Errors
///
/// Returns the subcommand's error; its root cause is a
/// [`error::KodebaseError`] whenever an exit code applies.
pub fn run(args: &Args, system: &dyn System) -> Result<String> {
    let root = args.project_root.as_path();
    let config = args.config.as_path();

    match args.command {
        Command::Show => operations::show_config(system, root, config),
        Command::Validate => operations::validate_file(system, root, config),
        Command::Init { preset, force } => {
            operations::init_config(system, root, config, preset, force)
        }
        Command::Migrate { ref from, ref to } => operations::migrate_file(
            system,
            root,
            config,
            MigrationOptions {
                from_version: from.as_deref(),
                to_version: to.as_deref(),
            },
        ),
        Command::Presets => Ok(list_presets()),
    }
}

/// One line per preset: name and merge strategy
fn list_presets() -> String {
    Preset::ALL
        .iter()
        .map(|preset| {
            let strategy = preset
                .config()
                .git_ops
                .as_ref()
                .and_then(|ops| ops.post_merge.as_ref())
                .map_or("-", |post_merge| post_merge.strategy.as_str());
            format!("{:<12} post_merge: {strategy}", preset.name())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
