//! Scaffold a configuration file from a preset

use crate::config::Preset;
use crate::config::yaml::to_yaml;
use crate::error::KodebaseError;
use crate::system::System;
use crate::utils::path::resolve_config_path;
use anyhow::{Context as _, Result};
use std::path::Path;
use tracing::{debug, info};

/// Write `preset` as YAML to the configuration path
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if:
/// - The file already exists and `force` is not set
/// - The directory or file cannot be written
pub fn init_config(
    system: &dyn System,
    project_root: &Path,
    config_path: &Path,
    preset: Preset,
    force: bool,
) -> Result<String> {
    let path = resolve_config_path(system, project_root, config_path)
        .map_err(|e| KodebaseError::filesystem(format!("Cannot resolve project root: {e}")))?;

    let exists = system.exists(&path).map_err(|e| {
        KodebaseError::filesystem(format!("Cannot access {}: {e}", path.display()))
    })?;
    if exists && !force {
        return Err(KodebaseError::configuration(format!(
            "Configuration file already exists: {} (use --force to overwrite)",
            path.display()
        ))
        .into());
    }

    if let Some(parent) = path.parent() {
        debug!("Creating directory {}", parent.display());
        system.create_dir_all(parent).map_err(|e| {
            KodebaseError::filesystem(format!(
                "Failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let yaml = to_yaml(preset.config()).context("Failed to render preset as YAML")?;
    system.write(&path, yaml.as_bytes()).map_err(|e| {
        KodebaseError::filesystem(format!("Failed to write {}: {e}", path.display()))
    })?;
    info!("Wrote {} preset to {}", preset, path.display());

    Ok(format!("Created {} from preset '{preset}'", path.display()))
}
