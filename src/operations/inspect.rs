//! Show and validate the effective configuration

use crate::config::load_config;
use crate::config::yaml::to_yaml;
use crate::error::KodebaseError;
use crate::system::System;
use crate::utils::path::resolve_config_path;
use anyhow::{Context as _, Result};
use std::path::Path;
use tracing::info;

/// Render the effective configuration as YAML
///
/// A missing configuration file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be loaded.
pub fn show_config(system: &dyn System, project_root: &Path, config_path: &Path) -> Result<String> {
    let config =
        load_config(system, project_root, Some(config_path)).map_err(KodebaseError::from)?;
    to_yaml(&config).context("Failed to render configuration as YAML")
}

/// Check that the configuration file exists and conforms to the schema
///
/// # Errors
///
/// Returns an error if:
/// - The configuration file does not exist
/// - The file cannot be read or parsed
/// - The configuration violates the schema
pub fn validate_file(
    system: &dyn System,
    project_root: &Path,
    config_path: &Path,
) -> Result<String> {
    let path = resolve_config_path(system, project_root, config_path)
        .map_err(|e| KodebaseError::filesystem(format!("Cannot resolve project root: {e}")))?;

    let exists = system.exists(&path).map_err(|e| {
        KodebaseError::filesystem(format!("Cannot access {}: {e}", path.display()))
    })?;
    if !exists {
        return Err(KodebaseError::configuration(format!(
            "Configuration file not found: {}",
            path.display()
        ))
        .into());
    }

    load_config(system, project_root, Some(config_path)).map_err(KodebaseError::from)?;
    info!("Validated {}", path.display());

    Ok(format!("Configuration is valid: {}", path.display()))
}
