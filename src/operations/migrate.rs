//! Migrate a configuration file between format versions

use crate::config::migration::{MigrationOptions, detect_version, migrate_config};
use crate::config::yaml::parse_yaml;
use crate::error::{ConfigLoadError, KodebaseError};
use crate::system::System;
use crate::utils::path::resolve_config_path;
use anyhow::{Context as _, Result};
use std::fmt::Write as _;
use std::path::Path;

/// Report of a migration: detected version, warnings and migrated YAML
///
/// The file itself is left untouched.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration file does not exist or cannot be read
/// - The file is not valid YAML
/// - A requested version is unsupported or older than the source
pub fn migrate_file(
    system: &dyn System,
    project_root: &Path,
    config_path: &Path,
    options: MigrationOptions<'_>,
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

    let content = system
        .read_to_string(&path)
        .map_err(|source| ConfigLoadError::Io {
            path: path.clone(),
            source,
        })
        .map_err(KodebaseError::from)?;
    let value = parse_yaml(&content)
        .map_err(|source| ConfigLoadError::Parse {
            path: path.clone(),
            source,
        })
        .map_err(KodebaseError::from)?;

    let detected = detect_version(&value);
    let result = migrate_config(value, options).map_err(KodebaseError::from)?;

    let mut report = format!("Detected version: {detected}\n");
    for warning in &result.warnings {
        writeln!(report, "warning: {warning}")?;
    }
    report.push_str(
        &serde_yaml::to_string(&result.config).context("Failed to render migrated configuration")?,
    );

    Ok(report)
}
