//! YAML configuration loading and parsing

use crate::config::KodebaseConfig;
use crate::config::defaults::{DEFAULT_CONFIG_PATH, get_default_config};
use crate::config::validation::validate_config;
use crate::error::ConfigLoadError;
use crate::system::System;
use crate::utils::path::resolve_config_path;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Load the configuration of a project
///
/// `config_path` is relative to `project_root` and defaults to
/// [`DEFAULT_CONFIG_PATH`]. A missing file is not an error: the default
/// configuration is returned instead.
///
/// # Errors
///
/// Returns a [`ConfigLoadError`] if the file exists but cannot be read,
/// is not valid YAML, or does not conform to the schema.
pub fn load_config(
    system: &dyn System,
    project_root: &Path,
    config_path: Option<&Path>,
) -> Result<KodebaseConfig, ConfigLoadError> {
    let relative = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    let path = resolve_config_path(system, project_root, relative).map_err(|source| {
        ConfigLoadError::Io {
            path: project_root.join(relative),
            source,
        }
    })?;

    let exists = system.exists(&path).map_err(|source| ConfigLoadError::Io {
        path: path.clone(),
        source,
    })?;
    if !exists {
        info!(
            "No configuration file at {}, using defaults",
            path.display()
        );
        return Ok(get_default_config());
    }

    debug!("Loading configuration from {}", path.display());
    let content = system
        .read_to_string(&path)
        .map_err(|source| ConfigLoadError::Io {
            path: path.clone(),
            source,
        })?;

    parse_config(&content, path)
}

/// Parse and validate configuration text read from `path`
///
/// # Errors
///
/// Returns [`ConfigLoadError::Parse`] for malformed YAML and
/// [`ConfigLoadError::Validation`] for schema violations.
pub fn parse_config(content: &str, path: PathBuf) -> Result<KodebaseConfig, ConfigLoadError> {
    let value = match parse_yaml(content) {
        Ok(value) => value,
        Err(source) => return Err(ConfigLoadError::Parse { path, source }),
    };

    validate_config(&value).map_err(|source| ConfigLoadError::Validation { path, source })
}

/// Parse YAML text into an untyped tree
///
/// A document holding nothing but whitespace and comments parses as `null`.
/// JSON has no representation for `.inf` and `.nan`, so such values are
/// rejected here instead of turning into `null`.
///
/// # Errors
///
/// Returns the parser error for malformed YAML or non-finite numbers.
pub fn parse_yaml(content: &str) -> Result<Value, serde_yaml::Error> {
    if is_blank_document(content) {
        return Ok(Value::Null);
    }
    let document: serde_yaml::Value = serde_yaml::from_str(content)?;
    if let Some(path) = non_finite_path(&document, &mut Vec::new()) {
        return Err(serde::de::Error::custom(format!(
            "non-finite number at {path} is not supported"
        )));
    }
    serde_yaml::from_value(document)
}

/// Dotted path of the first `.inf` or `.nan` in a document
fn non_finite_path(value: &serde_yaml::Value, path: &mut Vec<String>) -> Option<String> {
    match *value {
        serde_yaml::Value::Number(ref n) => n
            .as_f64()
            .filter(|f| !f.is_finite())
            .map(|_| if path.is_empty() { "root".to_owned() } else { path.join(".") }),
        serde_yaml::Value::Sequence(ref items) => items.iter().enumerate().find_map(|(i, item)| {
            path.push(i.to_string());
            let found = non_finite_path(item, path);
            path.pop();
            found
        }),
        serde_yaml::Value::Mapping(ref entries) => entries.iter().find_map(|(key, item)| {
            path.push(key.as_str().map_or_else(|| format!("{key:?}"), str::to_owned));
            let found = non_finite_path(item, path);
            path.pop();
            found
        }),
        serde_yaml::Value::Tagged(ref tagged) => non_finite_path(&tagged.value, path),
        serde_yaml::Value::Null | serde_yaml::Value::Bool(_) | serde_yaml::Value::String(_) => {
            None
        }
    }
}

/// Render a configuration as YAML text
///
/// # Errors
///
/// Returns the serializer error, which only occurs for non-string map keys.
pub fn to_yaml(config: &KodebaseConfig) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(config)
}

fn is_blank_document(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'))
}
