//! Configuration version detection and migration
//!
//! Migrations are an ordered list of steps, each moving an untyped
//! configuration tree from one supported version to the next and recording
//! deprecation warnings along the way. Only version 1.0 exists today, so the
//! step list is empty and every migration is the identity.

use crate::error::MigrationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// A supported configuration format version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[serde(rename = "1.0")]
    V1_0,
}

/// Supported versions, oldest first
pub const SUPPORTED_VERSIONS: &[ConfigVersion] = &[ConfigVersion::V1_0];

/// Version assumed when a configuration does not declare a usable one
pub const DEFAULT_VERSION: ConfigVersion = ConfigVersion::V1_0;

impl ConfigVersion {
    #[must_use]
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1_0 => "1.0",
        }
    }

    /// Parse a version string, `None` when unsupported
    #[must_use]
    pub fn parse(version: &str) -> Option<Self> {
        SUPPORTED_VERSIONS
            .iter()
            .copied()
            .find(|v| v.as_str() == version)
    }

    /// The newest supported version
    #[must_use]
    pub fn latest() -> Self {
        SUPPORTED_VERSIONS
            .last()
            .copied()
            .unwrap_or(DEFAULT_VERSION)
    }

    fn index(self) -> usize {
        SUPPORTED_VERSIONS
            .iter()
            .position(|v| *v == self)
            .unwrap_or(0)
    }
}

impl fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigVersion {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| MigrationError::UnsupportedVersion {
            version: s.to_owned(),
            supported: supported_list(),
        })
    }
}

fn supported_list() -> String {
    SUPPORTED_VERSIONS
        .iter()
        .map(|v| v.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Advisory note about a field scheduled for removal; never fatal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecationWarning {
    pub field: String,
    pub message: String,
    pub version: ConfigVersion,
}

impl fmt::Display for DeprecationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (deprecated in {}): {}", self.field, self.version, self.message)
    }
}

/// Outcome of a migration
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationResult {
    pub config: Value,
    pub warnings: Vec<DeprecationWarning>,
}

/// Version bounds for [`migrate_config`]; unset bounds are inferred
#[derive(Debug, Clone, Copy, Default)]
pub struct MigrationOptions<'a> {
    /// Source version; detected from the config when unset
    pub from_version: Option<&'a str>,
    /// Target version; the newest supported version when unset
    pub to_version: Option<&'a str>,
}

/// One transformation between two adjacent versions
#[derive(Debug, Clone, Copy)]
pub struct MigrationStep {
    pub from: ConfigVersion,
    pub to: ConfigVersion,
    pub apply: fn(Value, &mut Vec<DeprecationWarning>) -> Value,
}

/// Registered steps, in version order
pub const MIGRATION_STEPS: &[MigrationStep] = &[];

/// Determine the declared version of an arbitrary configuration tree
///
/// Returns [`DEFAULT_VERSION`] for non-objects, a missing or non-string
/// `version` field, or an unsupported version string. Never fails.
#[must_use]
pub fn detect_version(config: &Value) -> ConfigVersion {
    config
        .get("version")
        .and_then(Value::as_str)
        .and_then(ConfigVersion::parse)
        .unwrap_or(DEFAULT_VERSION)
}

/// Migrate a configuration tree between two supported versions
///
/// # Errors
///
/// Returns [`MigrationError::UnsupportedVersion`] when either bound is not a
/// supported version and [`MigrationError::Downgrade`] when the target is
/// older than the source.
pub fn migrate_config(
    config: Value,
    options: MigrationOptions<'_>,
) -> Result<MigrationResult, MigrationError> {
    let from = match options.from_version {
        Some(version) => version.parse::<ConfigVersion>()?,
        None => detect_version(&config),
    };
    let to = match options.to_version {
        Some(version) => version.parse::<ConfigVersion>()?,
        None => ConfigVersion::latest(),
    };

    apply_steps(config, MIGRATION_STEPS, from, to)
}

/// Run every step that lies between `from` and `to`
///
/// # Errors
///
/// Returns [`MigrationError::Downgrade`] when `to` is older than `from`.
pub fn apply_steps(
    config: Value,
    steps: &[MigrationStep],
    from: ConfigVersion,
    to: ConfigVersion,
) -> Result<MigrationResult, MigrationError> {
    if from.index() > to.index() {
        return Err(MigrationError::Downgrade {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let mut warnings = Vec::new();
    let mut migrated = config;
    for step in steps
        .iter()
        .filter(|s| s.from.index() >= from.index() && s.to.index() <= to.index())
    {
        debug!("Migrating configuration from {} to {}", step.from, step.to);
        migrated = (step.apply)(migrated, &mut warnings);
    }

    for warning in &warnings {
        warn!("{warning}");
    }

    Ok(MigrationResult {
        config: migrated,
        warnings,
    })
}

/// Build a deprecation warning
#[must_use]
pub fn create_deprecation_warning(
    field: &str,
    message: &str,
    version: ConfigVersion,
) -> DeprecationWarning {
    DeprecationWarning {
        field: field.to_owned(),
        message: message.to_owned(),
        version,
    }
}
