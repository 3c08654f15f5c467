//! Error types for configuration loading, validation and migration

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A single schema violation found while validating a configuration tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path segments from the document root to the offending value
    pub segments: Vec<String>,

    /// Human-readable description of the problem
    pub message: String,
}

impl Violation {
    #[inline]
    pub fn new<S: Into<String>>(segments: Vec<String>, message: S) -> Self {
        Self {
            segments,
            message: message.into(),
        }
    }

    /// Dotted path of the violation (`gitOps.post_merge.strategy`), or `root`
    #[must_use]
    #[inline]
    pub fn path(&self) -> String {
        if self.segments.is_empty() {
            return "root".to_owned();
        }
        self.segments.join(".")
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path(), self.message)
    }
}

/// Every violation found in one validation pass, in schema order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_violations(.violations, ""))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    #[must_use]
    #[inline]
    pub const fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// The ordered list of violations
    #[must_use]
    #[inline]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Dotted paths of all violations, in order
    #[must_use]
    #[inline]
    pub fn paths(&self) -> Vec<String> {
        self.violations.iter().map(Violation::path).collect()
    }

    /// One `<prefix><path>: <message>` line per violation
    #[must_use]
    pub fn render(&self, prefix: &str) -> String {
        render_violations(&self.violations, prefix)
    }
}

fn render_violations(violations: &[Violation], prefix: &str) -> String {
    violations
        .iter()
        .map(|v| format!("{prefix}{v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Failure to produce a configuration from a project root
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigLoadError {
    /// The file exists but is not well-formed YAML
    #[error("Failed to parse YAML configuration file at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The file parsed but does not conform to the schema
    #[error(
        "Configuration validation failed for {}:\n{}",
        .path.display(),
        .source.render("  - ")
    )]
    Validation {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    /// Any other failure reaching or reading the file
    #[error("Failed to load configuration from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConfigLoadError {
    /// Path of the configuration file the error refers to
    #[must_use]
    #[inline]
    pub fn path(&self) -> &PathBuf {
        match *self {
            Self::Parse { ref path, .. }
            | Self::Validation { ref path, .. }
            | Self::Io { ref path, .. } => path,
        }
    }

    /// The schema violations, when this is a validation failure
    #[must_use]
    #[inline]
    pub fn validation(&self) -> Option<&ValidationError> {
        match *self {
            Self::Validation { ref source, .. } => Some(source),
            Self::Parse { .. } | Self::Io { .. } => None,
        }
    }
}

/// Failure to move a configuration between versions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MigrationError {
    #[error("Unsupported configuration version: {version}. Supported versions: {supported}")]
    UnsupportedVersion { version: String, supported: String },

    #[error("Cannot downgrade configuration from version {from} to {to}")]
    Downgrade { from: String, to: String },
}

/// Top-level error type used by the command-line front end
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum KodebaseError {
    /// Configuration Error - bad arguments or refused operation
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Load Error - the configuration file could not be loaded
    #[error(transparent)]
    Load(#[from] ConfigLoadError),

    /// Migration Error - unsupported or impossible version change
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// Filesystem Error - file operation failed
    #[error("Filesystem error: {message}")]
    Filesystem { message: String },
}

impl KodebaseError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Configuration { .. } | Self::Load(ConfigLoadError::Parse { .. }) => 1,
            Self::Load(ConfigLoadError::Validation { .. }) => 2,
            Self::Migration(_) => 3,
            Self::Load(ConfigLoadError::Io { .. }) | Self::Filesystem { .. } => 4,
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a filesystem error
    #[inline]
    pub fn filesystem<S: Into<String>>(message: S) -> Self {
        Self::Filesystem {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(path: &[&str], message: &str) -> Violation {
        Violation::new(path.iter().map(|s| (*s).to_owned()).collect(), message)
    }

    #[test]
    fn empty_path_renders_as_root() {
        let v = violation(&[], "Expected object, received null");
        assert_eq!(v.path(), "root");
        assert_eq!(v.to_string(), "root: Expected object, received null");
    }

    #[test]
    fn validation_error_lists_every_violation() {
        let err = ValidationError::new(vec![
            violation(&["gitOps", "post_merge", "strategy"], "bad strategy"),
            violation(&["gitOps", "platform", "type"], "bad type"),
        ]);
        assert_eq!(
            err.render("  - "),
            "  - gitOps.post_merge.strategy: bad strategy\n  - gitOps.platform.type: bad type"
        );
        assert_eq!(
            err.paths(),
            vec!["gitOps.post_merge.strategy", "gitOps.platform.type"]
        );
    }

    #[test]
    fn load_error_messages() {
        let err = ConfigLoadError::Validation {
            path: PathBuf::from("/p/settings.yml"),
            source: ValidationError::new(vec![violation(&["version"], "Expected string, received number")]),
        };
        assert_eq!(
            err.to_string(),
            "Configuration validation failed for /p/settings.yml:\n  - version: Expected string, received number"
        );

        let err = ConfigLoadError::Io {
            path: PathBuf::from("/p/settings.yml"),
            source: io::Error::other("Is a directory"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load configuration from /p/settings.yml: Is a directory"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn exit_codes() {
        assert_eq!(KodebaseError::configuration("x").exit_code(), 1);
        assert_eq!(KodebaseError::filesystem("x").exit_code(), 4);
        let migration = MigrationError::UnsupportedVersion {
            version: "9.9".to_owned(),
            supported: "1.0".to_owned(),
        };
        assert_eq!(KodebaseError::from(migration).exit_code(), 3);
    }
}
