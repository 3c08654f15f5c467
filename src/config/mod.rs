//! Configuration management module
//!
//! Handles the configuration model, schema validation with defaults,
//! presets, YAML loading, and version migration

pub mod defaults;
pub mod migration;
pub mod presets;
pub mod schema;
pub mod types;
pub mod validation;
pub mod yaml;

pub use defaults::{DEFAULT_ARTIFACTS_DIR, DEFAULT_CONFIG_PATH, get_default_config};
pub use migration::{
    ConfigVersion, DeprecationWarning, MigrationOptions, MigrationResult,
    create_deprecation_warning, detect_version, migrate_config,
};
pub use presets::{Preset, presets};
pub use types::*;
pub use validation::validate_config;
pub use yaml::load_config;
