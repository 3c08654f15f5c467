//! Operations module
//!
//! Implements the command-line subcommands on top of the configuration API

pub mod init;
pub mod inspect;
pub mod migrate;

pub use init::init_config;
pub use inspect::{show_config, validate_file};
pub use migrate::migrate_file;
