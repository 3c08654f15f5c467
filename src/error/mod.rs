//! Error handling module
//!
//! Defines the validation, load and migration error types, plus the
//! command-line error type with exit codes

pub mod types;

pub use types::*;
