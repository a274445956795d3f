//! Crate-level error type for the I/O edges (config loading, lamp lookup, export).

use std::io;

use crate::config::ConfigError;

/// Errors raised outside the pure calculations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// One or more configuration fields failed validation.
    #[error("{} invalid configuration field(s): {}", .0.len(), join(.0))]
    Invalid(Vec<ConfigError>),

    #[error("unknown lamp \"{id}\", available: {available}")]
    UnknownLamp { id: String, available: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn join(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, Error>;
