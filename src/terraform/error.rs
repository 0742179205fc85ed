use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by terraform lifecycle operations.
///
/// Setup problems (missing directory, no configuration files, missing
/// binary) are distinct variants so callers can skip instead of fail.
#[derive(Debug, Error)]
pub enum TerraformError {
    /// The configuration directory does not exist
    #[error("configuration directory not found: {0}")]
    MissingDir(PathBuf),

    /// The configuration directory holds no .tf or .tf.json files
    #[error("no terraform configuration files in {0}")]
    NoConfigFiles(PathBuf),

    /// The terraform binary could not be spawned
    #[error("terraform binary not found: '{binary}'")]
    BinaryNotFound { binary: String },

    /// terraform exited non-zero
    #[error("terraform {command} failed (exit {status}): {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    /// The retry budget ran out; carries the final failure
    #[error("terraform {command} failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        command: String,
        attempts: u32,
        last: Box<TerraformError>,
    },

    /// A named output does not exist in the state
    #[error("output not found: '{name}'")]
    OutputNotFound { name: String },

    /// A named output has a different shape than the caller asked for
    #[error("output '{name}' is not a {expected}")]
    UnexpectedOutputType { name: String, expected: &'static str },

    #[error("failed to parse terraform output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
