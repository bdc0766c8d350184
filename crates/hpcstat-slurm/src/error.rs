//! Error type for SLURM queries.

use crate::config::ConfigError;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlurmError {
    #[error("{tool} not found in PATH")]
    ToolNotFound { tool: &'static str },
    #[error("{tool} query failed: {reason}")]
    QueryFailed { tool: &'static str, reason: String },
    #[error("Failed to parse {var}={value:?}: {source}")]
    ParseError {
        var: &'static str,
        value: String,
        source: ParseIntError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
