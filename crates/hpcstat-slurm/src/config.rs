//! SLURM settings from a `key = value` configuration file.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use thiserror::Error;

/// Key naming the partition to use.
pub const PARTITION_KEY: &str = "slurm_partition";

/// Key turning SLURM support on or off.
pub const ENABLED_KEY: &str = "enable_slurm";

/// Prefix of batch script directives.
pub const SCRIPT_DIRECTIVE_PREFIX: &str = "#SBATCH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
    #[error("Line {line_no}: expected `key = value`, got {line:?}")]
    Malformed { line_no: usize, line: String },
    #[error("Invalid boolean for {key}: {value:?}")]
    InvalidBool { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlurmConfig {
    pub enabled: bool,
    pub partition: Option<String>,
}

impl SlurmConfig {
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration text. Unknown keys are ignored.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Malformed {
                    line_no: idx + 1,
                    line: raw.to_string(),
                });
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                PARTITION_KEY => {
                    config.partition = Some(value.to_string()).filter(|v| !v.is_empty());
                }
                ENABLED_KEY => config.enabled = parse_bool(key, value)?,
                other => tracing::debug!(key = other, "ignoring unknown config key"),
            }
        }

        Ok(config)
    }

    /// Batch script directive selecting the configured partition.
    pub fn directive(&self) -> Option<String> {
        self.partition
            .as_ref()
            .map(|p| format!("{} --partition={}", SCRIPT_DIRECTIVE_PREFIX, p))
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
