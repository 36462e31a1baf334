use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::converter::ConverterConfig;
use crate::manager::ManagerConfig;
use crate::staging::StagingConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub manager: ManagerConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub staging: StagingConfig,
}

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(String),

    #[error("failed to parse config: {0}")]
    ParseError(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}
