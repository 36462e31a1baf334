use super::types::{Config, ConfigError};

/// Validates cross-field constraints the serde layer cannot express.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.manager.max_concurrent_jobs == 0 {
        return Err(ConfigError::Invalid(
            "manager.max_concurrent_jobs must be at least 1".to_string(),
        ));
    }
    if config.converter.frame_rate == 0 {
        return Err(ConfigError::Invalid(
            "converter.frame_rate must be at least 1".to_string(),
        ));
    }
    if config.converter.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "converter.timeout_secs must be at least 1".to_string(),
        ));
    }
    Ok(())
}
