//! Configuration validation.

use crate::config::Config;
use crate::constants::{MAX_LINE_WIDTH, confidence};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_threshold(config.defaults.confidence_threshold)?;
    validate_model(config)?;

    if !(1..=MAX_LINE_WIDTH).contains(&config.output.line_width) {
        return Err(Error::ConfigValidation {
            message: format!(
                "line_width must be between 1 and {MAX_LINE_WIDTH}, got {}",
                config.output.line_width
            ),
        });
    }

    Ok(())
}

/// Validate a confidence threshold.
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !(confidence::MIN..=confidence::MAX).contains(&threshold) {
        return Err(Error::ConfigValidation {
            message: format!(
                "confidence_threshold must be between {} and {}, got {threshold}",
                confidence::MIN,
                confidence::MAX,
            ),
        });
    }
    Ok(())
}

/// Validate model settings.
fn validate_model(config: &Config) -> Result<()> {
    let model = &config.model;

    if model.batch_size == 0 {
        return Err(Error::ConfigValidation {
            message: "batch_size must be at least 1".to_string(),
        });
    }

    if model.identifier.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "model identifier must not be empty".to_string(),
        });
    }

    if model.admin1_region.is_some() && model.country.is_none() {
        return Err(Error::ConfigValidation {
            message: "admin1_region requires country to be set".to_string(),
        });
    }

    Ok(())
}
