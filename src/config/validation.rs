//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("limits.{0} must be greater than zero")]
    ZeroLimit(&'static str),
    #[error("limits.max_line_len ({line}) must be at least as large as a MSG header (32 bytes)")]
    LineLimitTooSmall { line: usize },
}

/// Smallest line limit that still fits a realistic MSG header.
const MIN_LINE_LEN: usize = 32;

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.trim().is_empty() {
        errors.push(ValidationError::MissingServerName);
    }

    let limits = &config.limits;
    for (name, value) in [
        ("hub_queue_capacity", limits.hub_queue_capacity),
        ("sendq_capacity", limits.sendq_capacity),
        ("max_line_len", limits.max_line_len),
        ("max_body_len", limits.max_body_len),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroLimit(name));
        }
    }

    if limits.max_line_len != 0 && limits.max_line_len < MIN_LINE_LEN {
        errors.push(ValidationError::LineLimitTooSmall {
            line: limits.max_line_len,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
