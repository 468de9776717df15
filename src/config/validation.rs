//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and URL shapes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AdaptorConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::AdaptorConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("target.timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("either target.full_url or target.host must be set")]
    MissingTarget,

    #[error("target.full_url {url:?} is not an absolute URL: {reason}")]
    InvalidFullUrl { url: String, reason: String },

    #[error("request.max_body_bytes must be greater than zero when set")]
    ZeroBodyLimit,
}

/// Check a parsed configuration.
pub fn validate_config(config: &AdaptorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let target = &config.target;

    if target.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if target.full_url.is_empty() && target.host.is_empty() {
        errors.push(ValidationError::MissingTarget);
    }

    if !target.full_url.is_empty() {
        if let Err(e) = Url::parse(&target.full_url) {
            errors.push(ValidationError::InvalidFullUrl {
                url: target.full_url.clone(),
                reason: e.to_string(),
            });
        }
    }

    if config.request.max_body_bytes == Some(0) {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
