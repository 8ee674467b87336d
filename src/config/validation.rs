//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempts >= 1, timeouts > 0, delays ordered)
//! - Detect duplicate static pages
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::routing::address::normalize_path;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("router.base_path `{0}` must start with '/'")]
    BasePath(String),

    #[error("router.{0} must not be empty")]
    EmptySetting(&'static str),

    #[error("rendering.max_attempts must be at least 1")]
    NoAttempts,

    #[error("rendering.timeout_ms must be greater than 0")]
    ZeroTimeout,

    #[error("rendering.max_delay_ms ({max}) is lower than base_delay_ms ({base})")]
    DelayOrder { base: u64, max: u64 },

    #[error("pages[{0}].path must not be empty")]
    EmptyPagePath(usize),

    #[error("page `{0}` is declared more than once")]
    DuplicatePage(String),
}

/// Check the semantic constraints serde cannot express.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let router = &config.router;

    if !router.base_path.starts_with('/') {
        errors.push(ValidationError::BasePath(router.base_path.clone()));
    }
    if route_key(&router.not_found_path).is_empty() {
        errors.push(ValidationError::EmptySetting("not_found_path"));
    }
    if route_key(&router.default_path).is_empty() {
        errors.push(ValidationError::EmptySetting("default_path"));
    }

    let rendering = &config.rendering;
    if rendering.max_attempts == 0 {
        errors.push(ValidationError::NoAttempts);
    }
    if rendering.timeout_ms == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }
    if rendering.max_delay_ms < rendering.base_delay_ms {
        errors.push(ValidationError::DelayOrder {
            base: rendering.base_delay_ms,
            max: rendering.max_delay_ms,
        });
    }

    let mut seen = HashSet::new();
    for (i, page) in config.pages.iter().enumerate() {
        let key = route_key(&page.path);
        if key.is_empty() {
            errors.push(ValidationError::EmptyPagePath(i));
        } else if !seen.insert(key) {
            errors.push(ValidationError::DuplicatePage(key.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Path as the route table stores it: "/faq/" and "faq" are the same page.
fn route_key(path: &str) -> &str {
    normalize_path(path.trim())
}
