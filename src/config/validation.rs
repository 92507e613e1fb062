//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, address parses)
//! - Reject dock prefixes that would change route meaning
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("routes.dock_prefix {prefix:?} {reason}")]
    DockPrefix { prefix: String, reason: &'static str },
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let prefix = &config.routes.dock_prefix;
    let prefix_error = |reason| ValidationError::DockPrefix {
        prefix: prefix.clone(),
        reason,
    };
    if prefix.chars().any(char::is_whitespace) {
        errors.push(prefix_error("contains whitespace"));
    }
    if prefix.split('/').any(|s| s.starts_with(':') || s.starts_with('*')) {
        errors.push(prefix_error("contains a path parameter"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
