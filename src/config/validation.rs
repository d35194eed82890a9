//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check path pattern syntax for every route
//! - Validate value ranges and addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TableConfig → Result<(), Vec<ValidationError>>
//! - Declaration conflicts are left to the tree builder

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::TableConfig;
use crate::routing::segment::SegmentError;
use crate::routing::sub_route::parse_pattern;
use crate::routing::HttpMethod;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} ({method} {path}) has an empty handler")]
    EmptyHandler {
        index: usize,
        method: HttpMethod,
        path: String,
    },

    #[error("route #{index} ({method} {path}) has an empty auth requirement")]
    EmptyAuth {
        index: usize,
        method: HttpMethod,
        path: String,
    },

    #[error("route #{index} ({method} {path}) has an invalid pattern: {source}")]
    InvalidPattern {
        index: usize,
        method: HttpMethod,
        path: String,
        source: SegmentError,
    },

    #[error("invalid {field} `{value}`")]
    InvalidAddress { field: &'static str, value: String },

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Check a parsed configuration.
pub fn validate_config(config: &TableConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "server.bind_address",
            value: config.server.bind_address.clone(),
        });
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    for (index, route) in config.routes.iter().enumerate() {
        if route.handler.trim().is_empty() {
            errors.push(ValidationError::EmptyHandler {
                index,
                method: route.method,
                path: route.path.clone(),
            });
        }

        if route.auth.as_deref().is_some_and(|auth| auth.trim().is_empty()) {
            errors.push(ValidationError::EmptyAuth {
                index,
                method: route.method,
                path: route.path.clone(),
            });
        }

        if let Err(source) = parse_pattern(&route.path) {
            errors.push(ValidationError::InvalidPattern {
                index,
                method: route.method,
                path: route.path.clone(),
                source,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
