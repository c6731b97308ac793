//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check that location paths are absolute and properly nested
//! - Detect duplicate locations
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GateConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{GateConfig, LocationConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address `{0}`")]
    InvalidBindAddress(String),

    #[error("invalid metrics address `{0}`")]
    InvalidMetricsAddress(String),

    #[error("listener.max_concurrent_requests must be greater than zero")]
    ZeroConcurrency,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("location path `{0}` must start with `/`")]
    RelativeLocation(String),

    #[error("location `{child}` is outside of enclosing location `{parent}`")]
    LocationOutsideParent { parent: String, child: String },

    #[error("location `{0}` is defined more than once")]
    DuplicateLocation(String),
}

/// Check a parsed configuration.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.listener.max_concurrent_requests == 0 {
        errors.push(ValidationError::ZeroConcurrency);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    let mut seen = HashSet::new();
    check_locations(&config.server.locations, None, &mut seen, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_locations<'a>(
    locations: &'a [LocationConfig],
    parent: Option<&str>,
    seen: &mut HashSet<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    for location in locations {
        let path = location.path.as_str();

        if !path.starts_with('/') {
            errors.push(ValidationError::RelativeLocation(path.to_string()));
        }

        if let Some(parent) = parent {
            if !path.starts_with(parent) {
                errors.push(ValidationError::LocationOutsideParent {
                    parent: parent.to_string(),
                    child: path.to_string(),
                });
            }
        }

        if !seen.insert(path) {
            errors.push(ValidationError::DuplicateLocation(path.to_string()));
        }

        check_locations(&location.scope.locations, Some(path), seen, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GateConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = GateConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.listener.max_concurrent_requests = 0;
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidBindAddress("not-an-address".into()),
                ValidationError::ZeroConcurrency,
                ValidationError::ZeroRequestTimeout,
            ]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = GateConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidMetricsAddress("nowhere".into())]
        );
    }

    #[test]
    fn test_location_paths() {
        let mut api = LocationConfig::new("/api");
        api.scope.locations.push(LocationConfig::new("/api/check"));
        api.scope.locations.push(LocationConfig::new("/other"));

        let mut config = GateConfig::default();
        config.server.locations.push(api);
        config.server.locations.push(LocationConfig::new("check"));
        config.server.locations.push(LocationConfig::new("/api/check"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::LocationOutsideParent {
                    parent: "/api".into(),
                    child: "/other".into(),
                },
                ValidationError::RelativeLocation("check".into()),
                ValidationError::DuplicateLocation("/api/check".into()),
            ]
        );
    }
}
