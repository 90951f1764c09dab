//! Semantic configuration checks.
//!
//! Serde catches shape errors; this module catches values that parse but
//! cannot work (unparsable addresses and URLs, zero timeouts).

use std::net::SocketAddr;

use crate::config::schema::EdgeConfig;

/// A single failed validation, tied to the offending field.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration. Collects every problem rather than
/// stopping at the first.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("not a socket address: {:?}", config.listener.bind_address),
        });
    }

    for (field, value) in [
        ("upstream.origin", &config.upstream.origin),
        ("api.base_url", &config.api.base_url),
        ("social.site_url", &config.social.site_url),
        ("social.default_image_url", &config.social.default_image_url),
    ] {
        if url::Url::parse(value).is_err() {
            errors.push(ValidationError {
                field,
                message: format!("not a valid URL: {value:?}"),
            });
        }
    }

    for (field, value) in [
        ("upstream.timeout_secs", config.upstream.timeout_secs),
        ("api.timeout_secs", config.api.timeout_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError {
                field,
                message: "timeout must be greater than zero".to_string(),
            });
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            message: format!(
                "not a socket address: {:?}",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
