//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge
//! service. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// SPA origin the page-rewrite surface forwards to.
    pub upstream: UpstreamConfig,

    /// Remote REST API the dispatchers fetch content from.
    pub api: ApiConfig,

    /// Site identity and default social content.
    pub social: SocialConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// SPA origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Origin serving the application shell (scheme + host + port).
    pub origin: String,

    /// Timeout for fetching a page from the origin, in seconds.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            origin: "http://127.0.0.1:5173".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Remote API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST API.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.share.example.com".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Site identity and the fixed default social content every failed lookup
/// degrades to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SocialConfig {
    /// Site name used as the title suffix (e.g. "Share").
    pub site_name: String,

    /// Public base URL of the site (no trailing slash).
    pub site_url: String,

    /// Default page title.
    pub default_title: String,

    /// Default page description.
    pub default_description: String,

    /// Default preview image URL.
    pub default_image_url: String,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            site_name: "Share".to_string(),
            site_url: "https://share.example.com".to_string(),
            default_title: "Share".to_string(),
            default_description: "Explore, read docs about, and share libraries".to_string(),
            default_image_url: "https://share.example.com/static/share-social.png".to_string(),
        }
    }
}

impl SocialConfig {
    /// Host portion of the site URL, for display on cards.
    pub fn site_host(&self) -> String {
        url::Url::parse(&self.site_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.site_url.clone())
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
