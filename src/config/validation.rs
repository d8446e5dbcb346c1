//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Resolve the upstream base URL into the authority every request targets
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::uri::Authority;
use url::Url;

use crate::config::schema::{RelayConfig, UpstreamConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),
    #[error("upstream.url `{url}` is invalid: {reason}")]
    UpstreamUrl { url: String, reason: String },
    #[error("upstream.url scheme `{0}` is not supported (plain http only)")]
    UpstreamScheme(String),
    #[error("upstream.connect_timeout_secs must be greater than zero")]
    ConnectTimeout,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Err(e) = UpstreamTarget::from_config(&config.upstream) {
        errors.push(e);
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ConnectTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The resolved `host:port` all outbound requests are sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    authority: Authority,
}

impl UpstreamTarget {
    /// Resolve the configured base URL. Port falls back to 80; any path is ignored.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, ValidationError> {
        let invalid = |reason: String| ValidationError::UpstreamUrl {
            url: config.url.clone(),
            reason,
        };

        let url = Url::parse(&config.url).map_err(|e| invalid(e.to_string()))?;
        if url.scheme() != "http" {
            return Err(ValidationError::UpstreamScheme(url.scheme().to_string()));
        }

        let host = url
            .host_str()
            .ok_or_else(|| invalid("missing host".to_string()))?;
        let port = url.port_or_known_default().unwrap_or(80);

        let authority = Authority::from_str(&format!("{}:{}", host, port))
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self { authority })
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }
}

impl std::fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "http://{}", self.authority)
    }
}
