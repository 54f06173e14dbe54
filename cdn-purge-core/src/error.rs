//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use cdn_purge_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Empty or malformed host list
    #[error("{0}")]
    ValidationError(String),

    /// The provider returned no zone for a query string
    #[error("No zones found for {0}")]
    NoZoneFound(String),

    /// Resolving one host's zone failed; the whole purge is aborted
    #[error("Failed to get zone ID for {query}: {message}")]
    ZoneLookup { query: String, message: String },

    /// The resolve phase produced no targets
    #[error("No valid zone IDs found for cache purge")]
    NoValidZones,

    /// The purge call for a host failed
    ///
    /// `purged` lists the hosts of the same run that were already purged.
    #[error("Failed to purge cache for {host}: {message}")]
    PurgeDispatch {
        host: String,
        message: String,
        purged: Vec<String>,
    },

    /// Session token could not be verified
    #[error("Session error: {0}")]
    SessionError(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.), used for log levels.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_)
            | Self::NoZoneFound(_)
            | Self::NoValidZones
            | Self::SessionError(_) => true,
            Self::Provider(e) => e.is_expected(),
            _ => false,
        }
    }

    /// Attach the hosts already purged in this run to a dispatch failure.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_purged(self, hosts: Vec<String>) -> Self {
        match self {
            Self::PurgeDispatch { host, message, .. } => Self::PurgeDispatch {
                host,
                message,
                purged: hosts,
            },
            other => other,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_lookup_message() {
        let e = CoreError::ZoneLookup {
            query: "example.com".to_string(),
            message: "No zones found for example.com".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Failed to get zone ID for example.com: No zones found for example.com"
        );
    }

    #[test]
    fn provider_error_passes_through_display() {
        let e: CoreError = ProviderError::NetworkError {
            provider: "cloudflare".to_string(),
            detail: "connection refused".to_string(),
        }
        .into();
        assert_eq!(e.to_string(), "[cloudflare] Network error: connection refused");
        assert!(!e.is_expected());
    }

    #[test]
    fn validation_is_expected() {
        assert!(CoreError::ValidationError("x".to_string()).is_expected());
        assert!(!CoreError::PurgeDispatch {
            host: "a".to_string(),
            message: "b".to_string(),
            purged: Vec::new(),
        }
        .is_expected());
    }

    #[test]
    fn serializes_tagged() {
        let json = serde_json::to_value(CoreError::NoValidZones).unwrap_or_default();
        assert_eq!(json["code"], "NoValidZones");
    }
}
