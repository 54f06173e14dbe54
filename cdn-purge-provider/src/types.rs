//! Public types shared by all CDN providers.

use serde::{Deserialize, Serialize};

/// Default request timeout (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default connect timeout (seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Type-safe provider credentials.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// Cloudflare credentials. Requires feature `cloudflare`.
    #[cfg(feature = "cloudflare")]
    #[serde(rename = "cloudflare")]
    Cloudflare {
        /// Cloudflare API token.
        api_token: String,
    },
}

// Tokens never end up in logs.
impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare { .. } => f
                .debug_struct("Cloudflare")
                .field("api_token", &"***")
                .finish(),
        }
    }
}

/// HTTP client tuning applied when a provider is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Upper bound for a whole request, in seconds.
    pub timeout_secs: u64,
    /// Upper bound for establishing a connection, in seconds.
    pub connect_timeout_secs: u64,
    /// Override for the API base URL (mainly for staging endpoints).
    pub api_base: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            api_base: None,
        }
    }
}

/// A zone record as returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CdnZone {
    /// Provider zone identifier.
    pub id: String,
    /// Zone name, usually the registrable domain.
    pub name: String,
    /// Provider-reported zone status (e.g. `active`).
    #[serde(default)]
    pub status: String,
}

/// Filter for a zone listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneQuery {
    /// Zone name filter.
    pub name: String,
    /// Status filter, e.g. `active`.
    pub status: Option<String>,
    /// Restrict results to one account.
    pub account_id: Option<String>,
}

impl ZoneQuery {
    /// Query for active zones matching `name`.
    pub fn active(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Some("active".to_string()),
            account_id: None,
        }
    }

    /// Restrict the query to an account when one is given.
    #[must_use]
    pub fn with_account(mut self, account_id: Option<String>) -> Self {
        self.account_id = account_id.filter(|id| !id.is_empty());
        self
    }
}

/// Result of a zone listing, in API response order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneList {
    /// Matching zones.
    pub zones: Vec<CdnZone>,
    /// Total count reported by the provider.
    pub total_count: u32,
}

/// Acknowledgement of an accepted purge request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurgeReceipt {
    /// Provider-side id of the purge request.
    #[serde(default)]
    pub id: String,
}
