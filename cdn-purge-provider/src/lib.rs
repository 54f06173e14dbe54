//! # cdn-purge-provider
//!
//! A thin CDN API client used to look up zones and purge cached content.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | Bearer Token |
//!
//! ## Feature Flags
//!
//! - **`cloudflare`** *(default)*: Enable the Cloudflare provider.
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for static and cross-compiled builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cdn_purge_provider::{create_provider, ClientOptions, ProviderCredentials, ZoneQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = ProviderCredentials::Cloudflare {
//!         api_token: "your-token".to_string(),
//!     };
//!     let provider = create_provider(credentials, &ClientOptions::default())?;
//!
//!     let zones = provider.list_zones(&ZoneQuery::active("example.com")).await?;
//!     if let Some(zone) = zones.zones.first() {
//!         provider
//!             .purge_hosts(&zone.id, &["www.example.com".to_string()])
//!             .await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError).
//! Non-2xx answers surface the provider's `errors` messages, transport
//! failures surface the underlying error text. Requests are never retried.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::create_provider;

// Re-export core trait only (internal traits are not exported)
pub use traits::CdnApi;

// Re-export types
pub use types::{
    CdnZone, ClientOptions, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    ProviderCredentials, PurgeReceipt, ZoneList, ZoneQuery,
};

// Re-export utils module
pub use utils::log_sanitizer;

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "cloudflare")]
pub use providers::CloudflareProvider;
