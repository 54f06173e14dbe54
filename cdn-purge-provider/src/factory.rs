//! Provider factory functions.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::CdnApi;
use crate::types::{ClientOptions, ProviderCredentials};

#[cfg(feature = "cloudflare")]
use crate::providers::CloudflareProvider;

/// Creates a [`CdnApi`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`] variant.
/// The returned provider is wrapped in `Arc<dyn CdnApi>` so one client (and its
/// connection pool) can be shared by every request.
///
/// # Examples
///
/// ```rust,no_run
/// use cdn_purge_provider::{create_provider, ClientOptions, ProviderCredentials};
///
/// let provider = create_provider(
///     ProviderCredentials::Cloudflare {
///         api_token: "your-token".to_string(),
///     },
///     &ClientOptions::default(),
/// )
/// .unwrap();
/// ```
pub fn create_provider(
    credentials: ProviderCredentials,
    options: &ClientOptions,
) -> Result<Arc<dyn CdnApi>> {
    match credentials {
        #[cfg(feature = "cloudflare")]
        ProviderCredentials::Cloudflare { api_token } => {
            Ok(Arc::new(CloudflareProvider::new(api_token, options)?))
        }
    }
}
