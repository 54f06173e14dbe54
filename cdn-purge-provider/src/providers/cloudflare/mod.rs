//! Cloudflare CDN Provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{create_http_client, normalize_base_url};
use crate::types::ClientOptions;
use crate::utils::log_sanitizer::mask_secret;

pub(crate) use types::{CloudflareResponse, CloudflareZone, PurgeCacheBody};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare Zones API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_ZONES: u32 = 50;

/// Cloudflare CDN Provider
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) api_token: String,
    pub(crate) api_base: String,
}

impl CloudflareProvider {
    /// Build a provider with its own HTTP client.
    pub fn new(api_token: String, options: &ClientOptions) -> Result<Self> {
        let client = create_http_client(options, "cloudflare")?;
        Ok(Self::with_client(client, api_token, options.api_base.as_deref()))
    }

    /// Build a provider around an existing client (shares its connection pool).
    pub fn with_client(client: Client, api_token: String, api_base: Option<&str>) -> Self {
        let api_base = api_base.map_or_else(|| CF_API_BASE.to_string(), normalize_base_url);
        log::debug!(
            "[cloudflare] client ready, base={api_base}, token={}",
            mask_secret(&api_token)
        );
        Self {
            client,
            api_token,
            api_base,
        }
    }
}

impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_base", &self.api_base)
            .field("api_token", &mask_secret(&self.api_token))
            .finish_non_exhaustive()
    }
}
