//! HTTP exchange helpers shared by providers
//!
//! Providers build their own `RequestBuilder` (URL, auth, body). This module
//! sends it once, logs the exchange and classifies transport failures. Nothing
//! here retries.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Status and body of one completed HTTP exchange, error statuses included.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

pub struct HttpUtils;

impl HttpUtils {
    /// Send `request` and read the whole body.
    ///
    /// `label` is only used in log lines (e.g. `"GET /zones"`).
    ///
    /// HTTP 429 becomes [`ProviderError::RateLimited`]; a timeout becomes
    /// [`ProviderError::Timeout`]; any other transport failure becomes
    /// [`ProviderError::NetworkError`]. Every other status is returned as-is.
    pub async fn send(
        request: RequestBuilder,
        provider: &str,
        label: &str,
    ) -> Result<RawResponse, ProviderError> {
        log::debug!("[{provider}] {label}");

        let response = request.send().await.map_err(|e| {
            log::error!("[{provider}] {label} failed: {e}");
            transport_error(provider, &e)
        })?;

        let status = response.status();
        log::info!("[{provider}] {label} -> {}", status.as_u16());

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider}] {label} rate limited, retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider.to_string(),
                retry_after,
                raw_message: Some(truncate_for_log(&body)),
            });
        }

        let body = response.text().await.map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to read response body: {e}"),
        })?;

        let raw = RawResponse {
            status: status.as_u16(),
            body,
        };
        if raw.is_error() {
            log::warn!("[{provider}] {label} error body: {}", truncate_for_log(&raw.body));
        } else {
            log::debug!("[{provider}] {label} body: {}", truncate_for_log(&raw.body));
        }
        Ok(raw)
    }

    /// Deserialize a JSON body, mapping failures to [`ProviderError::ParseError`].
    pub fn decode<T: DeserializeOwned>(body: &str, provider: &str) -> Result<T, ProviderError> {
        serde_json::from_str(body).map_err(|e| {
            log::error!(
                "[{provider}] Unparseable response ({e}): {}",
                truncate_for_log(body)
            );
            ProviderError::ParseError {
                provider: provider.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

fn transport_error(provider: &str, error: &reqwest::Error) -> ProviderError {
    let provider = provider.to_string();
    let detail = error.to_string();
    if error.is_timeout() {
        ProviderError::Timeout { provider, detail }
    } else {
        ProviderError::NetworkError { provider, detail }
    }
}
