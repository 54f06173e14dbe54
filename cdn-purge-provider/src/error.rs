use serde::{Deserialize, Serialize};

/// Error returned by every CDN API call.
///
/// `provider` names the backend that failed (`"cloudflare"`), so messages stay
/// readable once they bubble up into a purge result. Serialized with a `code`
/// tag for structured logs.
///
/// Nothing in this crate retries: every error is reported once to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// Connection refused, DNS failure, TLS failure, body read error.
    NetworkError { provider: String, detail: String },

    /// Connect or request timeout.
    Timeout { provider: String, detail: String },

    /// Token rejected (bad, expired or revoked).
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// Token is valid but lacks the zone or purge permission.
    PermissionDenied {
        provider: String,
        raw_message: Option<String>,
    },

    /// The zone id does not exist or is not visible to the token.
    ZoneNotFound {
        provider: String,
        zone: String,
        raw_message: Option<String>,
    },

    /// HTTP 429. `retry_after` comes from the `Retry-After` header.
    RateLimited {
        provider: String,
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    /// Body was not the JSON we expected.
    ParseError { provider: String, detail: String },

    /// Non-2xx status, or an envelope with `success: false`.
    /// `raw_message` joins the envelope's `errors`.
    Api {
        provider: String,
        status: u16,
        raw_message: String,
    },

    /// Anything else the API reported.
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（凭证、权限、资源不存在、限流），用于日志级别。
    ///
    /// `true` → `warn`, `false` → `error`. Keep in sync when adding variants.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::ZoneNotFound { .. }
                | Self::RateLimited { .. }
        )
    }

    /// Name of the provider that produced the error.
    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::InvalidCredentials { provider, .. }
            | Self::PermissionDenied { provider, .. }
            | Self::ZoneNotFound { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::Api { provider, .. }
            | Self::Unknown { provider, .. } => provider,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] ", self.provider())?;
        match self {
            Self::NetworkError { detail, .. } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail, .. } => write!(f, "Request timeout: {detail}"),
            Self::InvalidCredentials { raw_message, .. } => {
                f.write_str("Invalid credentials")?;
                write_suffix(f, raw_message.as_deref())
            }
            Self::PermissionDenied { raw_message, .. } => {
                f.write_str("Permission denied")?;
                write_suffix(f, raw_message.as_deref())
            }
            Self::ZoneNotFound {
                zone, raw_message, ..
            } => {
                write!(f, "Zone '{zone}' not found")?;
                write_suffix(f, raw_message.as_deref())
            }
            Self::RateLimited { retry_after, .. } => match retry_after {
                Some(secs) => write!(f, "Rate limited (retry after {secs}s)"),
                None => f.write_str("Rate limited"),
            },
            Self::ParseError { detail, .. } => write!(f, "Parse error: {detail}"),
            Self::Api {
                status,
                raw_message,
                ..
            } => write!(f, "HTTP {status}: {raw_message}"),
            Self::Unknown { raw_message, .. } => f.write_str(raw_message),
        }
    }
}

fn write_suffix(f: &mut std::fmt::Formatter<'_>, message: Option<&str>) -> std::fmt::Result {
    match message {
        Some(msg) => write!(f, ": {msg}"),
        None => Ok(()),
    }
}

impl std::error::Error for ProviderError {}

pub type Result<T> = std::result::Result<T, ProviderError>;
