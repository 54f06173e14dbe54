use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{PurgeReceipt, ZoneList, ZoneQuery};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（各 Provider 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
    /// HTTP 状态码
    pub status: u16,
}

impl RawApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            status,
        }
    }

    pub fn with_code(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            status,
        }
    }
}

/// 错误上下文信息（内部使用）
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Zone id or name the request addressed (for `ZoneNotFound`)
    pub zone: Option<String>,
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：HTTP 层失败（fallback）
    fn api_error(&self, raw: RawApiError) -> ProviderError {
        if raw.status >= 400 {
            ProviderError::Api {
                provider: self.provider_name().to_string(),
                status: raw.status,
                raw_message: raw.message,
            }
        } else {
            ProviderError::Unknown {
                provider: self.provider_name().to_string(),
                raw_code: raw.code,
                raw_message: raw.message,
            }
        }
    }
}

/// CDN API client seam.
///
/// The orchestrator only ever needs these two calls, so tests can swap in a
/// recording mock without touching the network.
#[async_trait]
pub trait CdnApi: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Check that the configured credentials are accepted.
    ///
    /// Rejected credentials give `Ok(false)`; transport failures are errors.
    async fn validate_credentials(&self) -> Result<bool>;

    /// List zones matching the query, in API response order.
    async fn list_zones(&self, query: &ZoneQuery) -> Result<ZoneList>;

    /// Purge cached content for `hosts` within one zone.
    async fn purge_hosts(&self, zone_id: &str, hosts: &[String]) -> Result<PurgeReceipt>;
}
