//! Provider 公共工具函数

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::types::ClientOptions;

// ============ HTTP Client ============

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(options: &ClientOptions, provider: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(options.connect_timeout_secs))
        .timeout(Duration::from_secs(options.timeout_secs))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ 域名名称处理 ============

/// 去掉域名末尾的点
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// 去掉 URL 末尾的斜杠
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
