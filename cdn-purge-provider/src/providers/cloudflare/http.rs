//! Cloudflare HTTP 请求方法

use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{CloudflareProvider, CloudflareResponse};

impl CloudflareProvider {
    /// 执行 GET 请求，返回完整响应包（分页信息需要 `result_info`）
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<CloudflareResponse<T>> {
        let url = format!("{}{path}", self.api_base);
        let request = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json");

        let response =
            HttpUtils::send(request, self.provider_name(), &format!("GET {path}")).await?;
        self.unwrap_envelope(response.status, &response.body, context)
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{}{path}", self.api_base);
        if log::log_enabled!(log::Level::Debug) {
            let body_json = serde_json::to_string(body)
                .unwrap_or_else(|_| "<unserializable body>".to_string());
            log::debug!("[cloudflare] Request Body: {body_json}");
        }

        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(body);

        let response =
            HttpUtils::send(request, self.provider_name(), &format!("POST {path}")).await?;
        let envelope: CloudflareResponse<T> =
            self.unwrap_envelope(response.status, &response.body, context)?;

        envelope
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))
    }

    /// 解析 Cloudflare 响应包并把失败转换为 `ProviderError`
    ///
    /// A failure is either a status >= 400 or `success: false` in the body.
    pub(crate) fn unwrap_envelope<T: DeserializeOwned>(
        &self,
        status: u16,
        text: &str,
        context: ErrorContext,
    ) -> Result<CloudflareResponse<T>> {
        let envelope: CloudflareResponse<T> = if status >= 400 {
            match serde_json::from_str(text) {
                Ok(envelope) => envelope,
                Err(e) => {
                    // Gateways in front of the API answer with HTML or plain text.
                    log::error!("[cloudflare] Non-JSON error response (HTTP {status}): {e}");
                    return Err(self.map_error(
                        RawApiError::new(status, truncate_for_log(text)),
                        context,
                    ));
                }
            }
        } else {
            HttpUtils::decode(text, self.provider_name())?
        };

        if status >= 400 || !envelope.success {
            let message = envelope.error_summary();
            log::error!("[cloudflare] API 错误 (HTTP {status}): {message}");
            let raw = match envelope.first_error_code() {
                Some(code) => RawApiError::with_code(status, code, message),
                None => RawApiError::new(status, message),
            };
            return Err(self.map_error(raw, context));
        }

        Ok(envelope)
    }
}
