//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use cdn_purge_provider::{CdnApi, ClientOptions, ProviderCredentials, create_provider};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 测试上下文 - 封装 Provider 和测试主机名
pub struct TestContext {
    pub provider: Arc<dyn CdnApi>,
    /// Hostname inside a zone the token may purge, e.g. `www.example.com`.
    pub host: String,
    /// Zone name the host belongs to, e.g. `example.com`.
    pub zone_name: String,
    pub account_id: Option<String>,
}

impl TestContext {
    /// 创建 Cloudflare 测试上下文
    pub fn cloudflare() -> Option<Self> {
        let api_token = env::var("CLOUDFLARE_API_TOKEN").ok()?;
        let host = env::var("TEST_ZONE_HOST").ok()?;
        let zone_name = env::var("TEST_ZONE_NAME").ok()?;
        let account_id = env::var("CLOUDFLARE_ACCOUNT_ID").ok();

        let provider = create_provider(
            ProviderCredentials::Cloudflare { api_token },
            &ClientOptions::default(),
        )
        .ok()?;

        Some(Self {
            provider,
            host,
            zone_name,
            account_id,
        })
    }
}
