//! Orchestrator configuration

use std::sync::Arc;

use cdn_purge_provider::{
    create_provider, CdnApi, ClientOptions, ProviderCredentials, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// How resolved targets are dispatched.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Purge every resolved target in order; stop at the first failure.
    #[default]
    #[serde(alias = "all")]
    AllTargets,
    /// Report the outcome of the first target only; later targets are not purged.
    #[serde(alias = "first")]
    FirstResult,
}

/// Everything a purge orchestrator needs, passed in explicitly.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// May be left out of the file and supplied through the environment.
    #[serde(default)]
    pub api_token: String,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub default_zone_id: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub dispatch_mode: DispatchMode,
    /// API base override, mainly for staging endpoints.
    #[serde(default)]
    pub api_base: Option<String>,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl OrchestratorConfig {
    /// Config with defaults for everything but the token.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            account_id: None,
            default_zone_id: None,
            timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
            dispatch_mode: DispatchMode::default(),
            api_base: None,
        }
    }

    /// Reject settings the orchestrator cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.api_token.trim().is_empty() {
            return Err(CoreError::ConfigError("api_token must not be empty".to_string()));
        }
        if self.timeout_seconds == 0 {
            return Err(CoreError::ConfigError(
                "timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// HTTP client options derived from this config.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout_secs: self.timeout_seconds,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS.min(self.timeout_seconds),
            api_base: self.api_base.clone(),
        }
    }

    /// Build the shared CDN API client.
    pub fn build_api(&self) -> CoreResult<Arc<dyn CdnApi>> {
        self.validate()?;
        let credentials = ProviderCredentials::Cloudflare {
            api_token: self.api_token.clone(),
        };
        Ok(create_provider(credentials, &self.client_options())?)
    }
}

// Tokens never end up in logs.
impl std::fmt::Debug for OrchestratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrchestratorConfig")
            .field("api_token", &"***")
            .field("account_id", &self.account_id)
            .field("default_zone_id", &self.default_zone_id)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("dispatch_mode", &self.dispatch_mode)
            .field("api_base", &self.api_base)
            .finish()
    }
}
