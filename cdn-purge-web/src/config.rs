//! 应用配置
//!
//! Loaded once at startup from a TOML file, then overridden from the
//! environment. Everything downstream receives its slice explicitly.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use cdn_purge_core::services::DEFAULT_SESSION_TTL_MINUTES;
use cdn_purge_core::types::{LocalUser, OrchestratorConfig};
use serde::Deserialize;

pub const ENV_API_TOKEN: &str = "CDN_PURGE_API_TOKEN";
pub const ENV_ACCOUNT_ID: &str = "CDN_PURGE_ACCOUNT_ID";
pub const ENV_SESSION_SECRET: &str = "CDN_PURGE_SESSION_SECRET";

/// Top-level configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_cdn")]
    pub cdn: OrchestratorConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// 0 → one worker per CPU
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
            workers: 0,
        }
    }
}

impl ServerConfig {
    pub fn worker_count(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }
}

/// Operator authentication and session settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub session_secret: String,
    pub session_ttl_minutes: i64,
    /// Mark the session cookie `Secure` (HTTPS deployments)
    pub secure_cookie: bool,
    /// Empty → every configured user may log in
    pub permitted_groups: Vec<String>,
    pub users: Vec<LocalUser>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
            secure_cookie: false,
            permitted_groups: Vec::new(),
            users: Vec::new(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_secret", &"***")
            .field("session_ttl_minutes", &self.session_ttl_minutes)
            .field("secure_cookie", &self.secure_cookie)
            .field("permitted_groups", &self.permitted_groups)
            .field("users", &self.users)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence
    pub level: String,
    pub json: bool,
    /// Write to a daily rolling file here instead of stdout
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            directory: None,
        }
    }
}

fn default_cdn() -> OrchestratorConfig {
    OrchestratorConfig::new("")
}

impl AppConfig {
    /// Read `path`, apply environment overrides and validate.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::parse(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply overrides from `lookup` (the process environment in production).
    ///
    /// Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(token) = get(ENV_API_TOKEN) {
            self.cdn.api_token = token;
        }
        if let Some(account) = get(ENV_ACCOUNT_ID) {
            self.cdn.account_id = Some(account);
        }
        if let Some(secret) = get(ENV_SESSION_SECRET) {
            self.auth.session_secret = secret;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.cdn.validate()?;
        if self.auth.session_secret.is_empty() {
            bail!("auth.session_secret must not be empty (or set {ENV_SESSION_SECRET})");
        }
        if self.auth.session_ttl_minutes <= 0 {
            bail!("auth.session_ttl_minutes must be greater than zero");
        }
        Ok(())
    }
}
