//! Shared application state
//!
//! Built once at startup and handed to every worker; all fields are immutable.

use std::sync::Arc;

use anyhow::Context;
use cdn_purge_core::types::OrchestratorConfig;
use cdn_purge_core::{Authenticator, CdnApi, LocalUserAuthenticator, SessionSigner};
use chrono::Duration;

use crate::config::AppConfig;

pub struct AppState {
    pub api: Arc<dyn CdnApi>,
    pub authenticator: Arc<dyn Authenticator>,
    pub sessions: SessionSigner,
    pub orchestrator: OrchestratorConfig,
    pub secure_cookie: bool,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let api = config.cdn.build_api()?;
        let ttl = Duration::try_minutes(config.auth.session_ttl_minutes)
            .context("auth.session_ttl_minutes is out of range")?;
        let sessions = SessionSigner::new(&config.auth.session_secret, ttl)?;

        let authenticator = LocalUserAuthenticator::new(
            config.auth.users.clone(),
            config.auth.permitted_groups.clone(),
        );
        if authenticator.user_count() == 0 {
            tracing::warn!("No operator accounts configured; nobody will be able to log in");
        }

        Ok(Self {
            api,
            authenticator: Arc::new(authenticator),
            sessions,
            orchestrator: config.cdn.clone(),
            secure_cookie: config.auth.secure_cookie,
        })
    }
}
