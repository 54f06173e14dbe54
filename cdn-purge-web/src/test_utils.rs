//! 测试辅助模块

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use cdn_purge_core::crypto::PasswordHash;
use cdn_purge_core::types::{LocalUser, OrchestratorConfig, UserIdentity};
use cdn_purge_core::{AuthError, Authenticator, CdnApi, LocalUserAuthenticator, SessionSigner};
use cdn_purge_provider::{CdnZone, PurgeReceipt, Result as ProviderResult, ZoneList, ZoneQuery};
use chrono::Duration;

use crate::state::AppState;

/// CDN mock knowing a fixed set of zones, keyed by query string
pub struct StaticCdnApi {
    zones: HashMap<String, CdnZone>,
    token_active: bool,
}

impl StaticCdnApi {
    pub fn new(zones: &[(&str, &str, &str)]) -> Self {
        let zones = zones
            .iter()
            .map(|(query, id, name)| {
                (
                    (*query).to_string(),
                    CdnZone {
                        id: (*id).to_string(),
                        name: (*name).to_string(),
                        status: "active".to_string(),
                    },
                )
            })
            .collect();
        Self {
            zones,
            token_active: true,
        }
    }

    /// Same zones, but the API token is reported as rejected
    pub fn with_rejected_token(mut self) -> Self {
        self.token_active = false;
        self
    }
}

#[async_trait]
impl CdnApi for StaticCdnApi {
    fn id(&self) -> &'static str {
        "static"
    }

    async fn validate_credentials(&self) -> ProviderResult<bool> {
        Ok(self.token_active)
    }

    async fn list_zones(&self, query: &ZoneQuery) -> ProviderResult<ZoneList> {
        let zones: Vec<CdnZone> = self.zones.get(&query.name).cloned().into_iter().collect();
        let total_count = u32::try_from(zones.len()).unwrap_or(u32::MAX);
        Ok(ZoneList { zones, total_count })
    }

    async fn purge_hosts(&self, zone_id: &str, _hosts: &[String]) -> ProviderResult<PurgeReceipt> {
        Ok(PurgeReceipt {
            id: format!("purge-{zone_id}"),
        })
    }
}

/// Directory that is always down
pub struct UnavailableAuthenticator;

#[async_trait]
impl Authenticator for UnavailableAuthenticator {
    async fn authenticate(&self, _: &str, _: &str) -> Result<UserIdentity, AuthError> {
        Err(AuthError::Unavailable("connection refused".to_string()))
    }
}

fn user(name: &str, password: &str, groups: &[&str]) -> LocalUser {
    LocalUser {
        username: name.to_string(),
        password_hash: PasswordHash::with_iterations(password, 1_000),
        display_name: None,
        groups: groups.iter().map(ToString::to_string).collect(),
    }
}

/// `admin` may log in, `intern` is outside the permitted group
pub fn test_state() -> web::Data<AppState> {
    test_state_with(test_authenticator())
}

pub fn test_authenticator() -> Arc<dyn Authenticator> {
    Arc::new(LocalUserAuthenticator::new(
        vec![
            user("admin", "admin-pw", &["CDN_Admins"]),
            user("intern", "intern-pw", &["Staff"]),
        ],
        vec!["CDN_Admins".to_string()],
    ))
}

pub fn test_state_with(authenticator: Arc<dyn Authenticator>) -> web::Data<AppState> {
    test_state_from(Arc::new(test_api()), authenticator)
}

/// `www.example.com` and `static.example.com`, both in `zone-1`
pub fn test_api() -> StaticCdnApi {
    StaticCdnApi::new(&[
        ("www.example.com", "zone-1", "example.com"),
        ("static.example.com", "zone-1", "example.com"),
    ])
}

#[allow(clippy::expect_used)]
pub fn test_state_from(
    api: Arc<dyn CdnApi>,
    authenticator: Arc<dyn Authenticator>,
) -> web::Data<AppState> {
    let mut orchestrator = OrchestratorConfig::new("token");
    orchestrator.default_zone_id = Some("zone-default".to_string());

    web::Data::new(AppState {
        api,
        authenticator,
        sessions: SessionSigner::new("test-secret", Duration::minutes(30))
            .expect("valid signer"),
        orchestrator,
        secure_cookie: false,
    })
}
