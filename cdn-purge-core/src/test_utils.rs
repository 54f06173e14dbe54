//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;

use async_trait::async_trait;
use cdn_purge_provider::{
    CdnApi, CdnZone, ProviderError, PurgeReceipt, Result as ProviderResult, ZoneList, ZoneQuery,
};
use tokio::sync::RwLock;

/// Build an active zone record
pub fn zone(id: &str, name: &str) -> CdnZone {
    CdnZone {
        id: id.to_string(),
        name: name.to_string(),
        status: "active".to_string(),
    }
}

// ===== MockCdnApi =====

/// Recording `CdnApi` mock.
///
/// Zone listings are keyed by the queried name; unknown names return an empty
/// listing. Purge calls succeed unless a failure was registered for the zone.
#[derive(Default)]
pub struct MockCdnApi {
    zones: RwLock<HashMap<String, Vec<CdnZone>>>,
    lookup_failures: RwLock<HashMap<String, ProviderError>>,
    purge_failures: RwLock<HashMap<String, ProviderError>>,
    zone_queries: RwLock<Vec<ZoneQuery>>,
    purge_calls: RwLock<Vec<(String, Vec<String>)>>,
}

impl MockCdnApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_zones(&self, query: &str, zones: Vec<CdnZone>) {
        self.zones.write().await.insert(query.to_string(), zones);
    }

    pub async fn fail_lookup(&self, query: &str, error: ProviderError) {
        self.lookup_failures
            .write()
            .await
            .insert(query.to_string(), error);
    }

    pub async fn fail_purge(&self, zone_id: &str, error: ProviderError) {
        self.purge_failures
            .write()
            .await
            .insert(zone_id.to_string(), error);
    }

    pub async fn zone_queries(&self) -> Vec<ZoneQuery> {
        self.zone_queries.read().await.clone()
    }

    pub async fn purge_calls(&self) -> Vec<(String, Vec<String>)> {
        self.purge_calls.read().await.clone()
    }
}

#[async_trait]
impl CdnApi for MockCdnApi {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn validate_credentials(&self) -> ProviderResult<bool> {
        Ok(true)
    }

    async fn list_zones(&self, query: &ZoneQuery) -> ProviderResult<ZoneList> {
        self.zone_queries.write().await.push(query.clone());

        if let Some(err) = self.lookup_failures.read().await.get(&query.name) {
            return Err(err.clone());
        }

        let zones = self
            .zones
            .read()
            .await
            .get(&query.name)
            .cloned()
            .unwrap_or_default();
        let total_count = u32::try_from(zones.len()).unwrap_or(u32::MAX);
        Ok(ZoneList { zones, total_count })
    }

    async fn purge_hosts(&self, zone_id: &str, hosts: &[String]) -> ProviderResult<PurgeReceipt> {
        self.purge_calls
            .write()
            .await
            .push((zone_id.to_string(), hosts.to_vec()));

        if let Some(err) = self.purge_failures.read().await.get(zone_id) {
            return Err(err.clone());
        }

        Ok(PurgeReceipt {
            id: format!("purge-{zone_id}"),
        })
    }
}

/// Transport-level failure as the HTTP layer would report it
pub fn network_error(detail: &str) -> ProviderError {
    ProviderError::NetworkError {
        provider: "mock".to_string(),
        detail: detail.to_string(),
    }
}
