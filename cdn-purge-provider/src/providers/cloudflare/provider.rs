//! Cloudflare `CdnApi` trait 实现

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ProviderError, Result};
use crate::providers::common::normalize_domain_name;
use crate::traits::{CdnApi, ErrorContext};
use crate::types::{CdnZone, PurgeReceipt, ZoneList, ZoneQuery};

use super::{CloudflareProvider, CloudflareZone, MAX_PAGE_SIZE_ZONES, PurgeCacheBody};

impl CloudflareProvider {
    /// 将 Cloudflare zone 转换为 `CdnZone`
    pub(crate) fn zone_to_cdn_zone(zone: CloudflareZone) -> CdnZone {
        CdnZone {
            id: zone.id,
            name: normalize_domain_name(&zone.name),
            status: zone.status,
        }
    }

    /// 构建 `/zones` 查询路径
    pub(crate) fn zones_path(query: &ZoneQuery) -> String {
        let mut path = format!(
            "/zones?name={}&per_page={MAX_PAGE_SIZE_ZONES}",
            urlencoding::encode(&query.name)
        );
        if let Some(ref status) = query.status {
            path.push_str(&format!("&status={}", urlencoding::encode(status)));
        }
        if let Some(ref account_id) = query.account_id {
            path.push_str(&format!("&account.id={}", urlencoding::encode(account_id)));
        }
        path
    }
}

/// `/user/tokens/verify` payload
#[derive(Deserialize)]
pub(crate) struct TokenStatus {
    status: String,
}

impl TokenStatus {
    pub(crate) fn is_active(&self) -> bool {
        self.status == "active"
    }
}

#[async_trait]
impl CdnApi for CloudflareProvider {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn validate_credentials(&self) -> Result<bool> {
        match self
            .get::<TokenStatus>("/user/tokens/verify", ErrorContext::default())
            .await
        {
            Ok(envelope) => Ok(envelope.result.is_some_and(|t| t.is_active())),
            Err(ProviderError::InvalidCredentials { raw_message, .. }) => {
                log::warn!(
                    "[cloudflare] Token rejected: {}",
                    raw_message.unwrap_or_default()
                );
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn list_zones(&self, query: &ZoneQuery) -> Result<ZoneList> {
        let context = ErrorContext {
            zone: Some(query.name.clone()),
        };
        let envelope = self
            .get::<Vec<CloudflareZone>>(&Self::zones_path(query), context)
            .await?;

        let zones: Vec<CdnZone> = envelope
            .result
            .unwrap_or_default()
            .into_iter()
            .map(Self::zone_to_cdn_zone)
            .collect();
        let total_count = envelope.result_info.map_or_else(
            || u32::try_from(zones.len()).unwrap_or(u32::MAX),
            |info| info.total_count,
        );

        Ok(ZoneList { zones, total_count })
    }

    async fn purge_hosts(&self, zone_id: &str, hosts: &[String]) -> Result<PurgeReceipt> {
        let context = ErrorContext {
            zone: Some(zone_id.to_string()),
        };
        self.post(
            &format!("/zones/{}/purge_cache", urlencoding::encode(zone_id)),
            &PurgeCacheBody { hosts },
            context,
        )
        .await
    }
}
