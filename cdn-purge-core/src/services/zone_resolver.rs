//! Zone resolution
//!
//! Maps a hostname to the provider zone it lives in. Both steps are heuristics:
//! the query string drops one label from deep hostnames, and an ambiguous
//! lookup picks the zone name with the most labels. Neither knows about the
//! public suffix list, so `a.b.example.co.uk` queries `b.example.co.uk`.

use std::sync::Arc;

use cdn_purge_provider::{CdnApi, CdnZone, ZoneQuery};

use crate::error::{CoreError, CoreResult};
use crate::types::ResolvedZone;

/// Hostnames with more labels than this lose their first label before lookup.
const MAX_QUERY_LABELS: usize = 3;

/// Derive the string used to search for a host's zone.
///
/// `www.shop.example.com` → `shop.example.com`; `www.example.com` is unchanged.
pub fn zone_query_for(host: &str) -> String {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() > MAX_QUERY_LABELS {
        labels[1..].join(".")
    } else {
        host.to_string()
    }
}

/// Pick the most specific zone: the one whose name has the most labels.
///
/// Ties keep the zone that came first in API response order.
pub fn most_specific_zone(zones: &[CdnZone]) -> Option<&CdnZone> {
    zones.iter().fold(None, |best: Option<&CdnZone>, zone| match best {
        Some(b) if label_count(&zone.name) <= label_count(&b.name) => Some(b),
        _ => Some(zone),
    })
}

fn label_count(name: &str) -> usize {
    name.split('.').count()
}

/// Zone resolver
pub struct ZoneResolver {
    api: Arc<dyn CdnApi>,
    account_id: Option<String>,
}

impl ZoneResolver {
    /// 创建 zone 解析器
    #[must_use]
    pub fn new(api: Arc<dyn CdnApi>, account_id: Option<String>) -> Self {
        Self { api, account_id }
    }

    /// Look up the active zone matching `query`.
    ///
    /// Upstream failures come back as [`CoreError::Provider`], an empty
    /// listing as [`CoreError::NoZoneFound`].
    pub async fn resolve_zone(&self, query: &str) -> CoreResult<ResolvedZone> {
        log::info!("Fetching zone ID for {query}");

        let zone_query = ZoneQuery::active(query).with_account(self.account_id.clone());
        let listing = self.api.list_zones(&zone_query).await?;

        if listing.zones.len() > 1 {
            log::warn!(
                "Multiple zones found for {query}: {}",
                listing
                    .zones
                    .iter()
                    .map(|z| z.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        let Some(zone) = most_specific_zone(&listing.zones) else {
            log::warn!("No zones found for {query}");
            return Err(CoreError::NoZoneFound(query.to_string()));
        };

        log::info!("Zone ID for {query} is {} ({})", zone.id, zone.name);
        Ok(ResolvedZone {
            zone_id: zone.id.clone(),
            zone_name: zone.name.clone(),
            candidates: listing.zones.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{zone, MockCdnApi};
    use cdn_purge_provider::ProviderError;

    // ---- zone_query_for ----

    #[test]
    fn short_hosts_unchanged() {
        for host in ["example.com", "www.example.com", "localhost", "a.b.c"] {
            assert_eq!(zone_query_for(host), host);
        }
    }

    #[test]
    fn deep_hosts_drop_first_label() {
        assert_eq!(zone_query_for("a.b.example.com"), "b.example.com");
        assert_eq!(zone_query_for("x.y.z.example.com"), "y.z.example.com");
    }

    #[test]
    fn country_code_domains_are_not_special() {
        assert_eq!(zone_query_for("www.example.co.uk"), "example.co.uk");
        assert_eq!(zone_query_for("example.co.uk"), "example.co.uk");
    }

    // ---- most_specific_zone ----

    #[test]
    fn most_labels_wins() {
        let zones = vec![zone("z1", "a.b.com"), zone("z2", "x.a.b.com")];
        assert_eq!(most_specific_zone(&zones).map(|z| z.name.as_str()), Some("x.a.b.com"));
    }

    #[test]
    fn ties_keep_first() {
        let zones = vec![zone("z1", "a.b.com"), zone("z2", "c.d.com")];
        assert_eq!(most_specific_zone(&zones).map(|z| z.id.as_str()), Some("z1"));
    }

    #[test]
    fn empty_has_no_winner() {
        assert!(most_specific_zone(&[]).is_none());
    }

    // ---- resolve_zone ----

    #[tokio::test]
    async fn single_zone_resolves() {
        let api = Arc::new(MockCdnApi::new());
        api.add_zones("example.com", vec![zone("zone-1", "example.com")])
            .await;
        let resolver = ZoneResolver::new(api.clone(), None);

        let resolved = resolver.resolve_zone("example.com").await;
        assert!(
            matches!(&resolved, Ok(r) if r.zone_id == "zone-1" && r.candidates == 1),
            "unexpected result: {resolved:?}"
        );
    }

    #[tokio::test]
    async fn ambiguous_lookup_picks_longest_name() {
        let api = Arc::new(MockCdnApi::new());
        api.add_zones(
            "a.b.com",
            vec![zone("short", "a.b.com"), zone("long", "x.a.b.com")],
        )
        .await;
        let resolver = ZoneResolver::new(api.clone(), None);

        let resolved = resolver.resolve_zone("a.b.com").await;
        assert!(
            matches!(&resolved, Ok(r) if r.zone_id == "long" && r.zone_name == "x.a.b.com" && r.candidates == 2),
            "unexpected result: {resolved:?}"
        );
    }

    #[tokio::test]
    async fn no_zone_is_an_error() {
        let api = Arc::new(MockCdnApi::new());
        let resolver = ZoneResolver::new(api.clone(), None);

        let resolved = resolver.resolve_zone("nothing.example").await;
        assert!(
            matches!(&resolved, Err(CoreError::NoZoneFound(q)) if q == "nothing.example"),
            "unexpected result: {resolved:?}"
        );
    }

    #[tokio::test]
    async fn upstream_failure_is_propagated() {
        let api = Arc::new(MockCdnApi::new());
        api.fail_lookup(
            "example.com",
            ProviderError::Timeout {
                provider: "mock".to_string(),
                detail: "30s elapsed".to_string(),
            },
        )
        .await;
        let resolver = ZoneResolver::new(api.clone(), None);

        let resolved = resolver.resolve_zone("example.com").await;
        assert!(
            matches!(&resolved, Err(CoreError::Provider(ProviderError::Timeout { .. }))),
            "unexpected result: {resolved:?}"
        );
    }

    #[tokio::test]
    async fn query_carries_status_and_account() {
        let api = Arc::new(MockCdnApi::new());
        api.add_zones("example.com", vec![zone("zone-1", "example.com")])
            .await;
        let resolver = ZoneResolver::new(api.clone(), Some("acc-9".to_string()));

        let _ = resolver.resolve_zone("example.com").await;
        let queries = api.zone_queries().await;
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].status.as_deref(), Some("active"));
        assert_eq!(queries[0].account_id.as_deref(), Some("acc-9"));
    }
}
