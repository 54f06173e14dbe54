//! Cache purge orchestration
//!
//! One run validates the host list, resolves every host to a zone (fail-fast),
//! then dispatches one purge call per resolved host. Nothing is cached between
//! runs and nothing is retried.

use std::sync::Arc;

use cdn_purge_provider::CdnApi;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::services::zone_resolver::{zone_query_for, ZoneResolver};
use crate::types::{
    DispatchMode, OrchestratorConfig, PurgeReport, PurgeResult, ResolvedTarget,
};

const NO_HOSTS_MESSAGE: &str = "No hosts provided for cache purge";

/// Split a comma-separated host field into hostnames.
///
/// Entries are trimmed and empty ones dropped; order is kept.
pub fn parse_host_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Purge orchestrator
///
/// Request-scoped: build one per purge request from the shared API client.
pub struct PurgeOrchestrator {
    api: Arc<dyn CdnApi>,
    resolver: ZoneResolver,
    config: OrchestratorConfig,
}

impl PurgeOrchestrator {
    /// 创建 purge 编排器
    #[must_use]
    pub fn new(api: Arc<dyn CdnApi>, config: OrchestratorConfig) -> Self {
        let resolver = ZoneResolver::new(Arc::clone(&api), config.account_id.clone());
        Self {
            api,
            resolver,
            config,
        }
    }

    /// Resolve and purge `hosts`, reporting the outcome as a result object.
    ///
    /// Never fails: every error is folded into a `PurgeResult` with `success == false`.
    pub async fn purge(&self, hosts: &[String]) -> PurgeResult {
        let run_id = Uuid::new_v4().to_string();
        match self.run(hosts, &run_id).await {
            Ok(report) => PurgeResult::success(report),
            Err(e) => Self::failure(run_id, &e),
        }
    }

    /// Same as [`purge`](Self::purge) but propagates the error.
    pub async fn try_purge(&self, hosts: &[String]) -> CoreResult<PurgeReport> {
        self.run(hosts, &Uuid::new_v4().to_string()).await
    }

    /// Purge all `hosts` in the configured default zone with a single call,
    /// skipping zone resolution.
    pub async fn purge_default_zone(&self, hosts: &[String]) -> PurgeResult {
        let run_id = Uuid::new_v4().to_string();
        match self.run_default_zone(hosts, &run_id).await {
            Ok(report) => PurgeResult::success(report),
            Err(e) => Self::failure(run_id, &e),
        }
    }

    async fn run(&self, hosts: &[String], run_id: &str) -> CoreResult<PurgeReport> {
        validate_hosts(hosts)?;
        log::info!("[{run_id}] Hosts to purge: {}", hosts.join(", "));

        let targets = self.resolve_targets(hosts, run_id).await?;
        if targets.is_empty() {
            log::warn!("[{run_id}] No valid zone IDs found for cache purge");
            return Err(CoreError::NoValidZones);
        }

        match self.config.dispatch_mode {
            DispatchMode::AllTargets => self.dispatch_all(&targets, run_id).await,
            DispatchMode::FirstResult => self.dispatch_first(&targets, run_id).await,
        }
    }

    /// Resolve phase: the first failing host aborts the run.
    async fn resolve_targets(
        &self,
        hosts: &[String],
        run_id: &str,
    ) -> CoreResult<Vec<ResolvedTarget>> {
        let mut targets = Vec::with_capacity(hosts.len());

        for host in hosts {
            let query = zone_query_for(host);
            match self.resolver.resolve_zone(&query).await {
                Ok(zone) => {
                    log::info!("[{run_id}] {host} -> zone {} ({})", zone.zone_id, zone.zone_name);
                    targets.push(ResolvedTarget {
                        zone_id: zone.zone_id,
                        host: host.clone(),
                    });
                }
                Err(e) => {
                    log::error!("[{run_id}] Failed to get zone ID for {query}: {e}");
                    return Err(CoreError::ZoneLookup {
                        query,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(targets)
    }

    /// Dispatch every target; the first failure halts the run.
    async fn dispatch_all(
        &self,
        targets: &[ResolvedTarget],
        run_id: &str,
    ) -> CoreResult<PurgeReport> {
        let mut purged = Vec::with_capacity(targets.len());
        for target in targets {
            if let Err(e) = self.dispatch_one(target, run_id).await {
                if !purged.is_empty() {
                    log::warn!(
                        "[{run_id}] Run halted after purging: {}",
                        purged.join(", ")
                    );
                }
                return Err(e.with_purged(purged));
            }
            purged.push(target.host.clone());
        }

        Ok(PurgeReport {
            run_id: run_id.to_string(),
            message: format!("Cache purged successfully for {}", purged.join(", ")),
            purged_hosts: purged,
        })
    }

    /// Dispatch only the first target and report its outcome.
    async fn dispatch_first(
        &self,
        targets: &[ResolvedTarget],
        run_id: &str,
    ) -> CoreResult<PurgeReport> {
        let Some(first) = targets.first() else {
            return Err(CoreError::NoValidZones);
        };
        if targets.len() > 1 {
            log::warn!(
                "[{run_id}] Only the first of {} resolved hosts will be purged",
                targets.len()
            );
        }

        self.dispatch_one(first, run_id).await?;
        Ok(PurgeReport {
            run_id: run_id.to_string(),
            message: format!("Cache purged successfully for {}", first.host),
            purged_hosts: vec![first.host.clone()],
        })
    }

    async fn dispatch_one(&self, target: &ResolvedTarget, run_id: &str) -> CoreResult<()> {
        log::info!(
            "[{run_id}] Zone ID: {}, Host: {}",
            target.zone_id,
            target.host
        );
        match self
            .api
            .purge_hosts(&target.zone_id, std::slice::from_ref(&target.host))
            .await
        {
            Ok(receipt) => {
                log::info!(
                    "[{run_id}] Cache purged successfully for {} (request {})",
                    target.host,
                    receipt.id
                );
                Ok(())
            }
            Err(e) => {
                log::error!("[{run_id}] Failed to purge cache for {}: {e}", target.host);
                Err(CoreError::PurgeDispatch {
                    host: target.host.clone(),
                    message: e.to_string(),
                    purged: Vec::new(),
                })
            }
        }
    }

    async fn run_default_zone(&self, hosts: &[String], run_id: &str) -> CoreResult<PurgeReport> {
        validate_hosts(hosts)?;
        let Some(zone_id) = self
            .config
            .default_zone_id
            .as_deref()
            .filter(|z| !z.is_empty())
        else {
            return Err(CoreError::ValidationError(
                "No default zone configured".to_string(),
            ));
        };

        log::info!(
            "[{run_id}] Purging {} in default zone {zone_id}",
            hosts.join(", ")
        );
        match self.api.purge_hosts(zone_id, hosts).await {
            Ok(_) => Ok(PurgeReport {
                run_id: run_id.to_string(),
                message: format!("Cache purged successfully for {}", hosts.join(", ")),
                purged_hosts: hosts.to_vec(),
            }),
            Err(e) => {
                log::error!("[{run_id}] Failed to purge default zone {zone_id}: {e}");
                Err(CoreError::PurgeDispatch {
                    host: hosts.join(", "),
                    message: e.to_string(),
                    purged: Vec::new(),
                })
            }
        }
    }

    fn failure(run_id: String, error: &CoreError) -> PurgeResult {
        if error.is_expected() {
            log::warn!("[{run_id}] Purge rejected: {error}");
        } else {
            log::error!("[{run_id}] Purge failed: {error}");
        }
        PurgeResult::failure(run_id, error)
    }
}

/// Empty list or an empty first entry means nothing was submitted.
fn validate_hosts(hosts: &[String]) -> CoreResult<()> {
    match hosts.first() {
        None => Err(CoreError::ValidationError(NO_HOSTS_MESSAGE.to_string())),
        Some(first) if first.is_empty() => {
            log::warn!("Empty hosts list provided for cache purge");
            Err(CoreError::ValidationError(NO_HOSTS_MESSAGE.to_string()))
        }
        Some(_) => match hosts.iter().position(String::is_empty) {
            Some(index) => Err(CoreError::ValidationError(format!(
                "Empty hostname at position {}",
                index + 1
            ))),
            None => Ok(()),
        },
    }
}
