//! Purge 相关类型定义

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Zone chosen for a zone-query-string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedZone {
    pub zone_id: String,
    pub zone_name: String,
    /// How many zones the provider returned for the query.
    pub candidates: usize,
}

/// A host paired with the zone it will be purged in.
///
/// Only created after a successful zone lookup; lives for one purge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub zone_id: String,
    pub host: String,
}

/// Successful outcome of a purge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeReport {
    pub run_id: String,
    pub purged_hosts: Vec<String>,
    pub message: String,
}

/// Which stage a failed purge run stopped in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PurgeFailureKind {
    Validation,
    ZoneLookup,
    PurgeDispatch,
}

impl PurgeFailureKind {
    /// Classify a core error raised during a purge run.
    #[must_use]
    pub fn of(error: &CoreError) -> Self {
        match error {
            CoreError::ValidationError(_) => Self::Validation,
            CoreError::NoZoneFound(_) | CoreError::ZoneLookup { .. } | CoreError::NoValidZones => {
                Self::ZoneLookup
            }
            _ => Self::PurgeDispatch,
        }
    }
}

/// Outcome of one orchestration run, handed to the caller for display.
///
/// Exactly one of `message` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PurgeResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<PurgeFailureKind>,
    #[serde(default)]
    pub purged_hosts: Vec<String>,
    pub run_id: String,
}

impl PurgeResult {
    /// 创建成功结果
    #[must_use]
    pub fn success(report: PurgeReport) -> Self {
        Self {
            success: true,
            message: Some(report.message),
            error: None,
            error_kind: None,
            purged_hosts: report.purged_hosts,
            run_id: report.run_id,
        }
    }

    /// 创建失败结果
    ///
    /// A dispatch failure keeps the hosts purged before it in `purged_hosts`.
    #[must_use]
    pub fn failure(run_id: String, error: &CoreError) -> Self {
        let purged_hosts = match error {
            CoreError::PurgeDispatch { purged, .. } => purged.clone(),
            _ => Vec::new(),
        };
        Self {
            success: false,
            message: None,
            error: Some(error.to_string()),
            error_kind: Some(PurgeFailureKind::of(error)),
            purged_hosts,
            run_id,
        }
    }

    /// The user-facing text, whichever side it is on.
    pub fn text(&self) -> &str {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or_default()
    }
}
