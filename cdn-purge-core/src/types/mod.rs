//! 类型定义模块

mod auth;
mod config;
mod purge;

pub use auth::{LocalUser, SessionToken, UserIdentity};
pub use config::{DispatchMode, OrchestratorConfig};
pub use purge::{
    PurgeFailureKind, PurgeReport, PurgeResult, ResolvedTarget, ResolvedZone,
};

// Re-export provider types used in core signatures
pub use cdn_purge_provider::{CdnZone, ProviderCredentials, ZoneList, ZoneQuery};
