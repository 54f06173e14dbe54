//! 业务逻辑服务层

mod purge_service;
mod session_service;
mod zone_resolver;

pub use purge_service::{parse_host_list, PurgeOrchestrator};
pub use session_service::{SessionSigner, DEFAULT_SESSION_TTL_MINUTES};
pub use zone_resolver::{most_specific_zone, zone_query_for, ZoneResolver};
