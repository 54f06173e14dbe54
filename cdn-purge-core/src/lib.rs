//! CDN Purge Core Library
//!
//! Core business logic for the cache purge front-end:
//! - Zone resolution (hostname → zone query → zone id)
//! - Purge orchestration (validate, resolve all, dispatch)
//! - Operator authentication and signed sessions
//!
//! The CDN API and the user directory are reached through traits, so the web
//! layer (or a test) injects whichever implementation it needs.

pub mod crypto;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{parse_host_list, PurgeOrchestrator, SessionSigner, ZoneResolver};
pub use traits::{AuthError, Authenticator, CdnApi, LocalUserAuthenticator};
