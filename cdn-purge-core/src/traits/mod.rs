//! Capability abstraction trait definitions

mod authenticator;

pub use authenticator::{AuthError, Authenticator, LocalUserAuthenticator};

// The CDN API seam lives in the provider crate
pub use cdn_purge_provider::CdnApi;
