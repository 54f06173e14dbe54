//! 认证相关类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::PasswordHash;

/// Identity of an authenticated operator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// A locally configured operator account.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalUser {
    pub username: String,
    /// `pbkdf2-sha256$<iterations>$<salt-hex>$<hash-hex>`
    pub password_hash: PasswordHash,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl std::fmt::Debug for LocalUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalUser")
            .field("username", &self.username)
            .field("display_name", &self.display_name)
            .field("groups", &self.groups)
            .finish_non_exhaustive()
    }
}

/// A signed session token handed to the browser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    pub token: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}
