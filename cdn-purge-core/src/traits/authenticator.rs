//! Operator authentication abstract Trait

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::crypto::{PasswordHash, DEFAULT_PASSWORD_ITERATIONS};
use crate::types::{LocalUser, UserIdentity};

/// Authentication failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown user or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Credentials are fine but the user is in none of the permitted groups
    #[error("User {username} is not in any group permitted to access this system")]
    NotPermitted { username: String },

    /// The backend (directory server, etc.) could not be reached
    #[error("Authentication backend unavailable: {0}")]
    Unavailable(String),
}

/// Authenticator Trait
///
/// Platform implementations:
/// - `LocalUserAuthenticator`: users from the configuration file
/// - Directory services plug in behind the same trait
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Check the credentials and return who the operator is
    ///
    /// # Arguments
    /// * `username` - login name
    /// * `password` - plain-text password as submitted
    async fn authenticate(&self, username: &str, password: &str)
        -> Result<UserIdentity, AuthError>;
}

/// Authenticator backed by a fixed list of users
///
/// Passwords are stored as salted PBKDF2 hashes. When `permitted_groups` is
/// non-empty, a user must belong to at least one of them.
///
/// Unknown usernames are checked against `decoy`, so both paths do the same
/// key-derivation work.
pub struct LocalUserAuthenticator {
    users: HashMap<String, LocalUser>,
    permitted_groups: Vec<String>,
    decoy: PasswordHash,
}

impl LocalUserAuthenticator {
    /// Create an authenticator over `users`
    #[must_use]
    pub fn new(users: Vec<LocalUser>, permitted_groups: Vec<String>) -> Self {
        let iterations = users
            .iter()
            .map(|u| u.password_hash.iterations())
            .max()
            .unwrap_or(DEFAULT_PASSWORD_ITERATIONS);
        let decoy = PasswordHash::with_iterations("", iterations);
        let users = users
            .into_iter()
            .map(|u| (u.username.clone(), u))
            .collect();
        Self {
            users,
            permitted_groups,
            decoy,
        }
    }

    /// Number of configured users
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    fn is_permitted(&self, user: &LocalUser) -> bool {
        self.permitted_groups.is_empty()
            || user
                .groups
                .iter()
                .any(|g| self.permitted_groups.iter().any(|p| p == g))
    }
}

#[async_trait]
impl Authenticator for LocalUserAuthenticator {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserIdentity, AuthError> {
        let Some(user) = self.users.get(username) else {
            let _ = self.decoy.verify(password);
            log::warn!("Login attempt for unknown user: {username}");
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password_hash.verify(password) {
            log::warn!("Wrong password for user: {username}");
            return Err(AuthError::InvalidCredentials);
        }

        if !self.is_permitted(user) {
            log::error!(
                "User {username} is not in any of the permitted groups: {:?}",
                self.permitted_groups
            );
            return Err(AuthError::NotPermitted {
                username: username.to_string(),
            });
        }

        Ok(UserIdentity {
            username: user.username.clone(),
            display_name: user
                .display_name
                .clone()
                .unwrap_or_else(|| user.username.clone()),
            groups: user.groups.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: u32 = 1_000;

    fn user(name: &str, password: &str, groups: &[&str]) -> LocalUser {
        LocalUser {
            username: name.to_string(),
            password_hash: PasswordHash::with_iterations(password, FAST),
            display_name: None,
            groups: groups.iter().map(ToString::to_string).collect(),
        }
    }

    #[tokio::test]
    async fn correct_password_authenticates() {
        let auth = LocalUserAuthenticator::new(vec![user("admin", "s3cret", &[])], Vec::new());
        let identity = auth.authenticate("admin", "s3cret").await;
        assert!(
            matches!(&identity, Ok(id) if id.username == "admin" && id.display_name == "admin"),
            "unexpected result: {identity:?}"
        );
    }

    #[tokio::test]
    async fn users_with_same_password_store_different_hashes() {
        let a = user("alice", "shared", &[]);
        let b = user("bob", "shared", &[]);
        assert_ne!(a.password_hash.to_string(), b.password_hash.to_string());

        let auth = LocalUserAuthenticator::new(vec![a, b], Vec::new());
        assert!(auth.authenticate("alice", "shared").await.is_ok());
        assert!(auth.authenticate("bob", "shared").await.is_ok());
    }

    #[tokio::test]
    async fn wrong_password_rejected() {
        let auth = LocalUserAuthenticator::new(vec![user("admin", "s3cret", &[])], Vec::new());
        assert_eq!(
            auth.authenticate("admin", "nope").await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn unknown_user_rejected() {
        let auth = LocalUserAuthenticator::new(vec![user("admin", "s3cret", &[])], Vec::new());
        assert_eq!(
            auth.authenticate("ghost", "s3cret").await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn unknown_user_path_derives_with_configured_cost() {
        let mut slow = user("ops", "pw", &[]);
        slow.password_hash = PasswordHash::with_iterations("pw", 2 * FAST);
        let auth = LocalUserAuthenticator::new(vec![user("admin", "pw", &[]), slow], Vec::new());
        assert_eq!(auth.decoy.iterations(), 2 * FAST);
        assert!(!auth.decoy.verify("pw"));
    }

    #[tokio::test]
    async fn group_filter_applies() {
        let auth = LocalUserAuthenticator::new(
            vec![
                user("ops", "pw", &["CDN_Admins", "Staff"]),
                user("intern", "pw", &["Staff"]),
            ],
            vec!["CDN_Admins".to_string()],
        );

        let ops = auth.authenticate("ops", "pw").await;
        assert!(
            matches!(&ops, Ok(id) if id.groups.len() == 2),
            "unexpected result: {ops:?}"
        );
        assert_eq!(
            auth.authenticate("intern", "pw").await,
            Err(AuthError::NotPermitted {
                username: "intern".to_string()
            })
        );
    }

    #[tokio::test]
    async fn display_name_used_when_present() {
        let mut u = user("joao", "pw", &[]);
        u.display_name = Some("João Operator".to_string());
        let auth = LocalUserAuthenticator::new(vec![u], Vec::new());
        let identity = auth.authenticate("joao", "pw").await;
        assert!(matches!(&identity, Ok(id) if id.display_name == "João Operator"));
        assert_eq!(auth.user_count(), 1);
    }
}
