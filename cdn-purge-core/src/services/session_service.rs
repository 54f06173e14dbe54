//! Session token signing
//!
//! Tokens are stateless: `base64url(username "\n" expiry) "." hex(hmac)`.
//! Nothing is stored server-side, so a token stays valid until it expires.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};

use crate::crypto::{hmac_sha256, verify_hmac_sha256};
use crate::error::{CoreError, CoreResult};
use crate::types::SessionToken;

/// Default session lifetime in minutes
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 30;

/// Issues and verifies signed session tokens
#[derive(Clone)]
pub struct SessionSigner {
    secret: Vec<u8>,
    ttl: Duration,
}

impl SessionSigner {
    /// 创建签名器
    ///
    /// # Errors
    /// An empty secret or a non-positive TTL is a configuration error.
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> CoreResult<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(CoreError::ConfigError(
                "session secret must not be empty".to_string(),
            ));
        }
        if ttl <= Duration::zero() {
            return Err(CoreError::ConfigError(
                "session TTL must be positive".to_string(),
            ));
        }
        Ok(Self {
            secret: secret.to_vec(),
            ttl,
        })
    }

    /// Session lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `username` valid from now.
    pub fn issue(&self, username: &str) -> CoreResult<SessionToken> {
        self.issue_at(username, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, username: &str, now: DateTime<Utc>) -> CoreResult<SessionToken> {
        if username.is_empty() || username.contains('\n') {
            return Err(CoreError::SessionError("Invalid username".to_string()));
        }

        let expires_at = now + self.ttl;
        let payload = format!("{username}\n{}", expires_at.timestamp());
        let signature = hmac_sha256(&self.secret, payload.as_bytes())?;
        let token = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload.as_bytes()),
            hex::encode(signature)
        );

        log::debug!("Issued session for {username}, expires {expires_at}");
        Ok(SessionToken {
            token,
            username: username.to_string(),
            expires_at,
        })
    }

    /// Verify `token` and return the username it was issued to.
    pub fn verify(&self, token: &str) -> CoreResult<String> {
        self.verify_at(token, Utc::now())
    }

    /// Verify `token` as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> CoreResult<String> {
        let (encoded, signature) = token
            .split_once('.')
            .ok_or_else(|| malformed("missing signature"))?;

        let signature = hex::decode(signature).map_err(|_| malformed("bad signature encoding"))?;
        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| malformed("bad payload encoding"))?;

        // Signature first; nothing in the payload is trusted before this.
        if !verify_hmac_sha256(&self.secret, &payload, &signature) {
            return Err(CoreError::SessionError("Invalid signature".to_string()));
        }

        let payload = String::from_utf8(payload).map_err(|_| malformed("payload is not UTF-8"))?;
        let (username, expiry) = payload
            .split_once('\n')
            .ok_or_else(|| malformed("missing expiry"))?;
        let expiry: i64 = expiry.parse().map_err(|_| malformed("bad expiry"))?;

        if now.timestamp() >= expiry {
            return Err(CoreError::SessionError("Session expired".to_string()));
        }

        Ok(username.to_string())
    }
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner")
            .field("secret", &"***")
            .field("ttl", &self.ttl)
            .finish()
    }
}

fn malformed(reason: &str) -> CoreError {
    CoreError::SessionError(format!("Malformed token: {reason}"))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn signer() -> SessionSigner {
        match SessionSigner::new("test-secret", Duration::minutes(30)) {
            Ok(s) => s,
            Err(e) => panic!("signer: {e}"),
        }
    }

    fn issue(signer: &SessionSigner, user: &str, now: DateTime<Utc>) -> SessionToken {
        match signer.issue_at(user, now) {
            Ok(t) => t,
            Err(e) => panic!("issue: {e}"),
        }
    }

    #[test]
    fn issued_token_verifies() {
        let signer = signer();
        let now = Utc::now();
        let token = issue(&signer, "admin", now);

        assert_eq!(token.expires_at, now + Duration::minutes(30));
        let user = signer.verify_at(&token.token, now + Duration::minutes(5));
        assert!(matches!(&user, Ok(u) if u == "admin"), "unexpected result: {user:?}");
    }

    #[test]
    fn expired_token_rejected() {
        let signer = signer();
        let now = Utc::now();
        let token = issue(&signer, "admin", now);

        let result = signer.verify_at(&token.token, now + Duration::minutes(31));
        assert!(
            matches!(&result, Err(CoreError::SessionError(m)) if m == "Session expired"),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn tampered_payload_rejected() {
        let signer = signer();
        let token = issue(&signer, "intern", Utc::now());
        let (_, sig) = token.token.split_once('.').unwrap_or_default();
        let forged = format!(
            "{}.{sig}",
            URL_SAFE_NO_PAD.encode(format!("admin\n{}", token.expires_at.timestamp()))
        );

        let result = signer.verify(&forged);
        assert!(
            matches!(&result, Err(CoreError::SessionError(m)) if m == "Invalid signature"),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn other_secret_rejected() {
        let token = issue(&signer(), "admin", Utc::now());
        let other = match SessionSigner::new("another-secret", Duration::minutes(30)) {
            Ok(s) => s,
            Err(e) => panic!("signer: {e}"),
        };
        assert!(other.verify(&token.token).is_err());
    }

    #[test]
    fn garbage_rejected() {
        let signer = signer();
        for token in ["", "no-dot", "abc.zz", "!!!.00", "."] {
            assert!(signer.verify(token).is_err(), "accepted {token:?}");
        }
    }

    #[test]
    fn invalid_construction_rejected() {
        assert!(SessionSigner::new("", Duration::minutes(30)).is_err());
        assert!(SessionSigner::new("secret", Duration::zero()).is_err());
    }

    #[test]
    fn newline_in_username_rejected() {
        assert!(signer().issue("admin\n99999999999").is_err());
    }

    #[test]
    fn debug_hides_secret() {
        assert!(!format!("{:?}", signer()).contains("test-secret"));
    }
}
