//! 操作员密码哈希
//!
//! Stored form: `pbkdf2-sha256$<iterations>$<salt-hex>$<hash-hex>`. The
//! iteration count travels with each hash, so raising the default leaves
//! existing entries verifiable.

use std::fmt;

use pbkdf2::pbkdf2_hmac_array;
use rand::RngCore;
use sha2::Sha256;

use super::constant_time_eq;
use crate::error::{CoreError, CoreResult};

/// Scheme tag of the stored form
pub const PASSWORD_SCHEME: &str = "pbkdf2-sha256";

/// PBKDF2-HMAC-SHA256, 600,000 iterations (OWASP 2023 Recommended)
pub const DEFAULT_PASSWORD_ITERATIONS: u32 = 600_000;

const SALT_LENGTH: usize = 16;
const HASH_LENGTH: usize = 32;

/// Salted PBKDF2 password hash
#[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PasswordHash {
    iterations: u32,
    salt: Vec<u8>,
    hash: [u8; HASH_LENGTH],
}

impl PasswordHash {
    /// Hash `password` with a fresh random salt and the default iteration count
    pub fn new(password: &str) -> Self {
        Self::with_iterations(password, DEFAULT_PASSWORD_ITERATIONS)
    }

    /// Hash `password` with a fresh random salt
    pub fn with_iterations(password: &str, iterations: u32) -> Self {
        let mut salt = [0u8; SALT_LENGTH];
        rand::rng().fill_bytes(&mut salt);
        Self::derive(password, &salt, iterations)
    }

    /// Hash `password` with the given salt
    pub fn derive(password: &str, salt: &[u8], iterations: u32) -> Self {
        Self {
            iterations,
            salt: salt.to_vec(),
            hash: pbkdf2_hmac_array::<Sha256, HASH_LENGTH>(password.as_bytes(), salt, iterations),
        }
    }

    /// Parse the stored form
    pub fn parse(encoded: &str) -> CoreResult<Self> {
        let invalid =
            |reason: &str| CoreError::ConfigError(format!("Invalid password hash: {reason}"));

        let parts: Vec<&str> = encoded.trim().split('$').collect();
        let [scheme, iterations, salt, hash] = parts.as_slice() else {
            return Err(invalid("expected scheme$iterations$salt$hash"));
        };
        if *scheme != PASSWORD_SCHEME {
            return Err(invalid(&format!("unsupported scheme '{scheme}'")));
        }

        let iterations = iterations
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| invalid("iterations must be a positive integer"))?;
        let salt = hex::decode(salt).map_err(|e| invalid(&format!("salt: {e}")))?;
        if salt.is_empty() {
            return Err(invalid("empty salt"));
        }
        let hash: [u8; HASH_LENGTH] = hex::decode(hash)
            .map_err(|e| invalid(&format!("hash: {e}")))?
            .try_into()
            .map_err(|_| invalid("hash must be 32 bytes"))?;

        Ok(Self {
            iterations,
            salt,
            hash,
        })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Derive from `password` and compare in constant time
    pub fn verify(&self, password: &str) -> bool {
        let candidate =
            pbkdf2_hmac_array::<Sha256, HASH_LENGTH>(password.as_bytes(), &self.salt, self.iterations);
        constant_time_eq(&candidate, &self.hash)
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PASSWORD_SCHEME}${}${}${}",
            self.iterations,
            hex::encode(&self.salt),
            hex::encode(self.hash)
        )
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHash")
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

impl TryFrom<String> for PasswordHash {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        Self::parse(&value)
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        value.to_string()
    }
}
