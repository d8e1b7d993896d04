//! Salted secret hashing
//!
//! Secrets are stretched with PBKDF2-HMAC-SHA256 over a random per-record
//! salt. The iteration count is stored alongside each hash so it can be
//! raised later without invalidating existing records.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Iterations used for new records
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Derived hash length in bytes
pub const HASH_LEN: usize = 32;

/// A stored secret: salt, derived hash and the work factor used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretHash {
    /// Random per-record salt
    pub salt: Vec<u8>,
    /// PBKDF2 output
    pub hash: Vec<u8>,
    /// PBKDF2 iteration count
    pub iterations: u32,
}

impl SecretHash {
    /// Hash a secret under a fresh random salt.
    #[must_use]
    pub fn new(secret: &str, iterations: u32) -> Self {
        let mut salt = vec![0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::with_salt(secret, salt, iterations)
    }

    /// Hash a secret under a given salt.
    #[must_use]
    pub fn with_salt(secret: &str, salt: Vec<u8>, iterations: u32) -> Self {
        let mut hash = vec![0u8; HASH_LEN];
        pbkdf2_hmac::<Sha256>(secret.as_bytes(), &salt, iterations, &mut hash);
        Self {
            salt,
            hash,
            iterations,
        }
    }

    /// Check a candidate secret against this hash in constant time.
    #[must_use]
    pub fn verify(&self, secret: &str) -> bool {
        let candidate = Self::with_salt(secret, self.salt.clone(), self.iterations);
        candidate.hash.as_slice().ct_eq(self.hash.as_slice()).into()
    }
}
