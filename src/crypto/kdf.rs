//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The vault stretches the master passphrase with 150 000 rounds of
//! PBKDF2 over SHA-256.  The envelope does not record the count, so
//! vaults are always written and read with `Pbkdf2Sha256::default()`.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use super::keys::{VaultKey, KEY_LEN};
use super::random::RandomBytes;
use crate::errors::{LockboxError, Result};

/// Length of the per-envelope salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Default and minimum PBKDF2 iteration count.
pub const MIN_ITERATIONS: u32 = 150_000;

/// Turns a passphrase and salt into a symmetric key.
///
/// Implementations must be deterministic: the same passphrase and salt
/// always yield the same key.
pub trait KeyDerivation {
    fn derive_key(&self, passphrase: &[u8], salt: &[u8]) -> Result<VaultKey>;
}

/// PBKDF2-HMAC-SHA256 with a fixed iteration count.
#[derive(Debug, Clone, Copy)]
pub struct Pbkdf2Sha256 {
    iterations: u32,
}

impl Pbkdf2Sha256 {
    /// Build a KDF with an explicit iteration count.
    ///
    /// Enforces the minimum to prevent dangerously weak settings.
    pub fn new(iterations: u32) -> Result<Self> {
        if iterations < MIN_ITERATIONS {
            return Err(LockboxError::KeyDerivationFailed(format!(
                "PBKDF2 iterations must be at least {MIN_ITERATIONS} (got {iterations})"
            )));
        }
        Ok(Self { iterations })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl Default for Pbkdf2Sha256 {
    fn default() -> Self {
        Self {
            iterations: MIN_ITERATIONS,
        }
    }
}

impl KeyDerivation for Pbkdf2Sha256 {
    fn derive_key(&self, passphrase: &[u8], salt: &[u8]) -> Result<VaultKey> {
        if salt.is_empty() {
            return Err(LockboxError::KeyDerivationFailed(
                "salt must not be empty".into(),
            ));
        }

        let mut key = [0u8; KEY_LEN];
        pbkdf2_hmac::<Sha256>(passphrase, salt, self.iterations, &mut key);
        let derived = VaultKey::new(key);
        zeroize::Zeroize::zeroize(&mut key);
        Ok(derived)
    }
}

/// Draw a fresh random salt.
pub fn generate_salt(rng: &mut dyn RandomBytes) -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt);
    salt
}
