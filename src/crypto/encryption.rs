//! AES-256-GCM authenticated encryption.
//!
//! Unlike a self-contained blob format, the IV is supplied by the caller
//! and stored next to the ciphertext in the vault envelope.  The
//! returned buffer is `ciphertext || 16-byte auth tag`.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use super::keys::VaultKey;
use super::random::RandomBytes;
use crate::errors::{LockboxError, Result};

/// Size of the AES-256-GCM nonce (IV) in bytes.
pub const IV_LEN: usize = 12;

/// Size of the GCM authentication tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Authenticated symmetric encryption.
///
/// `decrypt` must fail with `DecryptionFailed` whenever the tag does not
/// verify; callers rely on that as the only wrong-passphrase signal.
pub trait AeadCipher {
    fn encrypt(&self, key: &VaultKey, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>;
    fn decrypt(&self, key: &VaultKey, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>;
}

/// AES-256-GCM backed by the `aes-gcm` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct Aes256GcmCipher;

impl AeadCipher for Aes256GcmCipher {
    fn encrypt(&self, key: &VaultKey, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        if iv.len() != IV_LEN {
            return Err(LockboxError::EncryptionFailed(format!(
                "IV must be {IV_LEN} bytes, got {}",
                iv.len()
            )));
        }

        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| LockboxError::EncryptionFailed(format!("invalid key length: {e}")))?;

        cipher
            .encrypt(Nonce::from_slice(iv), plaintext)
            .map_err(|e| LockboxError::EncryptionFailed(format!("encryption error: {e}")))
    }

    fn decrypt(&self, key: &VaultKey, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        // A wrong-length IV or a buffer shorter than the tag can never
        // authenticate; report it the same way as a bad tag.
        if iv.len() != IV_LEN || ciphertext.len() < TAG_LEN {
            return Err(LockboxError::DecryptionFailed);
        }

        let cipher =
            Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| LockboxError::DecryptionFailed)?;

        cipher
            .decrypt(Nonce::from_slice(iv), ciphertext)
            .map_err(|_| LockboxError::DecryptionFailed)
    }
}

/// Draw a fresh random IV.
pub fn generate_iv(rng: &mut dyn RandomBytes) -> [u8; IV_LEN] {
    let mut iv = [0u8; IV_LEN];
    rng.fill(&mut iv);
    iv
}
