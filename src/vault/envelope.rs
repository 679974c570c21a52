//! Encrypted envelope format and the codec that produces it.
//!
//! The persisted value under `passwords_encrypted` is a JSON object:
//!
//! ```text
//! { "salt": "<base64, 16 bytes>", "iv": "<base64, 12 bytes>", "ciphertext": "<base64>" }
//! ```
//!
//! - **salt**: PBKDF2 salt, fresh on every encode.
//! - **iv**: AES-GCM nonce, fresh on every encode.
//! - **ciphertext**: AES-256-GCM over the UTF-8 JSON entry array, with the
//!   16-byte tag appended.
//!
//! Because salt and IV are both regenerated per save, every save also
//! uses a freshly derived key and IV reuse under one key cannot happen.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::entry::PasswordEntry;
use crate::crypto::{
    generate_iv, generate_salt, AeadCipher, Aes256GcmCipher, KeyDerivation, OsRandom,
    Pbkdf2Sha256, RandomBytes, IV_LEN, SALT_LEN,
};
use crate::errors::{LockboxError, Result};

// ---------------------------------------------------------------------------
// VaultEnvelope
// ---------------------------------------------------------------------------

/// One encrypted snapshot of the whole entry list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultEnvelope {
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub iv: Vec<u8>,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub ciphertext: Vec<u8>,
}

impl VaultEnvelope {
    /// Serialize to the persisted JSON text.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| LockboxError::SerializationError(format!("envelope: {e}")))
    }

    /// Parse persisted JSON text.  Anything that is not a well-formed
    /// envelope, including a salt or IV of the wrong size, is reported
    /// as a corrupt vault.
    pub fn from_json(text: &str) -> Result<Self> {
        let envelope: Self = serde_json::from_str(text)
            .map_err(|e| LockboxError::CorruptVault(format!("envelope JSON: {e}")))?;
        envelope.check_lengths()?;
        Ok(envelope)
    }

    fn check_lengths(&self) -> Result<()> {
        if self.salt.len() != SALT_LEN {
            return Err(LockboxError::CorruptVault(format!(
                "salt must be {SALT_LEN} bytes, got {}",
                self.salt.len()
            )));
        }
        if self.iv.len() != IV_LEN {
            return Err(LockboxError::CorruptVault(format!(
                "iv must be {IV_LEN} bytes, got {}",
                self.iv.len()
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// VaultCodec
// ---------------------------------------------------------------------------

/// Turns entry lists into envelopes and back.
///
/// Holds the three crypto capabilities so tests can swap in seeded
/// randomness or a cheap KDF.
pub struct VaultCodec {
    random: Box<dyn RandomBytes + Send>,
    kdf: Box<dyn KeyDerivation + Send>,
    cipher: Box<dyn AeadCipher + Send>,
}

impl VaultCodec {
    /// Production codec: OS randomness, PBKDF2-SHA256 at the default
    /// iteration count, AES-256-GCM.
    pub fn new() -> Self {
        Self::with_parts(OsRandom, Pbkdf2Sha256::default(), Aes256GcmCipher)
    }

    /// Assemble a codec from explicit capabilities.
    pub fn with_parts(
        random: impl RandomBytes + Send + 'static,
        kdf: impl KeyDerivation + Send + 'static,
        cipher: impl AeadCipher + Send + 'static,
    ) -> Self {
        Self {
            random: Box::new(random),
            kdf: Box::new(kdf),
            cipher: Box::new(cipher),
        }
    }

    /// Encrypt `entries` under `passphrase` with a fresh salt and IV.
    pub fn encode(&mut self, entries: &[PasswordEntry], passphrase: &str) -> Result<VaultEnvelope> {
        let salt = generate_salt(self.random.as_mut());
        let iv = generate_iv(self.random.as_mut());
        let key = self.kdf.derive_key(passphrase.as_bytes(), &salt)?;

        let mut plaintext = serde_json::to_vec(entries)
            .map_err(|e| LockboxError::SerializationError(format!("entries: {e}")))?;
        let ciphertext = self.cipher.encrypt(&key, &iv, &plaintext);
        plaintext.zeroize();

        Ok(VaultEnvelope {
            salt: salt.to_vec(),
            iv: iv.to_vec(),
            ciphertext: ciphertext?,
        })
    }

    /// Decrypt an envelope back into entries.
    ///
    /// A tag mismatch means the passphrase is wrong (or the ciphertext was
    /// altered; the two cannot be told apart).  A payload that decrypts
    /// but is not a JSON array of entries is a corrupt vault.
    pub fn decode(&self, envelope: &VaultEnvelope, passphrase: &str) -> Result<Vec<PasswordEntry>> {
        envelope.check_lengths()?;
        let key = self.kdf.derive_key(passphrase.as_bytes(), &envelope.salt)?;

        let mut plaintext = self
            .cipher
            .decrypt(&key, &envelope.iv, &envelope.ciphertext)
            .map_err(|e| match e {
                LockboxError::DecryptionFailed => LockboxError::InvalidPassphrase,
                other => other,
            })?;

        let parsed = parse_entries(&plaintext);
        plaintext.zeroize();
        parsed
    }
}

impl Default for VaultCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a decrypted (or legacy plaintext) payload into entries.
pub(crate) fn parse_entries(bytes: &[u8]) -> Result<Vec<PasswordEntry>> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| LockboxError::CorruptVault(format!("payload is not JSON: {e}")))?;

    if !value.is_array() {
        return Err(LockboxError::CorruptVault(
            "payload is not an entry list".into(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| LockboxError::CorruptVault(format!("malformed entry: {e}")))
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
