//! Cryptographic primitives for Lockbox.
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption (`encryption`)
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - The zeroizing key wrapper (`keys`)
//! - Injectable random sources for salts and IVs (`random`)

pub mod encryption;
pub mod kdf;
pub mod keys;
pub mod random;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{AeadCipher, KeyDerivation, ...};
pub use encryption::{generate_iv, AeadCipher, Aes256GcmCipher, IV_LEN, TAG_LEN};
pub use kdf::{generate_salt, KeyDerivation, Pbkdf2Sha256, MIN_ITERATIONS, SALT_LEN};
pub use keys::{VaultKey, KEY_LEN};
pub use random::{OsRandom, RandomBytes, SeededRandom};
