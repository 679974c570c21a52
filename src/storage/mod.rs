//! Key-value persistence for the vault.
//!
//! The vault core never touches the filesystem directly; it reads and
//! writes string values under a handful of logical keys through the
//! `KeyValueStore` trait.
//!
//! - `MemoryStore`: in-process map, used by tests (`memory`)
//! - `FileStore`: one JSON file per key in a directory (`file`)

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::errors::Result;

/// Logical key holding the JSON-encoded encrypted envelope.
pub const ENCRYPTED_KEY: &str = "passwords_encrypted";

/// Logical key of the plaintext entry list written by older versions.
pub const LEGACY_KEY: &str = "passwords";

/// A string key-value store.
///
/// `set` must replace the previous value atomically: after a failed
/// `set`, readers observe either the old value or the new one, never a
/// partial write.
pub trait KeyValueStore {
    /// Read the value under `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`.  Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Returns `true` if a value exists under `key`.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}
