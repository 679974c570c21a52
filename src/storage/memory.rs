//! In-memory `KeyValueStore`.
//!
//! Clones share the same underlying map, so a test can hand one clone
//! to the vault controller and keep another to inspect what was
//! persisted.  Write failures can be injected to exercise the
//! `PersistenceError` paths.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::KeyValueStore;
use crate::errors::{LockboxError, Result};

#[derive(Debug, Default)]
struct Inner {
    values: HashMap<String, String>,
    fail_writes: bool,
}

/// A `HashMap`-backed store shared between clones.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set`/`remove` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_writes = fail;
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| LockboxError::PersistenceError("memory store poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.lock()?;
        if inner.fail_writes {
            return Err(LockboxError::PersistenceError(format!(
                "write to '{key}' rejected: storage unavailable"
            )));
        }
        inner.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut inner = self.lock()?;
        if inner.fail_writes {
            return Err(LockboxError::PersistenceError(format!(
                "remove of '{key}' rejected: storage unavailable"
            )));
        }
        inner.values.remove(key);
        Ok(())
    }
}
