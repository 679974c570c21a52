//! The vault controller: lock state machine plus every read and write
//! of the decrypted entry list.
//!
//! ```text
//! NoVault --create--> Unlocked --lock--> Locked --unlock--> Unlocked
//! ```
//!
//! The controller owns the session and the store.  All state-changing
//! operations take `&mut self`, so a caller cannot start a second save
//! while one is still running.

use std::fmt;

use chrono::Utc;
use subtle::ConstantTimeEq;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::entries;
use super::entry::{EntryPatch, NewEntry, PasswordEntry};
use super::envelope::{parse_entries, VaultCodec, VaultEnvelope};
use crate::errors::{LockboxError, Result};
use crate::storage::{KeyValueStore, ENCRYPTED_KEY, LEGACY_KEY};

/// Minimum master passphrase length, in characters.
pub const MIN_PASSPHRASE_LEN: usize = 8;

/// Public view of the lock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultStatus {
    NoVault,
    Locked,
    Unlocked,
}

impl VaultStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VaultStatus::NoVault => "no vault",
            VaultStatus::Locked => "locked",
            VaultStatus::Unlocked => "unlocked",
        }
    }
}

impl fmt::Display for VaultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session state.  Secrets only exist inside `Unlocked`.
enum Session {
    /// No envelope persisted.  `legacy` holds plaintext entries found
    /// under the old storage key; they are encrypted on `create_vault`.
    NoVault { legacy: Vec<PasswordEntry> },
    Locked,
    Unlocked {
        passphrase: Zeroizing<String>,
        entries: Vec<PasswordEntry>,
    },
}

impl Session {
    fn status(&self) -> VaultStatus {
        match self {
            Session::NoVault { .. } => VaultStatus::NoVault,
            Session::Locked => VaultStatus::Locked,
            Session::Unlocked { .. } => VaultStatus::Unlocked,
        }
    }
}

/// Owns the vault session and mediates all access to it.
pub struct VaultController<S: KeyValueStore> {
    store: S,
    codec: VaultCodec,
    session: Session,
}

impl<S: KeyValueStore> VaultController<S> {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Inspect `store` and start in the matching state.
    ///
    /// An existing envelope means `Locked`.  Otherwise the legacy
    /// plaintext list (if any) is loaded as a migration candidate and
    /// the controller starts in `NoVault`.
    pub fn open(store: S, codec: VaultCodec) -> Result<Self> {
        let session = if store.contains(ENCRYPTED_KEY)? {
            debug!("encrypted vault found");
            Session::Locked
        } else {
            Session::NoVault {
                legacy: load_legacy(&store)?,
            }
        };

        Ok(Self {
            store,
            codec,
            session,
        })
    }

    // ------------------------------------------------------------------
    // State machine
    // ------------------------------------------------------------------

    /// Current lock state.
    pub fn status(&self) -> VaultStatus {
        self.session.status()
    }

    /// Create a vault, encrypting any legacy entries, and unlock it.
    pub fn create_vault(&mut self, passphrase: &str, confirm: &str) -> Result<()> {
        let Session::NoVault { legacy } = &mut self.session else {
            return Err(LockboxError::VaultAlreadyExists);
        };

        validate_new_passphrase(passphrase, confirm)?;

        let envelope = self.codec.encode(legacy, passphrase)?;
        self.store.set(ENCRYPTED_KEY, &envelope.to_json()?)?;

        let entries = std::mem::take(legacy);
        let migrated = entries.len();
        self.session = Session::Unlocked {
            passphrase: Zeroizing::new(passphrase.to_string()),
            entries,
        };

        self.drop_legacy_copy();
        info!(migrated, "vault created");
        Ok(())
    }

    /// Decrypt the persisted envelope and unlock.
    ///
    /// On failure the vault stays `Locked`.
    pub fn unlock(&mut self, passphrase: &str) -> Result<Vec<PasswordEntry>> {
        if !matches!(self.session, Session::Locked) {
            return Err(self.invalid_state("unlock"));
        }

        let text = self.store.get(ENCRYPTED_KEY)?.ok_or_else(|| {
            LockboxError::PersistenceError("encrypted vault disappeared from storage".into())
        })?;
        let envelope = VaultEnvelope::from_json(&text)?;

        let entries = match self.codec.decode(&envelope, passphrase) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "unlock failed");
                return Err(e);
            }
        };

        self.session = Session::Unlocked {
            passphrase: Zeroizing::new(passphrase.to_string()),
            entries: entries.clone(),
        };
        info!(entries = entries.len(), "vault unlocked");
        Ok(entries)
    }

    /// Forget the passphrase and the decrypted entries.
    pub fn lock(&mut self) -> Result<()> {
        if !matches!(self.session, Session::Unlocked { .. }) {
            return Err(self.invalid_state("lock"));
        }
        // Dropping the old session zeroizes the passphrase and every
        // entry password.
        self.session = Session::Locked;
        info!("vault locked");
        Ok(())
    }

    /// Replace the whole entry list and persist it.
    ///
    /// The new list is encrypted under a fresh salt and IV and written
    /// with one atomic `set`.  Only after the write succeeds does the
    /// in-memory list change; a failed write leaves both the previous
    /// envelope and the in-memory list untouched.
    pub fn mutate(&mut self, new_entries: Vec<PasswordEntry>) -> Result<()> {
        let Session::Unlocked { passphrase, .. } = &self.session else {
            return Err(LockboxError::VaultLocked);
        };

        let envelope = self.codec.encode(&new_entries, passphrase)?;
        if let Err(e) = self.store.set(ENCRYPTED_KEY, &envelope.to_json()?) {
            warn!(error = %e, "vault save failed");
            return Err(e);
        }

        if let Session::Unlocked { entries, .. } = &mut self.session {
            *entries = new_entries;
            debug!(entries = entries.len(), "vault saved");
        }

        self.drop_legacy_copy();
        Ok(())
    }

    /// Re-encrypt the vault under a new passphrase.
    ///
    /// `current` must match the passphrase the vault was unlocked with.
    pub fn change_passphrase(&mut self, current: &str, new: &str, confirm: &str) -> Result<()> {
        let Session::Unlocked {
            passphrase,
            entries,
        } = &self.session
        else {
            return Err(LockboxError::VaultLocked);
        };

        if !bool::from(current.as_bytes().ct_eq(passphrase.as_bytes())) {
            return Err(LockboxError::InvalidPassphrase);
        }
        validate_new_passphrase(new, confirm)?;

        let envelope = self.codec.encode(entries, new)?;
        self.store.set(ENCRYPTED_KEY, &envelope.to_json()?)?;

        if let Session::Unlocked { passphrase, .. } = &mut self.session {
            *passphrase = Zeroizing::new(new.to_string());
        }
        info!("master passphrase changed");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Entry operations (only while unlocked)
    // ------------------------------------------------------------------

    /// The decrypted entries.
    pub fn list_entries(&self) -> Result<&[PasswordEntry]> {
        match &self.session {
            Session::Unlocked { entries, .. } => Ok(entries.as_slice()),
            _ => Err(LockboxError::VaultLocked),
        }
    }

    /// Look up one entry by id.
    pub fn get_entry(&self, id: i64) -> Result<&PasswordEntry> {
        self.list_entries()?
            .iter()
            .find(|e| e.id == id)
            .ok_or(LockboxError::EntryNotFound(id))
    }

    /// Add an entry and persist.  Returns the new entry's id.
    pub fn add_entry(&mut self, form: NewEntry) -> Result<i64> {
        let (updated, id) = entries::add(self.list_entries()?, form, Utc::now())?;
        self.mutate(updated)?;
        Ok(id)
    }

    /// Remove an entry and persist.
    pub fn remove_entry(&mut self, id: i64) -> Result<()> {
        let updated = entries::remove(self.list_entries()?, id)?;
        self.mutate(updated)
    }

    /// Edit an entry and persist.
    pub fn update_entry(&mut self, id: i64, patch: &EntryPatch) -> Result<()> {
        let updated = entries::update(self.list_entries()?, id, patch)?;
        self.mutate(updated)
    }

    /// Plaintext entries waiting to be migrated by `create_vault`.
    ///
    /// Empty unless the state is `NoVault`.
    pub fn legacy_entries(&self) -> &[PasswordEntry] {
        match &self.session {
            Session::NoVault { legacy } => legacy.as_slice(),
            _ => &[],
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Delete the plaintext legacy key.  Failure is not fatal: the vault
    /// already holds the entries encrypted, and the next save retries.
    fn drop_legacy_copy(&mut self) {
        match self.store.contains(LEGACY_KEY) {
            Ok(false) => {}
            Ok(true) => match self.store.remove(LEGACY_KEY) {
                Ok(()) => info!("removed legacy plaintext entries"),
                Err(e) => warn!(error = %e, "could not remove legacy plaintext entries"),
            },
            Err(e) => warn!(error = %e, "could not check for legacy plaintext entries"),
        }
    }

    fn invalid_state(&self, operation: &'static str) -> LockboxError {
        LockboxError::InvalidState {
            operation,
            state: self.status().as_str(),
        }
    }
}

/// Read the pre-encryption plaintext list.  Unreadable data is ignored.
fn load_legacy<S: KeyValueStore>(store: &S) -> Result<Vec<PasswordEntry>> {
    let Some(text) = store.get(LEGACY_KEY)? else {
        return Ok(Vec::new());
    };

    match parse_entries(text.as_bytes()) {
        Ok(entries) => {
            info!(entries = entries.len(), "legacy plaintext entries found");
            Ok(entries)
        }
        Err(e) => {
            warn!(error = %e, "ignoring unreadable legacy entries");
            Ok(Vec::new())
        }
    }
}

/// Length first, then confirmation.
fn validate_new_passphrase(passphrase: &str, confirm: &str) -> Result<()> {
    if passphrase.chars().count() < MIN_PASSPHRASE_LEN {
        return Err(LockboxError::WeakPassphrase {
            min: MIN_PASSPHRASE_LEN,
        });
    }
    if !bool::from(passphrase.as_bytes().ct_eq(confirm.as_bytes())) {
        return Err(LockboxError::PassphraseMismatch);
    }
    Ok(())
}
