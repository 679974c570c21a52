//! Vault module: the encrypted password store.
//!
//! This module provides:
//! - `PasswordEntry`, `NewEntry` and `EntryPatch` (`entry`)
//! - Whole-list add/remove/update/search (`entries`)
//! - The encrypted envelope and its codec (`envelope`)
//! - The lock state machine, `VaultController` (`session`)
//! - Strength scoring (`strength`) and password generation (`generator`)

pub mod entries;
pub mod entry;
pub mod envelope;
pub mod generator;
pub mod session;
pub mod strength;

// Re-export the most commonly used items.
pub use entry::{Category, EntryPatch, NewEntry, PasswordEntry};
pub use envelope::{VaultCodec, VaultEnvelope};
pub use generator::{generate_password, GeneratorConfig};
pub use session::{VaultController, VaultStatus, MIN_PASSPHRASE_LEN};
pub use strength::{score_password, Strength, StrengthLevel};
