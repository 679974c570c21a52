use thiserror::Error;

/// All errors that can occur in Lockbox.
#[derive(Debug, Error)]
pub enum LockboxError {
    // --- Passphrase validation ---
    #[error("Passphrase too weak: use at least {min} characters")]
    WeakPassphrase { min: usize },

    #[error("Passphrase mismatch: passphrases do not match")]
    PassphraseMismatch,

    #[error("Invalid master passphrase")]
    InvalidPassphrase,

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: wrong key or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Vault is corrupt: {0}")]
    CorruptVault(String),

    #[error("No vault exists yet; run `lockbox init` first")]
    NoVault,

    #[error("Vault already exists")]
    VaultAlreadyExists,

    #[error("Vault is locked")]
    VaultLocked,

    #[error("Operation '{operation}' is not valid while the vault is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("Entry {0} not found")]
    EntryNotFound(i64),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("Invalid generator settings: {0}")]
    InvalidGeneratorConfig(String),

    // --- Storage errors ---
    #[error("Storage error: {0}")]
    PersistenceError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for Lockbox results.
pub type Result<T> = std::result::Result<T, LockboxError>;
