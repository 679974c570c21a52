//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{LockboxError, Result};
use crate::storage::FileStore;
use crate::vault::{Category, VaultCodec, VaultController, VaultStatus, MIN_PASSPHRASE_LEN};

/// Environment variable consulted before prompting for the master passphrase.
pub const PASSPHRASE_ENV: &str = "LOCKBOX_PASSPHRASE";

/// Environment variable consulted before prompting for a new passphrase
/// in `change-passphrase`.
pub const NEW_PASSPHRASE_ENV: &str = "LOCKBOX_NEW_PASSPHRASE";

/// Lockbox CLI: local encrypted password vault.
#[derive(Parser)]
#[command(name = "lockbox", about = "Local encrypted password vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Storage directory (default: from .lockbox.toml, else .lockbox)
    #[arg(long, global = true)]
    pub store_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault (migrates legacy plaintext entries)
    Init,

    /// Show whether a vault exists
    Status,

    /// List entries
    List {
        /// Filter by service, username or email
        #[arg(short, long)]
        search: Option<String>,
        /// Only show one category
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// Add an entry
    Add {
        /// Service name (e.g. Gmail)
        service: String,
        #[arg(long)]
        website: Option<String>,
        #[arg(short, long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// personal, work, banking, social, shopping or entertainment
        #[arg(short, long, default_value = "personal")]
        category: Category,
        #[arg(long)]
        notes: Option<String>,
        /// Generate the password instead of prompting for it
        #[arg(short, long)]
        generate: bool,
    },

    /// Show one entry
    Get {
        /// Entry id
        id: i64,
        /// Print the password in clear text
        #[arg(long)]
        show: bool,
        /// Copy the password to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Edit an entry
    Edit {
        /// Entry id
        id: i64,
        #[arg(long)]
        service: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(short, long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(short, long)]
        category: Option<Category>,
        #[arg(long)]
        notes: Option<String>,
        /// Prompt for a new password
        #[arg(long, conflicts_with = "generate")]
        password: bool,
        /// Replace the password with a generated one
        #[arg(short, long)]
        generate: bool,
    },

    /// Remove an entry
    Remove {
        /// Entry id
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random password
    Generate {
        /// Password length (default: from .lockbox.toml, else 16)
        #[arg(short, long)]
        length: Option<usize>,
        /// Leave out !@#$%-style symbols
        #[arg(long)]
        no_symbols: bool,
        /// Leave out quotes, backtick, tilde and slashes
        #[arg(long)]
        no_special: bool,
        /// Keep look-alike characters such as 0/O and 1/l
        #[arg(long)]
        allow_similar: bool,
    },

    /// Score a password's strength (reads stdin when piped)
    Strength,

    /// Change the master passphrase
    ChangePassphrase,

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },

    /// Show version
    Version,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolved project settings and storage location for one invocation.
pub struct Context {
    pub settings: Settings,
    pub store_dir: PathBuf,
}

impl Context {
    /// Load `.lockbox.toml` from the working directory and apply CLI
    /// overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let settings = Settings::load(&cwd)?;
        let store_dir = match &cli.store_dir {
            Some(dir) => cwd.join(dir),
            None => settings.store_path(&cwd),
        };
        Ok(Self {
            settings,
            store_dir,
        })
    }

    /// Open the vault controller over the file store.
    pub fn open_vault(&self) -> Result<VaultController<FileStore>> {
        VaultController::open(FileStore::new(&self.store_dir), VaultCodec::new())
    }

    /// Open the vault and unlock it with the user's passphrase.
    ///
    /// Failed unlock attempts are written to the audit log.
    pub fn unlock_vault(&self) -> Result<VaultController<FileStore>> {
        let mut vault = self.open_vault()?;
        match vault.status() {
            VaultStatus::NoVault => return Err(LockboxError::NoVault),
            VaultStatus::Locked => {}
            VaultStatus::Unlocked => return Ok(vault),
        }

        let passphrase = prompt_passphrase()?;
        if let Err(e) = vault.unlock(&passphrase) {
            if matches!(e, LockboxError::InvalidPassphrase) {
                self.audit("unlock-failed", None, None);
            }
            return Err(e);
        }
        Ok(vault)
    }

    /// Record an audit event if auditing is enabled.
    pub fn audit(&self, op: &str, entry_id: Option<i64>, details: Option<&str>) {
        if !self.settings.audit {
            return;
        }
        #[cfg(feature = "audit-log")]
        crate::audit::log_audit(&self.store_dir, op, entry_id, details);

        #[cfg(not(feature = "audit-log"))]
        let _ = (op, entry_id, details);
    }
}

/// Get the master passphrase, trying in order:
/// 1. `LOCKBOX_PASSPHRASE` env var (scripts, CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_passphrase() -> Result<Zeroizing<String>> {
    if let Some(pw) = passphrase_from_env(PASSPHRASE_ENV) {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master passphrase")
        .interact()
        .map_err(|e| LockboxError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new passphrase and its confirmation.
///
/// If `env_var` is set its value is used for both.  Validation is left to
/// the vault; interactive callers re-prompt on `WeakPassphrase` or
/// `PassphraseMismatch`.
pub fn prompt_new_passphrase(env_var: &str) -> Result<(Zeroizing<String>, Zeroizing<String>)> {
    if let Some(pw) = passphrase_from_env(env_var) {
        let confirm = pw.clone();
        return Ok((pw, confirm));
    }

    let prompt = |label: &str| {
        dialoguer::Password::new()
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()
            .map(Zeroizing::new)
            .map_err(|e| LockboxError::CommandFailed(format!("passphrase prompt: {e}")))
    };

    output::tip(&format!(
        "Use at least {MIN_PASSPHRASE_LEN} characters. There is no recovery if you forget it."
    ));
    let passphrase = prompt("Choose master passphrase")?;
    let confirm = prompt("Confirm master passphrase")?;
    Ok((passphrase, confirm))
}

/// Whether passphrases come from the environment (no retry loop).
pub fn passphrase_is_scripted(env_var: &str) -> bool {
    passphrase_from_env(env_var).is_some()
}

fn passphrase_from_env(var: &str) -> Option<Zeroizing<String>> {
    match std::env::var(var) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Read a secret from piped stdin or an interactive hidden prompt.
pub fn read_secret(label: &str) -> Result<Zeroizing<String>> {
    use std::io::{self, IsTerminal, Read};

    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        let value = Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string());
        zeroize::Zeroize::zeroize(&mut buf);
        return Ok(value);
    }

    dialoguer::Password::new()
        .with_prompt(label)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| LockboxError::CommandFailed(format!("input prompt: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_category() {
        let cli = Cli::try_parse_from([
            "lockbox", "add", "Chase", "--category", "banking", "-u", "ana",
        ])
        .unwrap();
        match cli.command {
            Commands::Add {
                service,
                category,
                username,
                ..
            } => {
                assert_eq!(service, "Chase");
                assert_eq!(category, Category::Banking);
                assert_eq!(username.as_deref(), Some("ana"));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(Cli::try_parse_from(["lockbox", "add", "x", "--category", "crypto"]).is_err());
    }

    #[test]
    fn edit_password_and_generate_conflict() {
        assert!(
            Cli::try_parse_from(["lockbox", "edit", "1", "--password", "--generate"]).is_err()
        );
    }

    #[test]
    fn store_dir_is_global() {
        let cli = Cli::try_parse_from(["lockbox", "status", "--store-dir", "vault"]).unwrap();
        assert_eq!(cli.store_dir.as_deref(), Some("vault"));
    }
}
