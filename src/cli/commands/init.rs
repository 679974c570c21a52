//! `lockbox init`: create the encrypted vault.
//!
//! Plaintext entries left under the legacy storage key are encrypted into
//! the new vault and the plaintext copy is removed.

use crate::cli::output;
use crate::cli::{passphrase_is_scripted, prompt_new_passphrase, Cli, Context, PASSPHRASE_ENV};
use crate::errors::{LockboxError, Result};
use crate::vault::VaultStatus;

/// Interactive attempts before giving up on a valid new passphrase.
const MAX_ATTEMPTS: usize = 3;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut vault = ctx.open_vault()?;

    if vault.status() != VaultStatus::NoVault {
        output::tip("Use `lockbox add` to store entries in the existing vault.");
        return Err(LockboxError::VaultAlreadyExists);
    }

    let legacy = vault.legacy_entries().len();
    if legacy > 0 {
        output::info(&format!(
            "Found {legacy} unencrypted entries. They will be encrypted into the new vault."
        ));
    }

    let scripted = passphrase_is_scripted(PASSPHRASE_ENV);
    let mut attempt = 0;
    loop {
        attempt += 1;
        let (passphrase, confirm) = prompt_new_passphrase(PASSPHRASE_ENV)?;
        match vault.create_vault(&passphrase, &confirm) {
            Ok(()) => break,
            Err(e @ (LockboxError::WeakPassphrase { .. } | LockboxError::PassphraseMismatch))
                if !scripted && attempt < MAX_ATTEMPTS =>
            {
                output::warning(&e.to_string());
            }
            Err(e) => return Err(e),
        }
    }

    let details = format!("migrated {legacy}");
    ctx.audit("init", None, Some(&details));

    output::success(&format!("Vault created at {}", ctx.store_dir.display()));
    if legacy > 0 {
        output::success(&format!("Encrypted {legacy} existing entries"));
    }
    output::tip("Run `lockbox add <SERVICE>` to store your first password.");

    Ok(())
}
