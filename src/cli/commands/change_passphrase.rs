//! `lockbox change-passphrase`: re-encrypt the vault under a new
//! master passphrase.
//!
//! The current passphrase comes from `LOCKBOX_PASSPHRASE` or a prompt,
//! the new one from `LOCKBOX_NEW_PASSPHRASE` or a prompt.

use crate::cli::output;
use crate::cli::{
    passphrase_is_scripted, prompt_new_passphrase, prompt_passphrase, Cli, Context,
    NEW_PASSPHRASE_ENV,
};
use crate::errors::{LockboxError, Result};
use crate::vault::VaultStatus;

const MAX_ATTEMPTS: usize = 3;

/// Execute the `change-passphrase` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut vault = ctx.open_vault()?;
    if vault.status() == VaultStatus::NoVault {
        return Err(LockboxError::NoVault);
    }

    let current = prompt_passphrase()?;
    if let Err(e) = vault.unlock(&current) {
        if matches!(e, LockboxError::InvalidPassphrase) {
            ctx.audit("unlock-failed", None, None);
        }
        return Err(e);
    }

    let scripted = passphrase_is_scripted(NEW_PASSPHRASE_ENV);
    let mut attempt = 0;
    loop {
        attempt += 1;
        let (new, confirm) = prompt_new_passphrase(NEW_PASSPHRASE_ENV)?;
        match vault.change_passphrase(&current, &new, &confirm) {
            Ok(()) => break,
            Err(e @ (LockboxError::WeakPassphrase { .. } | LockboxError::PassphraseMismatch))
                if !scripted && attempt < MAX_ATTEMPTS =>
            {
                output::warning(&e.to_string());
            }
            Err(e) => return Err(e),
        }
    }

    ctx.audit("change-passphrase", None, None);
    output::success("Master passphrase changed");

    Ok(())
}
