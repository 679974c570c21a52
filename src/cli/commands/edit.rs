//! `lockbox edit`: change fields of an existing entry.

use crate::cli::output;
use crate::cli::{read_secret, Cli, Context};
use crate::errors::Result;
use crate::vault::{generate_password, EntryPatch};

/// What to do with the password during an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordChange {
    Keep,
    Prompt,
    Generate,
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, id: i64, mut patch: EntryPatch, password: PasswordChange) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut vault = ctx.unlock_vault()?;

    // Fail on an unknown id before asking for a new password.
    vault.get_entry(id)?;

    patch.password = match password {
        PasswordChange::Keep => None,
        PasswordChange::Prompt => Some(read_secret("New password")?.to_string()),
        PasswordChange::Generate => Some(generate_password(&ctx.settings.generator_config())?),
    };

    if patch.is_empty() {
        output::info("Nothing to change.");
        output::tip("Pass at least one field, e.g. `lockbox edit <ID> --username new`.");
        return Ok(());
    }

    vault.update_entry(id, &patch)?;
    if let Some(pw) = patch.password.as_mut() {
        zeroize::Zeroize::zeroize(pw);
    }

    let details = if password == PasswordChange::Keep {
        None
    } else {
        Some("password changed")
    };
    ctx.audit("edit", Some(id), details);

    let entry = vault.get_entry(id)?;
    output::success(&format!(
        "Updated '{}' (strength {})",
        entry.service,
        output::strength_label(&entry.strength)
    ));

    Ok(())
}
