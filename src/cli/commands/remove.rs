//! `lockbox remove`: delete an entry from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{LockboxError, Result};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, id: i64, force: bool) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut vault = ctx.unlock_vault()?;

    let service = vault.get_entry(id)?.service.clone();

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let answer = Confirm::new()
            .with_prompt(format!("Remove '{service}' (id {id})?"))
            .default(false)
            .interact_opt()
            .map_err(|e| LockboxError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed(answer)? {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    vault.remove_entry(id)?;
    ctx.audit("remove", Some(id), None);
    output::success(&format!("Removed '{service}'"));

    Ok(())
}

/// `None` means the prompt was dismissed (Esc or q) rather than answered.
fn confirmed(answer: Option<bool>) -> Result<bool> {
    answer.ok_or(LockboxError::UserCancelled)
}
