//! `lockbox list`: show entries, optionally filtered.

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::Result;
use crate::vault::{entries, Category};

/// Execute the `list` command.
pub fn execute(cli: &Cli, term: Option<&str>, category: Option<Category>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let vault = ctx.unlock_vault()?;

    let all = vault.list_entries()?;
    if all.is_empty() {
        output::info("The vault is empty.");
        output::tip("Run `lockbox add <SERVICE>` to store your first password.");
        return Ok(());
    }

    let matches = entries::search(all, term.unwrap_or(""), category);
    output::print_entries_table(&matches);

    if matches.len() != all.len() {
        output::info(&format!("{} of {} entries", matches.len(), all.len()));
    }

    Ok(())
}
