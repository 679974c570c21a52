//! `lockbox get`: show one entry, optionally copying its password.

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{LockboxError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, id: i64, show: bool, copy: bool) -> Result<()> {
    let ctx = Context::load(cli)?;
    let vault = ctx.unlock_vault()?;
    let entry = vault.get_entry(id)?;

    output::print_entry(entry, show);

    if copy {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| LockboxError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(entry.password.as_str())
            .map_err(|e| LockboxError::Clipboard(e.to_string()))?;
        output::success("Password copied to clipboard");
    }

    Ok(())
}
