//! `lockbox status`: report whether a vault exists.

use console::style;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::Result;
use crate::vault::VaultStatus;

/// Execute the `status` command.  Never asks for the passphrase.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let vault = ctx.open_vault()?;

    let status = vault.status();
    println!("{} {}", style("Vault:").bold(), status);
    println!("{} {}", style("Store:").bold(), ctx.store_dir.display());

    if status == VaultStatus::NoVault {
        let legacy = vault.legacy_entries().len();
        if legacy > 0 {
            output::warning(&format!(
                "{legacy} entries are stored unencrypted. Run `lockbox init` to encrypt them."
            ));
        } else {
            output::tip("Run `lockbox init` to create a vault.");
        }
    }

    Ok(())
}
