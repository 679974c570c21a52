//! `lockbox strength`: score a password without storing it.

use crate::cli::{output, read_secret};
use crate::errors::Result;
use crate::vault::score_password;

/// Execute the `strength` command.
pub fn execute() -> Result<()> {
    let password = read_secret("Password to score")?;
    let strength = score_password(&password);
    println!("{}", output::strength_label(&strength));
    Ok(())
}
