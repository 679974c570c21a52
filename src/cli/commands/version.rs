//! `lockbox version`: display version and build features.

use console::style;

use crate::errors::Result;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    println!("lockbox {}", env!("CARGO_PKG_VERSION"));

    let audit = if cfg!(feature = "audit-log") {
        style("on").green()
    } else {
        style("off").dim()
    };
    println!("  audit log: {audit}");

    Ok(())
}
