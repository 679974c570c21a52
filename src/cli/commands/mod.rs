//! One module per subcommand.  Each exposes an `execute` function.

pub mod add;
#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod change_passphrase;
pub mod completions;
pub mod edit;
pub mod generate;
pub mod get;
pub mod init;
pub mod list;
pub mod remove;
pub mod status;
pub mod strength;
pub mod version;
