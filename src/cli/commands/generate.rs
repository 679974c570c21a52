//! `lockbox generate`: print a random password.
//!
//! Does not touch the vault.  The password goes to stdout on its own
//! line so it can be piped; the strength score is only shown on a
//! terminal.

use std::io::{self, IsTerminal};

use crate::cli::{output, Cli, Context};
use crate::errors::Result;
use crate::vault::{generate_password, score_password, GeneratorConfig};

/// Flags accepted by `generate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateArgs {
    pub length: Option<usize>,
    pub no_symbols: bool,
    pub no_special: bool,
    pub allow_similar: bool,
}

impl GenerateArgs {
    /// Merge the flags over the configured defaults.
    pub fn config(&self, base: GeneratorConfig) -> GeneratorConfig {
        GeneratorConfig {
            length: self.length.unwrap_or(base.length),
            symbols: base.symbols && !self.no_symbols,
            special: base.special && !self.no_special,
            exclude_similar: base.exclude_similar && !self.allow_similar,
            ..base
        }
    }
}

/// Execute the `generate` command.
pub fn execute(cli: &Cli, args: &GenerateArgs) -> Result<()> {
    let ctx = Context::load(cli)?;
    let config = args.config(ctx.settings.generator_config());

    let password = zeroize::Zeroizing::new(generate_password(&config)?);
    println!("{}", password.as_str());

    if io::stdout().is_terminal() {
        let strength = score_password(&password);
        output::tip(&format!("strength: {}", output::strength_label(&strength)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = GenerateArgs {
            length: Some(32),
            no_symbols: true,
            no_special: false,
            allow_similar: true,
        };
        let config = args.config(GeneratorConfig::default());
        assert_eq!(config.length, 32);
        assert!(!config.symbols);
        assert!(config.special);
        assert!(!config.exclude_similar);
        assert!(config.uppercase && config.lowercase && config.numbers);
    }

    #[test]
    fn no_flags_keep_configured_length() {
        let base = GeneratorConfig {
            length: 24,
            ..GeneratorConfig::default()
        };
        assert_eq!(GenerateArgs::default().config(base), base);
    }
}
