//! `lockbox add`: store a new entry.
//!
//! The password is read from piped stdin, an interactive hidden prompt,
//! or generated with `--generate`.

use crate::cli::output;
use crate::cli::{read_secret, Cli, Context};
use crate::errors::Result;
use crate::vault::{generate_password, Category, NewEntry};

/// Optional fields accepted by `add`.
pub struct AddArgs<'a> {
    pub service: &'a str,
    pub website: Option<&'a str>,
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
    pub category: Category,
    pub notes: Option<&'a str>,
    pub generate: bool,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: &AddArgs<'_>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut vault = ctx.unlock_vault()?;

    let password = if args.generate {
        zeroize::Zeroizing::new(generate_password(&ctx.settings.generator_config())?)
    } else {
        read_secret(&format!("Password for {}", args.service))?
    };

    let mut form = NewEntry::new(args.service, password.as_str()).category(args.category);
    if let Some(website) = args.website {
        form = form.website(website);
    }
    if let Some(username) = args.username {
        form = form.username(username);
    }
    if let Some(email) = args.email {
        form = form.email(email);
    }
    if let Some(notes) = args.notes {
        form = form.notes(notes);
    }

    let id = vault.add_entry(form)?;
    ctx.audit("add", Some(id), None);

    let entry = vault.get_entry(id)?;
    output::success(&format!(
        "Added '{}' (id {id}, strength {})",
        entry.service,
        output::strength_label(&entry.strength)
    ));
    if args.generate {
        output::tip(&format!("Run `lockbox get {id} --show` to see the password."));
    }

    Ok(())
}
