use clap::Parser;
use lockbox::cli::commands::{add::AddArgs, edit::PasswordChange, generate::GenerateArgs};
use lockbox::cli::{Cli, Commands};
use lockbox::vault::EntryPatch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Diagnostics go to stderr, filtered by `LOCKBOX_LOG` (default: warn).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOCKBOX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => lockbox::cli::commands::init::execute(&cli),
        Commands::Status => lockbox::cli::commands::status::execute(&cli),
        Commands::List {
            ref search,
            category,
        } => lockbox::cli::commands::list::execute(&cli, search.as_deref(), category),
        Commands::Add {
            ref service,
            ref website,
            ref username,
            ref email,
            category,
            ref notes,
            generate,
        } => {
            let args = AddArgs {
                service,
                website: website.as_deref(),
                username: username.as_deref(),
                email: email.as_deref(),
                category,
                notes: notes.as_deref(),
                generate,
            };
            lockbox::cli::commands::add::execute(&cli, &args)
        }
        Commands::Get { id, show, copy } => {
            lockbox::cli::commands::get::execute(&cli, id, show, copy)
        }
        Commands::Edit {
            id,
            ref service,
            ref website,
            ref username,
            ref email,
            category,
            ref notes,
            password,
            generate,
        } => {
            let patch = EntryPatch {
                service: service.clone(),
                website: website.clone(),
                username: username.clone(),
                email: email.clone(),
                password: None,
                category,
                notes: notes.clone(),
            };
            let change = match (password, generate) {
                (_, true) => PasswordChange::Generate,
                (true, false) => PasswordChange::Prompt,
                (false, false) => PasswordChange::Keep,
            };
            lockbox::cli::commands::edit::execute(&cli, id, patch, change)
        }
        Commands::Remove { id, force } => lockbox::cli::commands::remove::execute(&cli, id, force),
        Commands::Generate {
            length,
            no_symbols,
            no_special,
            allow_similar,
        } => {
            let args = GenerateArgs {
                length,
                no_symbols,
                no_special,
                allow_similar,
            };
            lockbox::cli::commands::generate::execute(&cli, &args)
        }
        Commands::Strength => lockbox::cli::commands::strength::execute(),
        Commands::ChangePassphrase => lockbox::cli::commands::change_passphrase::execute(&cli),
        #[cfg(feature = "audit-log")]
        Commands::Audit { last, ref since } => {
            lockbox::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        #[cfg(not(feature = "audit-log"))]
        Commands::Audit { .. } => Err(lockbox::errors::LockboxError::CommandFailed(
            "this build has no audit log (rebuild with the `audit-log` feature)".into(),
        )),
        Commands::Completions { ref shell } => lockbox::cli::commands::completions::execute(shell),
        Commands::Version => lockbox::cli::commands::version::execute(),
    };

    if let Err(e) = result {
        lockbox::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
