//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::{style, StyledObject};

use crate::vault::{PasswordEntry, Strength, StrengthLevel};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Strength label colored by level.
pub fn strength_label(strength: &Strength) -> StyledObject<String> {
    let label = format!("{} ({})", strength.level, strength.score);
    match strength.level {
        StrengthLevel::Weak => style(label).red(),
        StrengthLevel::Fair => style(label).yellow(),
        StrengthLevel::Good => style(label).cyan(),
        StrengthLevel::Strong => style(label).green(),
    }
}

/// Print a table of entries (ID, Service, Username, Category, Strength, Created).
///
/// Passwords are never shown here.
pub fn print_entries_table(entries: &[&PasswordEntry]) {
    if entries.is_empty() {
        info("No entries found.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "ID", "Service", "Username", "Category", "Strength", "Created",
    ]);

    for e in entries {
        let login = if e.username.is_empty() {
            e.email.clone()
        } else {
            e.username.clone()
        };
        table.add_row(vec![
            e.id.to_string(),
            e.service.clone(),
            login,
            e.category.to_string(),
            format!("{} ({})", e.strength.level, e.strength.score),
            e.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print every field of one entry.  The password is masked unless
/// `show_password` is set.
pub fn print_entry(entry: &PasswordEntry, show_password: bool) {
    let field = |name: &str, value: &str| {
        if !value.is_empty() {
            println!("{:>10}  {}", style(name).bold(), value);
        }
    };

    field("Service", &entry.service);
    field("Website", &entry.website);
    field("Username", &entry.username);
    field("Email", &entry.email);
    if show_password {
        field("Password", &entry.password);
    } else {
        field("Password", &"\u{2022}".repeat(8));
    }
    println!(
        "{:>10}  {}",
        style("Strength").bold(),
        strength_label(&entry.strength)
    );
    field("Category", entry.category.as_str());
    field("Notes", &entry.notes);
    field(
        "Created",
        &entry.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
}
