//! Integration tests for the Lockbox CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.  The
//! master passphrase comes from `LOCKBOX_PASSPHRASE` and entry passwords
//! are piped on stdin, so no test needs a terminal.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const PASS: &str = "correcthorse123";

/// Helper: a `lockbox` command running inside `dir`.
fn lockbox(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("lockbox").expect("binary should exist");
    cmd.current_dir(dir.path())
        .env_remove("LOCKBOX_PASSPHRASE")
        .env_remove("LOCKBOX_NEW_PASSPHRASE")
        .env_remove("LOCKBOX_LOG");
    cmd
}

/// Helper: a `lockbox` command with the master passphrase set.
fn unlocked(dir: &TempDir) -> Command {
    let mut cmd = lockbox(dir);
    cmd.env("LOCKBOX_PASSPHRASE", PASS);
    cmd
}

fn init_vault(dir: &TempDir) {
    unlocked(dir).arg("init").assert().success();
}

fn add_entry(dir: &TempDir, service: &str, password: &str) {
    unlocked(dir)
        .args(["add", service, "--username", "ana", "--category", "work"])
        .write_stdin(format!("{password}\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Added '{service}'")));
}

/// Id of the first entry, read from the stored file via `list`.
fn first_id(dir: &TempDir) -> String {
    let out = unlocked(dir).arg("list").output().unwrap();
    let stdout = String::from_utf8(out.stdout).unwrap();
    stdout
        .split(|c: char| !c.is_ascii_digit())
        .find(|tok| tok.len() >= 13)
        .expect("an entry id in the table")
        .to_string()
}

// ---------------------------------------------------------------------------
// Non-interactive basics
// ---------------------------------------------------------------------------

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    lockbox(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local encrypted password vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("change-passphrase"));
}

#[test]
fn version_command_shows_version() {
    let tmp = TempDir::new().unwrap();
    lockbox(&tmp)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lockbox"));
}

#[test]
fn no_args_shows_help() {
    let tmp = TempDir::new().unwrap();
    lockbox(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn completions_for_bash() {
    let tmp = TempDir::new().unwrap();
    lockbox(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lockbox"));
}

// ---------------------------------------------------------------------------
// Generator and strength (no vault needed)
// ---------------------------------------------------------------------------

#[test]
fn generate_prints_password_of_requested_length() {
    let tmp = TempDir::new().unwrap();
    let out = lockbox(&tmp)
        .args(["generate", "--length", "24"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.trim_end_matches('\n').chars().count(), 24);
}

#[test]
fn generate_clamps_too_short_length() {
    let tmp = TempDir::new().unwrap();
    let out = lockbox(&tmp)
        .args(["generate", "--length", "2"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.trim_end_matches('\n').chars().count(), 4);
}

#[test]
fn strength_scores_piped_password() {
    let tmp = TempDir::new().unwrap();
    lockbox(&tmp)
        .arg("strength")
        .write_stdin("Vq7#mZ2!pL9@xR4$wT6&\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("strong (100)"));

    lockbox(&tmp)
        .arg("strength")
        .write_stdin("abc12345\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("weak"));
}

// ---------------------------------------------------------------------------
// Vault lifecycle
// ---------------------------------------------------------------------------

#[test]
fn status_reports_lifecycle() {
    let tmp = TempDir::new().unwrap();
    lockbox(&tmp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("no vault"));

    init_vault(&tmp);
    tmp.child(".lockbox/passwords_encrypted.json")
        .assert(predicate::path::exists());

    lockbox(&tmp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("locked"));
}

#[test]
fn init_twice_fails() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);
    unlocked(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_rejects_short_passphrase() {
    let tmp = TempDir::new().unwrap();
    lockbox(&tmp)
        .env("LOCKBOX_PASSPHRASE", "short")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8"));
    tmp.child(".lockbox/passwords_encrypted.json")
        .assert(predicate::path::missing());
}

#[test]
fn list_without_vault_fails() {
    let tmp = TempDir::new().unwrap();
    unlocked(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("lockbox init"));
}

#[test]
fn add_then_list_and_get() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);
    add_entry(&tmp, "Gmail", "abc12345");

    unlocked(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gmail"))
        .stdout(predicate::str::contains("work"))
        .stdout(predicate::str::contains("abc12345").not());

    let id = first_id(&tmp);
    unlocked(&tmp)
        .args(["get", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gmail"))
        .stdout(predicate::str::contains("abc12345").not());

    unlocked(&tmp)
        .args(["get", &id, "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("abc12345"));
}

#[test]
fn stored_file_has_no_plaintext() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);
    add_entry(&tmp, "Gmail", "hunter2-plaintext");

    let raw = std::fs::read_to_string(tmp.path().join(".lockbox/passwords_encrypted.json"))
        .unwrap();
    assert!(!raw.contains("hunter2-plaintext"));
    assert!(!raw.contains("Gmail"));
}

#[test]
fn wrong_passphrase_is_rejected() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);

    lockbox(&tmp)
        .env("LOCKBOX_PASSPHRASE", "not-the-passphrase")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid master passphrase"));
}

#[test]
fn search_filters_entries() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);
    add_entry(&tmp, "Gmail", "abc12345");
    add_entry(&tmp, "Chase", "Tr0ub4dor&Xy");

    unlocked(&tmp)
        .args(["list", "--search", "gma"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gmail"))
        .stdout(predicate::str::contains("Chase").not());

    unlocked(&tmp)
        .args(["list", "--category", "banking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn edit_and_remove_entry() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);
    add_entry(&tmp, "Gmail", "abc12345");
    let id = first_id(&tmp);

    unlocked(&tmp)
        .args(["edit", &id, "--username", "beto"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 'Gmail'"));

    unlocked(&tmp)
        .args(["get", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("beto"));

    unlocked(&tmp)
        .args(["remove", &id, "--force"])
        .assert()
        .success();

    unlocked(&tmp)
        .args(["get", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn change_passphrase_switches_the_key() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);
    add_entry(&tmp, "Gmail", "abc12345");

    unlocked(&tmp)
        .env("LOCKBOX_NEW_PASSPHRASE", "a-brand-new-passphrase")
        .arg("change-passphrase")
        .assert()
        .success();

    unlocked(&tmp).arg("list").assert().failure();
    lockbox(&tmp)
        .env("LOCKBOX_PASSPHRASE", "a-brand-new-passphrase")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gmail"));
}

#[test]
fn init_migrates_legacy_plaintext() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".lockbox/passwords.json")
        .write_str(
            r#"[{"id":1700000000000,"service":"Legacy Mail","password":"abc12345","createdAt":"2024-01-01T00:00:00Z"}]"#,
        )
        .unwrap();

    lockbox(&tmp)
        .arg("status")
        .assert()
        .success()
        .stderr(predicate::str::contains("unencrypted"));

    unlocked(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted 1 existing entries"));

    tmp.child(".lockbox/passwords.json")
        .assert(predicate::path::missing());

    unlocked(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Legacy Mail"));
}

#[test]
fn kdf_setting_in_config_does_not_lock_out_existing_vault() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);
    add_entry(&tmp, "Gmail", "abc12345");

    tmp.child(".lockbox.toml")
        .write_str("kdf_iterations = 200000\n")
        .unwrap();

    unlocked(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gmail"));
}

#[test]
fn change_passphrase_without_vault_fails_before_prompting() {
    let tmp = TempDir::new().unwrap();
    // No LOCKBOX_PASSPHRASE: reaching the prompt would fail differently.
    lockbox(&tmp)
        .arg("change-passphrase")
        .assert()
        .failure()
        .stderr(predicate::str::contains("lockbox init"));
}

#[test]
fn custom_store_dir_is_used() {
    let tmp = TempDir::new().unwrap();
    unlocked(&tmp)
        .args(["init", "--store-dir", "vaultdata"])
        .assert()
        .success();
    tmp.child("vaultdata/passwords_encrypted.json")
        .assert(predicate::path::exists());
}

#[cfg(feature = "audit-log")]
#[test]
fn audit_records_operations() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);
    add_entry(&tmp, "Gmail", "abc12345");

    lockbox(&tmp)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("Gmail").not());
}
