//! Whole-list transformations over the decrypted entries.
//!
//! Every edit produces a complete new list; the controller hands that
//! list to its save path, which re-encrypts it as a whole.  Nothing here
//! touches storage.

use chrono::{DateTime, Utc};

use super::entry::{Category, EntryPatch, NewEntry, PasswordEntry};
use crate::errors::{LockboxError, Result};

/// Pick an id for a new entry.
///
/// Ids come from the millisecond clock but are bumped past the largest
/// existing id, so two entries added within the same millisecond (or
/// after a clock step backwards) still get distinct, increasing ids.
/// Fails with `InvalidEntry` once the largest id is `i64::MAX`.
pub fn next_id(entries: &[PasswordEntry], now: DateTime<Utc>) -> Result<i64> {
    let clock = now.timestamp_millis();
    match entries.iter().map(|e| e.id).max() {
        Some(max) if max >= clock => max
            .checked_add(1)
            .ok_or_else(|| LockboxError::InvalidEntry("no entry ids left".into())),
        _ => Ok(clock),
    }
}

/// Return a new list with `form` appended, plus the id it was given.
pub fn add(
    entries: &[PasswordEntry],
    form: NewEntry,
    now: DateTime<Utc>,
) -> Result<(Vec<PasswordEntry>, i64)> {
    let id = next_id(entries, now)?;
    let entry = form.into_entry(id, now)?;

    let mut updated = Vec::with_capacity(entries.len() + 1);
    updated.extend_from_slice(entries);
    updated.push(entry);
    Ok((updated, id))
}

/// Return a new list without the entry `id`.
pub fn remove(entries: &[PasswordEntry], id: i64) -> Result<Vec<PasswordEntry>> {
    if !entries.iter().any(|e| e.id == id) {
        return Err(LockboxError::EntryNotFound(id));
    }
    Ok(entries.iter().filter(|e| e.id != id).cloned().collect())
}

/// Return a new list with `patch` applied to entry `id`.
pub fn update(entries: &[PasswordEntry], id: i64, patch: &EntryPatch) -> Result<Vec<PasswordEntry>> {
    let position = entries
        .iter()
        .position(|e| e.id == id)
        .ok_or(LockboxError::EntryNotFound(id))?;

    let replacement = patch.apply(&entries[position])?;
    let mut updated = entries.to_vec();
    updated[position] = replacement;
    Ok(updated)
}

/// Find entries whose service, username or email contains `term`
/// (case-insensitive), optionally restricted to one category.
///
/// An empty term matches everything.
pub fn search<'a>(
    entries: &'a [PasswordEntry],
    term: &str,
    category: Option<Category>,
) -> Vec<&'a PasswordEntry> {
    let needle = term.trim().to_lowercase();
    entries
        .iter()
        .filter(|e| category.map_or(true, |c| e.category == c))
        .filter(|e| {
            needle.is_empty()
                || e.service.to_lowercase().contains(&needle)
                || e.username.to_lowercase().contains(&needle)
                || e.email.to_lowercase().contains(&needle)
        })
        .collect()
}
