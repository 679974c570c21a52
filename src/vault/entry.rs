//! Password entries held in memory while the vault is unlocked.
//!
//! Entries are serialized with camelCase field names (`createdAt`) so
//! that plaintext data from before encryption was introduced, and every
//! envelope written since, parse unchanged.  Optional text fields,
//! `category` and `strength` fall back to defaults when missing.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::strength::{score_password, Strength};
use crate::errors::{LockboxError, Result};

/// Entry category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Personal,
    Work,
    Banking,
    Social,
    Shopping,
    Entertainment,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Personal,
        Category::Work,
        Category::Banking,
        Category::Social,
        Category::Shopping,
        Category::Entertainment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Work => "work",
            Category::Banking => "banking",
            Category::Social => "social",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
                format!("unknown category '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// A single decrypted password entry.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordEntry {
    /// Unique, immutable, millisecond-clock derived.
    pub id: i64,

    pub service: String,

    #[serde(default)]
    pub website: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub email: String,

    /// The plaintext secret.  Wiped from memory when the entry is dropped.
    pub password: String,

    #[serde(default)]
    pub category: Category,

    #[serde(default)]
    pub notes: String,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub strength: Strength,
}

impl Drop for PasswordEntry {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl fmt::Debug for PasswordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordEntry")
            .field("id", &self.id)
            .field("service", &self.service)
            .field("website", &self.website)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .field("category", &self.category)
            .field("notes", &self.notes)
            .field("created_at", &self.created_at)
            .field("strength", &self.strength)
            .finish()
    }
}

/// The fields a user submits when adding an entry.
///
/// `service` and `password` are required; everything else may be left
/// empty.
#[derive(Clone, Default, PartialEq)]
pub struct NewEntry {
    pub service: String,
    pub website: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub category: Category,
    pub notes: String,
}

impl NewEntry {
    /// Start a form with the two required fields.
    pub fn new(service: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Validate the form and build the stored entry.
    ///
    /// Strength is computed here, once, from the submitted password.
    pub fn into_entry(self, id: i64, created_at: DateTime<Utc>) -> Result<PasswordEntry> {
        validate_required("service", &self.service)?;
        if self.password.is_empty() {
            return Err(LockboxError::InvalidEntry("password is required".into()));
        }

        let strength = score_password(&self.password);
        Ok(PasswordEntry {
            id,
            service: self.service.trim().to_string(),
            website: self.website,
            username: self.username,
            email: self.email,
            password: self.password,
            category: self.category,
            notes: self.notes,
            created_at,
            strength,
        })
    }
}

impl fmt::Debug for NewEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewEntry")
            .field("service", &self.service)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// A partial edit.  `None` leaves the field untouched.
#[derive(Clone, Default)]
pub struct EntryPatch {
    pub service: Option<String>,
    pub website: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub category: Option<Category>,
    pub notes: Option<String>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.service.is_none()
            && self.website.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.category.is_none()
            && self.notes.is_none()
    }

    /// Apply the patch to a copy of `entry`.
    ///
    /// `id` and `created_at` never change.  Strength is recomputed only
    /// when the password actually changes.
    pub fn apply(&self, entry: &PasswordEntry) -> Result<PasswordEntry> {
        let mut updated = entry.clone();

        if let Some(service) = &self.service {
            validate_required("service", service)?;
            updated.service = service.trim().to_string();
        }
        if let Some(website) = &self.website {
            updated.website.clone_from(website);
        }
        if let Some(username) = &self.username {
            updated.username.clone_from(username);
        }
        if let Some(email) = &self.email {
            updated.email.clone_from(email);
        }
        if let Some(category) = self.category {
            updated.category = category;
        }
        if let Some(notes) = &self.notes {
            updated.notes.clone_from(notes);
        }
        if let Some(password) = &self.password {
            if password.is_empty() {
                return Err(LockboxError::InvalidEntry("password is required".into()));
            }
            if *password != entry.password {
                updated.password.zeroize();
                updated.password.clone_from(password);
                updated.strength = score_password(password);
            }
        }

        Ok(updated)
    }
}

impl fmt::Debug for EntryPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPatch")
            .field("service", &self.service)
            .field("password_changed", &self.password.is_some())
            .finish_non_exhaustive()
    }
}

fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LockboxError::InvalidEntry(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::strength::StrengthLevel;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn new_entry_requires_service_and_password() {
        assert!(NewEntry::new("", "secret").into_entry(1, now()).is_err());
        assert!(NewEntry::new("   ", "secret").into_entry(1, now()).is_err());
        assert!(NewEntry::new("Gmail", "").into_entry(1, now()).is_err());
        assert!(NewEntry::new("Gmail", "abc12345").into_entry(1, now()).is_ok());
    }

    #[test]
    fn new_entry_computes_strength_and_defaults() {
        let entry = NewEntry::new("Gmail", "abc12345")
            .into_entry(42, now())
            .unwrap();
        assert_eq!(entry.id, 42);
        assert_eq!(entry.category, Category::Personal);
        assert_eq!(entry.strength, score_password("abc12345"));
        assert!(entry.website.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let entry = NewEntry::new("Gmail", "abc12345")
            .category(Category::Work)
            .into_entry(1, now())
            .unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["category"], "work");
        assert_eq!(json["strength"]["level"], "weak");
    }

    #[test]
    fn parses_legacy_entry_with_missing_optional_fields() {
        let json = r#"{
            "id": 1717000000000,
            "service": "Netflix",
            "password": "hunter22",
            "createdAt": "2024-05-29T12:00:00.000Z"
        }"#;
        let entry: PasswordEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.service, "Netflix");
        assert_eq!(entry.category, Category::Personal);
        assert_eq!(entry.strength.level, StrengthLevel::Weak);
        assert!(entry.notes.is_empty());
    }

    #[test]
    fn rejects_entry_without_password_field() {
        let json = r#"{"id": 1, "service": "x", "createdAt": "2024-05-29T12:00:00Z"}"#;
        assert!(serde_json::from_str::<PasswordEntry>(json).is_err());
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Banking".parse::<Category>().unwrap(), Category::Banking);
        assert!("crypto".parse::<Category>().is_err());
    }

    #[test]
    fn debug_redacts_password() {
        let entry = NewEntry::new("Gmail", "abc12345")
            .into_entry(1, now())
            .unwrap();
        let shown = format!("{entry:?}");
        assert!(!shown.contains("abc12345"));
    }

    #[test]
    fn patch_keeps_identity_and_recomputes_strength_on_password_change() {
        let entry = NewEntry::new("Gmail", "abc12345")
            .into_entry(7, now())
            .unwrap();
        let patch = EntryPatch {
            password: Some("Vq7#mZ2!pL9@xR4$wT6&".into()),
            ..EntryPatch::default()
        };
        let updated = patch.apply(&entry).unwrap();
        assert_eq!(updated.id, entry.id);
        assert_eq!(updated.created_at, entry.created_at);
        assert_eq!(updated.strength.level, StrengthLevel::Strong);
    }

    #[test]
    fn patch_without_password_keeps_strength() {
        let mut entry = NewEntry::new("Gmail", "abc12345")
            .into_entry(7, now())
            .unwrap();
        // Stored strength is never recomputed unless the password changes.
        entry.strength = Strength {
            level: StrengthLevel::Good,
            score: 70,
        };
        let patch = EntryPatch {
            notes: Some("2FA enabled".into()),
            password: Some("abc12345".into()),
            ..EntryPatch::default()
        };
        let updated = patch.apply(&entry).unwrap();
        assert_eq!(updated.notes, "2FA enabled");
        assert_eq!(updated.strength.score, 70);
    }

    #[test]
    fn patch_cannot_blank_required_fields() {
        let entry = NewEntry::new("Gmail", "abc12345")
            .into_entry(7, now())
            .unwrap();
        let blank_service = EntryPatch {
            service: Some(" ".into()),
            ..EntryPatch::default()
        };
        let blank_password = EntryPatch {
            password: Some(String::new()),
            ..EntryPatch::default()
        };
        assert!(blank_service.apply(&entry).is_err());
        assert!(blank_password.apply(&entry).is_err());
        assert!(EntryPatch::default().is_empty());
    }
}
