//! Random password generator.
//!
//! Builds a charset from the selected character classes, guarantees at
//! least one character from each selected class, fills the rest
//! uniformly and shuffles the result.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use super::strength::{SPECIALS, SYMBOLS};
use crate::errors::{LockboxError, Result};

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &str = "0123456789";

/// Characters that are easy to confuse when read back.
const SIMILAR: &str = "0Oo1IlL|";

/// Shortest and longest password the generator will produce.
pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;

/// Generator options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    pub special: bool,
    pub exclude_similar: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
            special: true,
            exclude_similar: true,
        }
    }
}

impl GeneratorConfig {
    fn filtered(&self, class: &str) -> Vec<char> {
        class
            .chars()
            .filter(|c| !(self.exclude_similar && SIMILAR.contains(*c)))
            .collect()
    }

    /// The selected classes, each already stripped of similar characters.
    fn classes(&self) -> Vec<(bool, Vec<char>)> {
        // The bool marks classes that get a guaranteed character.
        let mut classes = Vec::with_capacity(5);
        if self.uppercase {
            classes.push((true, self.filtered(UPPERCASE)));
        }
        if self.lowercase {
            classes.push((true, self.filtered(LOWERCASE)));
        }
        if self.numbers {
            classes.push((true, self.filtered(NUMBERS)));
        }
        if self.symbols {
            classes.push((true, self.filtered(SYMBOLS)));
        }
        if self.special {
            classes.push((false, self.filtered(SPECIALS)));
        }
        classes
    }
}

/// Generate a password with the thread-local CSPRNG.
pub fn generate_password(config: &GeneratorConfig) -> Result<String> {
    generate_password_with(config, &mut rand::rng())
}

/// Generate a password drawing from `rng`.
pub fn generate_password_with<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<String> {
    let classes = config.classes();
    let charset: Vec<char> = classes.iter().flat_map(|(_, c)| c.iter().copied()).collect();
    if charset.is_empty() {
        return Err(LockboxError::InvalidGeneratorConfig(
            "select at least one character class".into(),
        ));
    }

    let length = config.length.clamp(MIN_LENGTH, MAX_LENGTH);
    let mut password: Vec<char> = Vec::with_capacity(length);

    for (_, class) in classes.iter().filter(|(guaranteed, _)| *guaranteed) {
        if let Some(c) = class.choose(rng) {
            password.push(*c);
        }
    }

    while password.len() < length {
        if let Some(c) = charset.choose(rng) {
            password.push(*c);
        }
    }

    password.shuffle(rng);
    Ok(password.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_config_produces_sixteen_chars_from_every_class() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let pw = generate_password_with(&GeneratorConfig::default(), &mut rng).unwrap();
            assert_eq!(pw.chars().count(), 16);
            assert!(pw.chars().any(|c| c.is_ascii_uppercase()));
            assert!(pw.chars().any(|c| c.is_ascii_lowercase()));
            assert!(pw.chars().any(|c| c.is_ascii_digit()));
            assert!(pw.chars().any(|c| SYMBOLS.contains(c)));
        }
    }

    #[test]
    fn exclude_similar_removes_confusable_characters() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = GeneratorConfig {
            length: 128,
            ..GeneratorConfig::default()
        };
        for _ in 0..20 {
            let pw = generate_password_with(&config, &mut rng).unwrap();
            assert!(!pw.chars().any(|c| SIMILAR.contains(c)), "{pw}");
        }
    }

    #[test]
    fn single_class_only_uses_that_class() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = GeneratorConfig {
            length: 24,
            uppercase: false,
            lowercase: false,
            numbers: true,
            symbols: false,
            special: false,
            exclude_similar: false,
        };
        let pw = generate_password_with(&config, &mut rng).unwrap();
        assert_eq!(pw.len(), 24);
        assert!(pw.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn no_classes_is_an_error() {
        let config = GeneratorConfig {
            uppercase: false,
            lowercase: false,
            numbers: false,
            symbols: false,
            special: false,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            generate_password(&config),
            Err(LockboxError::InvalidGeneratorConfig(_))
        ));
    }

    #[test]
    fn length_is_clamped() {
        let short = GeneratorConfig {
            length: 1,
            ..GeneratorConfig::default()
        };
        let long = GeneratorConfig {
            length: 10_000,
            ..GeneratorConfig::default()
        };
        assert_eq!(generate_password(&short).unwrap().chars().count(), MIN_LENGTH);
        assert_eq!(generate_password(&long).unwrap().chars().count(), MAX_LENGTH);
    }

    #[test]
    fn generated_passwords_differ() {
        let config = GeneratorConfig::default();
        assert_ne!(
            generate_password(&config).unwrap(),
            generate_password(&config).unwrap()
        );
    }
}
