//! Advisory password strength scoring.
//!
//! The score is UI metadata stored next to each entry; it is not a
//! security boundary.  Points come from length thresholds and character
//! class diversity, minus penalties for repeated runs and well-known
//! sequences.

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Symbols that earn the "symbol" bonus.
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Quote, backtick, tilde and slash characters that earn the "special" bonus.
pub const SPECIALS: &str = "~`\"'\\/";

/// Coarse strength bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLevel::Weak => "weak",
            StrengthLevel::Fair => "fair",
            StrengthLevel::Good => "good",
            StrengthLevel::Strong => "strong",
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strength attribute embedded in every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strength {
    pub level: StrengthLevel,
    /// 0 to 100 inclusive.
    pub score: u8,
}

impl Default for Strength {
    fn default() -> Self {
        Self {
            level: StrengthLevel::Weak,
            score: 0,
        }
    }
}

fn common_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)123|abc|qwe|password|admin").expect("static regex is valid")
    })
}

/// Score a password.
pub fn score_password(password: &str) -> Strength {
    if password.is_empty() {
        return Strength::default();
    }

    let chars: Vec<char> = password.chars().collect();
    let len = chars.len();
    let mut score: i32 = 0;

    // Length
    if len >= 8 {
        score += 15;
    }
    if len >= 12 {
        score += 20;
    }
    if len >= 16 {
        score += 25;
    }
    if len >= 20 {
        score += 15;
    }

    // Character classes
    if chars.iter().any(|c| c.is_ascii_lowercase()) {
        score += 8;
    }
    if chars.iter().any(|c| c.is_ascii_uppercase()) {
        score += 8;
    }
    if chars.iter().any(|c| c.is_ascii_digit()) {
        score += 8;
    }
    if chars.iter().any(|c| SYMBOLS.contains(*c)) {
        score += 12;
    }
    if chars.iter().any(|c| SPECIALS.contains(*c)) {
        score += 8;
    }

    // Diversity: at least 70% distinct characters.
    let unique = chars.iter().collect::<HashSet<_>>().len();
    if unique * 10 >= len * 7 {
        score += 10;
    }

    // Penalties
    if has_repeated_run(&chars, 3) {
        score -= 10;
    }
    if common_pattern().is_match(password) {
        score -= 20;
    }

    let level = if score >= 85 {
        StrengthLevel::Strong
    } else if score >= 65 {
        StrengthLevel::Good
    } else if score >= 40 {
        StrengthLevel::Fair
    } else {
        StrengthLevel::Weak
    };

    Strength {
        level,
        score: score.clamp(0, 100) as u8,
    }
}

/// Returns `true` if some character repeats at least `run` times in a row.
fn has_repeated_run(chars: &[char], run: usize) -> bool {
    chars.windows(run).any(|w| w.iter().all(|c| *c == w[0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_is_weak_zero() {
        assert_eq!(score_password(""), Strength::default());
    }

    #[test]
    fn short_lowercase_is_weak() {
        let s = score_password("hello");
        // 8 (lower) + 10 (4 distinct of 5 ≥ 70%)
        assert_eq!(s.score, 18);
        assert_eq!(s.level, StrengthLevel::Weak);
    }

    #[test]
    fn gmail_example_scores_weak() {
        // len 8: +15, lower +8, digit +8, distinct 8/8 +10, "abc" and "123" −20
        let s = score_password("abc12345");
        assert_eq!(s.score, 21);
        assert_eq!(s.level, StrengthLevel::Weak);
    }

    #[test]
    fn long_mixed_password_is_strong() {
        let s = score_password("Vq7#mZ2!pL9@xR4$wT6&");
        assert_eq!(s.level, StrengthLevel::Strong);
        assert_eq!(s.score, 100);
    }

    #[test]
    fn twelve_chars_mixed_is_good() {
        // len 12: 15+20, lower, upper, digit: 24, symbol 12, diversity 10 → 81
        let s = score_password("Tr0ub4dor&Xy");
        assert_eq!(s.score, 81);
        assert_eq!(s.level, StrengthLevel::Good);
    }

    #[test]
    fn repeated_run_is_penalised() {
        let plain = score_password("xkcdzq");
        let repeated = score_password("xkcddd");
        assert!(repeated.score < plain.score);
    }

    #[test]
    fn common_patterns_are_case_insensitive() {
        let a = score_password("myPASSWORDxy");
        let b = score_password("myPASZWORDxy");
        assert_eq!(i32::from(b.score) - i32::from(a.score), 20);
    }

    #[test]
    fn score_never_goes_negative() {
        let s = score_password("aaa");
        assert_eq!(s.score, 0);
        assert_eq!(s.level, StrengthLevel::Weak);
    }

    #[test]
    fn special_characters_count() {
        let without = score_password("plainword");
        let with = score_password("plainword~");
        assert!(with.score > without.score);
    }

    #[test]
    fn level_serializes_lowercase() {
        let json = serde_json::to_string(&Strength {
            level: StrengthLevel::Good,
            score: 70,
        })
        .unwrap();
        assert_eq!(json, r#"{"level":"good","score":70}"#);
    }
}
