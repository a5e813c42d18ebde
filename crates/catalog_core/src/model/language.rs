//! Language code value type.
//!
//! # Responsibility
//! - Normalize and validate locale keys used by every translation record.
//!
//! # Invariants
//! - A `LanguageCode` is always lowercase and matches
//!   `^[a-z]{2,3}(-[a-z0-9]{2,8})?$`.
//! - Region separators are stored as `-` (`pt_BR` becomes `pt-br`).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Language used when a caller does not ask for a specific one, and as the
/// first fallback during translation resolution.
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

static LANGUAGE_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]{2,3}(-[a-z0-9]{2,8})?$").expect("valid language code regex")
});

/// Validation error for language code input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageCodeError {
    /// Input is empty after trim.
    Empty,
    /// Input does not look like `xx` or `xx-region`.
    Malformed(String),
}

impl Display for LanguageCodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "language code must not be empty"),
            Self::Malformed(value) => write!(f, "malformed language code `{value}`"),
        }
    }
}

impl Error for LanguageCodeError {}

/// Normalized locale key, e.g. `en`, `de`, `pt-br`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parses and normalizes raw user input.
    pub fn parse(value: &str) -> Result<Self, LanguageCodeError> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        if normalized.is_empty() {
            return Err(LanguageCodeError::Empty);
        }
        if !LANGUAGE_CODE_RE.is_match(&normalized) {
            return Err(LanguageCodeError::Malformed(value.trim().to_string()));
        }
        Ok(Self(normalized))
    }

    /// Returns the configured default language (`en`).
    pub fn default_language() -> Self {
        Self(DEFAULT_LANGUAGE_CODE.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::default_language()
    }
}

impl Display for LanguageCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = LanguageCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for LanguageCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LanguageCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{LanguageCode, LanguageCodeError, DEFAULT_LANGUAGE_CODE};

    #[test]
    fn parse_normalizes_case_and_separator() {
        assert_eq!(LanguageCode::parse(" EN ").unwrap().as_str(), "en");
        assert_eq!(LanguageCode::parse("pt_BR").unwrap().as_str(), "pt-br");
        assert_eq!(LanguageCode::parse("zh-Hant").unwrap().as_str(), "zh-hant");
    }

    #[test]
    fn parse_rejects_blank_and_malformed_values() {
        assert_eq!(LanguageCode::parse("   "), Err(LanguageCodeError::Empty));
        assert!(matches!(
            LanguageCode::parse("english"),
            Err(LanguageCodeError::Malformed(_))
        ));
        assert!(matches!(
            LanguageCode::parse("e1"),
            Err(LanguageCodeError::Malformed(_))
        ));
    }

    #[test]
    fn default_language_matches_constant() {
        assert_eq!(LanguageCode::default().as_str(), DEFAULT_LANGUAGE_CODE);
    }
}
