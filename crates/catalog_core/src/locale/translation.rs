//! Shared contract for per-language translation records.

use crate::model::language::LanguageCode;
use serde::{Deserialize, Serialize};

/// Desired translation text for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationInput {
    pub language_code: LanguageCode,
    pub name: String,
}

impl TranslationInput {
    pub fn new(language_code: LanguageCode, name: impl Into<String>) -> Self {
        Self {
            language_code,
            name: name.into(),
        }
    }
}

/// A persisted translation row keyed by language code.
///
/// Implemented once per translatable entity type so the diff and resolution
/// routines stay generic.
pub trait Translation: Clone {
    fn language_code(&self) -> &LanguageCode;
    /// Returns true when every translatable field already equals `input`.
    fn matches_input(&self, input: &TranslationInput) -> bool;
    /// Copies translatable fields from `input`, keeping row identity.
    fn apply_input(&mut self, input: &TranslationInput);
}
