//! Translation set reconciliation.
//!
//! # Responsibility
//! - Partition a desired translation list against persisted records into
//!   add/update/delete sets keyed by language code.
//!
//! # Invariants
//! - Each language code lands in at most one of the three sets.
//! - `to_update` only carries records whose fields actually change, so an
//!   unchanged target list produces an empty diff.
//! - Updated records keep their row id.
//! - When `target` repeats a language code, the first occurrence wins.

use crate::locale::translation::{Translation, TranslationInput};
use crate::model::language::LanguageCode;
use std::collections::{HashMap, HashSet};

/// Minimal set of writes turning `existing` into `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationDiff<T> {
    /// Languages only present in the target list.
    pub to_add: Vec<TranslationInput>,
    /// Existing records with new field values already copied in.
    pub to_update: Vec<T>,
    /// Existing records whose language is absent from the target list.
    pub to_delete: Vec<T>,
}

impl<T> TranslationDiff<T> {
    /// Returns true when applying this diff would not touch storage.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}

impl<T> Default for TranslationDiff<T> {
    fn default() -> Self {
        Self {
            to_add: Vec::new(),
            to_update: Vec::new(),
            to_delete: Vec::new(),
        }
    }
}

/// Computes the diff between persisted translations and a desired list.
pub fn diff_translations<T: Translation>(
    existing: &[T],
    target: &[TranslationInput],
) -> TranslationDiff<T> {
    let by_language: HashMap<&LanguageCode, &T> = existing
        .iter()
        .map(|record| (record.language_code(), record))
        .collect();
    let mut seen: HashSet<&LanguageCode> = HashSet::with_capacity(target.len());
    let mut diff = TranslationDiff::default();

    for input in target {
        if !seen.insert(&input.language_code) {
            continue;
        }
        match by_language.get(&input.language_code) {
            Some(record) if record.matches_input(input) => {}
            Some(record) => {
                let mut updated = (*record).clone();
                updated.apply_input(input);
                diff.to_update.push(updated);
            }
            None => diff.to_add.push(input.clone()),
        }
    }

    diff.to_delete = existing
        .iter()
        .filter(|record| !seen.contains(record.language_code()))
        .cloned()
        .collect();

    diff
}

#[cfg(test)]
mod tests {
    use super::diff_translations;
    use crate::locale::translation::TranslationInput;
    use crate::model::facet::FacetTranslation;
    use crate::model::language::LanguageCode;
    use uuid::Uuid;

    fn lang(code: &str) -> LanguageCode {
        LanguageCode::parse(code).unwrap()
    }

    fn record(id: i64, base_id: Uuid, code: &str, name: &str) -> FacetTranslation {
        FacetTranslation {
            id,
            base_id,
            language_code: lang(code),
            name: name.to_string(),
        }
    }

    fn input(code: &str, name: &str) -> TranslationInput {
        TranslationInput::new(lang(code), name)
    }

    #[test]
    fn unchanged_target_yields_empty_diff() {
        let base = Uuid::new_v4();
        let existing = vec![record(1, base, "en", "Color"), record(2, base, "de", "Farbe")];
        let target = vec![input("de", "Farbe"), input("en", "Color")];

        let diff = diff_translations(&existing, &target);
        assert!(diff.is_empty());
    }

    #[test]
    fn partitions_by_language_code() {
        let base = Uuid::new_v4();
        let existing = vec![
            record(1, base, "en", "Color"),
            record(2, base, "de", "Farbe"),
            record(3, base, "fr", "Couleur"),
        ];
        let target = vec![
            input("en", "Colour"),
            input("de", "Farbe"),
            input("es", "Color"),
        ];

        let diff = diff_translations(&existing, &target);
        assert_eq!(diff.to_add, vec![input("es", "Color")]);
        assert_eq!(diff.to_update, vec![record(1, base, "en", "Colour")]);
        assert_eq!(diff.to_delete, vec![record(3, base, "fr", "Couleur")]);
    }

    #[test]
    fn diff_against_empty_set_adds_everything() {
        let target = vec![input("en", "Size"), input("de", "Größe")];

        let diff = diff_translations::<FacetTranslation>(&[], &target);
        assert_eq!(diff.to_add, target);
        assert!(diff.to_update.is_empty());
        assert!(diff.to_delete.is_empty());
    }

    #[test]
    fn empty_target_deletes_everything() {
        let base = Uuid::new_v4();
        let existing = vec![record(1, base, "en", "Color")];

        let diff = diff_translations(&existing, &[]);
        assert_eq!(diff.to_delete, existing);
        assert!(diff.to_add.is_empty());
    }

    #[test]
    fn repeated_language_in_target_keeps_first_occurrence() {
        let target = vec![input("en", "First"), input("en", "Second")];

        let diff = diff_translations::<FacetTranslation>(&[], &target);
        assert_eq!(diff.to_add, vec![input("en", "First")]);
    }
}
