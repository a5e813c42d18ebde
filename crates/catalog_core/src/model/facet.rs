//! Facet domain model.
//!
//! # Responsibility
//! - Define facet, facet value and their per-language translation records.
//! - Define write-side input shapes consumed by the facet service.
//!
//! # Invariants
//! - `Facet::id` and `FacetValue::id` are stable and never reused.
//! - Translations are unique per `(base_id, language_code)`.
//! - A translation row id survives update-in-place; only add/delete change it.

use crate::locale::translation::{Translation, TranslationInput};
use crate::model::language::LanguageCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable facet identifier.
pub type FacetId = Uuid;

/// Stable facet value identifier.
pub type FacetValueId = Uuid;

/// Locale-specific display text of one facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetTranslation {
    /// Storage row id.
    pub id: i64,
    /// Owning facet. Back-reference only; the facet owns the lifecycle.
    pub base_id: FacetId,
    pub language_code: LanguageCode,
    pub name: String,
}

/// Locale-specific display text of one facet value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValueTranslation {
    pub id: i64,
    pub base_id: FacetValueId,
    pub language_code: LanguageCode,
    pub name: String,
}

/// One selectable value of a facet (e.g. "Red" under "Color").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub id: FacetValueId,
    pub facet_id: FacetId,
    pub code: String,
    pub translations: Vec<FacetValueTranslation>,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds.
    pub updated_at: i64,
}

/// Named classification attribute of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub id: FacetId,
    /// Machine-readable key, unique across facets.
    pub code: String,
    pub translations: Vec<FacetTranslation>,
    /// Always loaded together with the facet.
    pub values: Vec<FacetValue>,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds.
    pub updated_at: i64,
}

impl Translation for FacetTranslation {
    fn language_code(&self) -> &LanguageCode {
        &self.language_code
    }

    fn matches_input(&self, input: &TranslationInput) -> bool {
        self.name == input.name
    }

    fn apply_input(&mut self, input: &TranslationInput) {
        self.name = input.name.clone();
    }
}

impl Translation for FacetValueTranslation {
    fn language_code(&self) -> &LanguageCode {
        &self.language_code
    }

    fn matches_input(&self, input: &TranslationInput) -> bool {
        self.name == input.name
    }

    fn apply_input(&mut self, input: &TranslationInput) {
        self.name = input.name.clone();
    }
}

/// Payload for creating a facet value together with its facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFacetValueInput {
    pub code: String,
    pub translations: Vec<TranslationInput>,
}

/// Payload for creating a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFacetInput {
    pub code: String,
    pub translations: Vec<TranslationInput>,
    #[serde(default)]
    pub values: Vec<CreateFacetValueInput>,
}

/// Payload for updating a facet.
///
/// `translations` is the complete desired set: locales missing from it are
/// removed from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFacetInput {
    pub id: FacetId,
    /// Keeps the stored code when `None`.
    #[serde(default)]
    pub code: Option<String>,
    pub translations: Vec<TranslationInput>,
}

/// Fully identified facet value ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetValueDraft {
    pub id: FacetValueId,
    pub code: String,
    pub translations: Vec<TranslationInput>,
}

/// Fully identified facet ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetDraft {
    pub id: FacetId,
    pub code: String,
    pub translations: Vec<TranslationInput>,
    pub values: Vec<FacetValueDraft>,
}

impl FacetDraft {
    /// Assigns fresh stable ids to a create payload.
    pub fn from_input(input: CreateFacetInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: input.code,
            translations: input.translations,
            values: input
                .values
                .into_iter()
                .map(|value| FacetValueDraft {
                    id: Uuid::new_v4(),
                    code: value.code,
                    translations: value.translations,
                })
                .collect(),
        }
    }
}
