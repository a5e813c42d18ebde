//! Projection of translatable entities into a single language.
//!
//! # Invariants
//! - Resolution order: requested language, then `DEFAULT_LANGUAGE_CODE`, then
//!   the first stored translation.
//! - An entity with zero translations cannot be projected.

use crate::locale::translation::Translation;
use crate::model::facet::{Facet, FacetId, FacetTranslation, FacetValue, FacetValueId};
use crate::model::language::LanguageCode;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Error raised when an entity has no translation at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    NoTranslation { entity: &'static str, id: Uuid },
}

impl Display for TranslationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTranslation { entity, id } => {
                write!(f, "{entity} {id} has no translation in any language")
            }
        }
    }
}

impl Error for TranslationError {}

/// Facet value rendered in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedFacetValue {
    pub id: FacetValueId,
    pub facet_id: FacetId,
    pub code: String,
    /// Language the `name` was actually taken from.
    pub language_code: LanguageCode,
    pub name: String,
}

/// Facet rendered in one language, with its values rendered the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedFacet {
    pub id: FacetId,
    pub code: String,
    /// Language the `name` was actually taken from.
    pub language_code: LanguageCode,
    pub name: String,
    /// All stored translations, for editing clients.
    pub translations: Vec<FacetTranslation>,
    pub values: Vec<TranslatedFacetValue>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Picks the best translation for `lang` using the fallback order.
pub fn resolve_translation<'a, T: Translation>(
    translations: &'a [T],
    lang: &LanguageCode,
) -> Option<&'a T> {
    let default_language = LanguageCode::default_language();
    translations
        .iter()
        .find(|record| record.language_code() == lang)
        .or_else(|| {
            translations
                .iter()
                .find(|record| *record.language_code() == default_language)
        })
        .or_else(|| translations.first())
}

/// Projects one facet value into `lang`.
pub fn translate_facet_value(
    value: &FacetValue,
    lang: &LanguageCode,
) -> Result<TranslatedFacetValue, TranslationError> {
    let translation = resolve_translation(&value.translations, lang).ok_or(
        TranslationError::NoTranslation {
            entity: "facet value",
            id: value.id,
        },
    )?;

    Ok(TranslatedFacetValue {
        id: value.id,
        facet_id: value.facet_id,
        code: value.code.clone(),
        language_code: translation.language_code.clone(),
        name: translation.name.clone(),
    })
}

/// Projects one facet and all of its values into `lang`.
pub fn translate_facet(
    facet: &Facet,
    lang: &LanguageCode,
) -> Result<TranslatedFacet, TranslationError> {
    let translation = resolve_translation(&facet.translations, lang).ok_or(
        TranslationError::NoTranslation {
            entity: "facet",
            id: facet.id,
        },
    )?;
    let values = facet
        .values
        .iter()
        .map(|value| translate_facet_value(value, lang))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TranslatedFacet {
        id: facet.id,
        code: facet.code.clone(),
        language_code: translation.language_code.clone(),
        name: translation.name.clone(),
        translations: facet.translations.clone(),
        values,
        created_at: facet.created_at,
        updated_at: facet.updated_at,
    })
}
