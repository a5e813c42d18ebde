//! Facet use-case service.
//!
//! # Responsibility
//! - Provide list/find/create/update/delete entry points for facets.
//! - Validate write payloads before they reach storage.
//! - Reconcile translation sets on update via `diff_translations`.
//! - Return facets projected into one language.
//!
//! # Invariants
//! - Read paths return `Ok(None)` for unknown ids, never an error.
//! - Write paths re-read the facet after commit; an empty re-read is reported
//!   as `InconsistentState`.
//! - Updating with an unchanged translation list writes no translation rows.

use crate::locale::diff::diff_translations;
use crate::locale::translate::{translate_facet, TranslatedFacet, TranslationError};
use crate::locale::translation::TranslationInput;
use crate::model::facet::{
    CreateFacetInput, CreateFacetValueInput, FacetDraft, FacetId, UpdateFacetInput,
};
use crate::model::language::LanguageCode;
use crate::repo::facet_repo::{FacetRepository, RepoError};
use crate::repo::list_query::ListQueryOptions;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for facet use-cases.
#[derive(Debug)]
pub enum FacetServiceError {
    /// Payload failed validation before any write.
    InvalidInput(String),
    /// Target facet does not exist.
    FacetNotFound(FacetId),
    /// Stored facet cannot be projected into any language.
    Translation(TranslationError),
    /// Persistence-layer failure, passed through unchanged.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for FacetServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid facet input: {message}"),
            Self::FacetNotFound(id) => write!(f, "facet not found: {id}"),
            Self::Translation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent facet state: {details}"),
        }
    }
}

impl Error for FacetServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Translation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for FacetServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::FacetNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<TranslationError> for FacetServiceError {
    fn from(value: TranslationError) -> Self {
        Self::Translation(value)
    }
}

pub type FacetServiceResult<T> = Result<T, FacetServiceError>;

/// List result envelope used by service callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedList<T> {
    pub items: Vec<T>,
    /// Size of the full matching set, independent of `take`/`skip`.
    pub total_items: u64,
}

/// Facet service facade over repository implementations.
pub struct FacetService<R: FacetRepository> {
    repo: R,
    default_language: LanguageCode,
}

impl<R: FacetRepository> FacetService<R> {
    /// Creates a service that re-reads writes in `DEFAULT_LANGUAGE_CODE`.
    pub fn new(repo: R) -> Self {
        Self::with_default_language(repo, LanguageCode::default_language())
    }

    /// Creates a service that re-reads writes in `default_language`.
    pub fn with_default_language(repo: R, default_language: LanguageCode) -> Self {
        Self {
            repo,
            default_language,
        }
    }

    /// Lists one page of facets translated into `lang`.
    pub fn find_all(
        &self,
        lang: &LanguageCode,
        options: &ListQueryOptions,
    ) -> FacetServiceResult<PaginatedList<TranslatedFacet>> {
        let page = self.repo.list_facets(lang, options)?;
        let items = page
            .facets
            .iter()
            .map(|facet| translate_facet(facet, lang))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedList {
            items,
            total_items: page.total_items,
        })
    }

    /// Gets one facet translated into `lang`, or `None` when absent.
    pub fn find_one(
        &self,
        id: FacetId,
        lang: &LanguageCode,
    ) -> FacetServiceResult<Option<TranslatedFacet>> {
        match self.repo.get_facet(id)? {
            Some(facet) => Ok(Some(translate_facet(&facet, lang)?)),
            None => Ok(None),
        }
    }

    /// Creates a facet with its translations and optional seeded values.
    pub fn create(&self, input: CreateFacetInput) -> FacetServiceResult<TranslatedFacet> {
        let input = CreateFacetInput {
            code: normalize_code(&input.code)?,
            translations: normalize_translations(&input.translations)?,
            values: normalize_values(&input.values)?,
        };
        let draft = FacetDraft::from_input(input);

        let facet_id = self.repo.create_facet(&draft)?;
        info!(
            "event=facet_create module=service status=ok facet_id={} translations={} values={}",
            facet_id,
            draft.translations.len(),
            draft.values.len()
        );

        self.read_back(facet_id, "created facet not found in read-back")
    }

    /// Updates a facet, replacing its translation set by diff.
    ///
    /// Locales absent from `input.translations` are deleted, new ones are
    /// inserted and changed ones are updated in place.
    pub fn update(&self, input: UpdateFacetInput) -> FacetServiceResult<TranslatedFacet> {
        let code = input.code.as_deref().map(normalize_code).transpose()?;
        let translations = normalize_translations(&input.translations)?;

        let existing = self.repo.list_facet_translations(input.id)?;
        let diff = diff_translations(&existing, &translations);
        self.repo.update_facet(input.id, code.as_deref(), &diff)?;
        info!(
            "event=facet_update module=service status=ok facet_id={} added={} updated={} deleted={}",
            input.id,
            diff.to_add.len(),
            diff.to_update.len(),
            diff.to_delete.len()
        );

        self.read_back(input.id, "updated facet not found in read-back")
    }

    /// Deletes a facet together with its values and translations.
    pub fn delete(&self, id: FacetId) -> FacetServiceResult<()> {
        self.repo.delete_facet(id)?;
        info!("event=facet_delete module=service status=ok facet_id={id}");
        Ok(())
    }

    fn read_back(&self, id: FacetId, details: &'static str) -> FacetServiceResult<TranslatedFacet> {
        match self.find_one(id, &self.default_language)? {
            Some(facet) => Ok(facet),
            None => {
                error!("event=facet_read_back module=service status=error facet_id={id}");
                Err(FacetServiceError::InconsistentState(details))
            }
        }
    }
}

fn normalize_code(code: &str) -> FacetServiceResult<String> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(FacetServiceError::InvalidInput(
            "code must not be blank".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn normalize_translations(
    translations: &[TranslationInput],
) -> FacetServiceResult<Vec<TranslationInput>> {
    if translations.is_empty() {
        return Err(FacetServiceError::InvalidInput(
            "at least one translation is required".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(translations.len());
    let mut normalized = Vec::with_capacity(translations.len());
    for translation in translations {
        if !seen.insert(&translation.language_code) {
            return Err(FacetServiceError::InvalidInput(format!(
                "duplicate translation for language `{}`",
                translation.language_code
            )));
        }
        let name = translation.name.trim();
        if name.is_empty() {
            return Err(FacetServiceError::InvalidInput(format!(
                "translation name for language `{}` must not be blank",
                translation.language_code
            )));
        }
        normalized.push(TranslationInput::new(
            translation.language_code.clone(),
            name,
        ));
    }

    Ok(normalized)
}

fn normalize_values(
    values: &[CreateFacetValueInput],
) -> FacetServiceResult<Vec<CreateFacetValueInput>> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .iter()
        .map(|value| {
            let code = normalize_code(&value.code)?;
            if !seen.insert(code.clone()) {
                return Err(FacetServiceError::InvalidInput(format!(
                    "duplicate facet value code `{code}`"
                )));
            }
            Ok(CreateFacetValueInput {
                code,
                translations: normalize_translations(&value.translations)?,
            })
        })
        .collect()
}
