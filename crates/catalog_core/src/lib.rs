//! Core domain logic for the multi-language catalog.
//! This crate owns facet persistence, translation reconciliation and the
//! invariants that come with them.

pub mod db;
pub mod locale;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use locale::diff::{diff_translations, TranslationDiff};
pub use locale::translate::{
    resolve_translation, translate_facet, TranslatedFacet, TranslatedFacetValue,
    TranslationError,
};
pub use locale::translation::{Translation, TranslationInput};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::facet::{
    CreateFacetInput, CreateFacetValueInput, Facet, FacetId, FacetTranslation, FacetValue,
    FacetValueId, FacetValueTranslation, UpdateFacetInput,
};
pub use model::language::{LanguageCode, LanguageCodeError, DEFAULT_LANGUAGE_CODE};
pub use repo::facet_repo::{
    FacetPage, FacetRepository, RepoError, RepoResult, SqliteFacetRepository,
};
pub use repo::list_query::{
    FacetFilter, FacetSort, FacetSortField, ListQueryOptions, SortOrder, LIST_DEFAULT_TAKE,
    LIST_TAKE_MAX,
};
pub use service::facet_service::{
    FacetService, FacetServiceError, FacetServiceResult, PaginatedList,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
