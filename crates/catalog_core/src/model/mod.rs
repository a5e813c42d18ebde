//! Catalog domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep write payloads separate from persisted read models.
//!
//! # Invariants
//! - Every facet and facet value is identified by a stable UUID.
//! - Translatable text lives only in translation records, never on the base row.

pub mod facet;
pub mod language;
