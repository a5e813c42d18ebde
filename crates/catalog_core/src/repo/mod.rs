//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateCode`) in
//!   addition to DB transport errors.

pub mod facet_repo;
pub mod list_query;
pub mod translation_table;
