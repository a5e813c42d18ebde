//! Locale handling for translatable entities.
//!
//! # Responsibility
//! - Define the shared translation record contract.
//! - Reconcile desired translation sets against persisted ones.
//! - Project entities into one requested language.

pub mod diff;
pub mod translate;
pub mod translation;
