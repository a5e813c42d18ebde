//! Generic persistence for translation tables.
//!
//! # Responsibility
//! - Load translation rows for one base entity.
//! - Apply a `TranslationDiff` inside the caller's transaction. Creation
//!   applies a diff against the empty set, so there is one write path.
//!
//! # Invariants
//! - Every translation table has the columns
//!   `(id, base_id, language_code, name)`.
//! - Deletes run before inserts so a locale can be removed and re-added in
//!   one diff without tripping `UNIQUE (base_id, language_code)`.

use crate::locale::diff::TranslationDiff;
use crate::locale::translation::{Translation, TranslationInput};
use crate::model::facet::{FacetTranslation, FacetValueTranslation};
use crate::model::language::LanguageCode;
use crate::repo::facet_repo::{RepoError, RepoResult};
use rusqlite::{params, Connection};
use uuid::Uuid;

/// Storage binding for one translation record type.
pub trait TranslationTable: Translation {
    const TABLE: &'static str;

    fn from_row(id: i64, base_id: Uuid, language_code: LanguageCode, name: String) -> Self;
    fn row_id(&self) -> i64;
    fn name(&self) -> &str;
}

impl TranslationTable for FacetTranslation {
    const TABLE: &'static str = "facet_translations";

    fn from_row(id: i64, base_id: Uuid, language_code: LanguageCode, name: String) -> Self {
        Self {
            id,
            base_id,
            language_code,
            name,
        }
    }

    fn row_id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl TranslationTable for FacetValueTranslation {
    const TABLE: &'static str = "facet_value_translations";

    fn from_row(id: i64, base_id: Uuid, language_code: LanguageCode, name: String) -> Self {
        Self {
            id,
            base_id,
            language_code,
            name,
        }
    }

    fn row_id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Loads all translations of one base row, ordered by row id.
pub fn load_translations<T: TranslationTable>(
    conn: &Connection,
    base_id: Uuid,
) -> RepoResult<Vec<T>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, base_id, language_code, name
         FROM {}
         WHERE base_id = ?1
         ORDER BY id ASC;",
        T::TABLE
    ))?;
    let mut rows = stmt.query([base_id.to_string()])?;
    let mut translations = Vec::new();

    while let Some(row) = rows.next()? {
        let language_text: String = row.get("language_code")?;
        let language_code = LanguageCode::parse(&language_text).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid language code `{language_text}` in {}.language_code",
                T::TABLE
            ))
        })?;
        translations.push(T::from_row(
            row.get("id")?,
            base_id,
            language_code,
            row.get("name")?,
        ));
    }

    Ok(translations)
}

/// Writes every add/update/delete of `diff` for `base_id`.
///
/// Must run inside a transaction owned by the caller.
pub fn apply_translation_diff<T: TranslationTable>(
    conn: &Connection,
    base_id: Uuid,
    diff: &TranslationDiff<T>,
) -> RepoResult<()> {
    let base_id_text = base_id.to_string();

    for record in &diff.to_delete {
        conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1 AND base_id = ?2;", T::TABLE),
            params![record.row_id(), base_id_text.as_str()],
        )?;
    }

    for record in &diff.to_update {
        let changed = conn.execute(
            &format!(
                "UPDATE {} SET name = ?2 WHERE id = ?1 AND base_id = ?3;",
                T::TABLE
            ),
            params![record.row_id(), record.name(), base_id_text.as_str()],
        )?;
        if changed == 0 {
            return Err(RepoError::InvalidData(format!(
                "translation row {} missing from {}",
                record.row_id(),
                T::TABLE
            )));
        }
    }

    insert_translations::<T>(conn, base_id_text.as_str(), &diff.to_add)
}

fn insert_translations<T: TranslationTable>(
    conn: &Connection,
    base_id: &str,
    inputs: &[TranslationInput],
) -> RepoResult<()> {
    if inputs.is_empty() {
        return Ok(());
    }

    let mut stmt = conn.prepare(&format!(
        "INSERT INTO {} (base_id, language_code, name) VALUES (?1, ?2, ?3);",
        T::TABLE
    ))?;
    for input in inputs {
        stmt.execute(params![
            base_id,
            input.language_code.as_str(),
            input.name.as_str()
        ])?;
    }

    Ok(())
}
