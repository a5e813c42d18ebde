//! Facet repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist facets, their translations and their values.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Each write runs in one immediate transaction; a failed translation write
//!   rolls back the facet row write as well.
//! - Reads always return facets with translations and values loaded.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::{register_functions, DbError};
use crate::locale::diff::{diff_translations, TranslationDiff};
use crate::model::facet::{
    Facet, FacetDraft, FacetId, FacetTranslation, FacetValue, FacetValueTranslation,
};
use crate::model::language::LanguageCode;
use crate::repo::list_query::{build_facet_list_sql, ListQueryOptions};
use crate::repo::translation_table::{apply_translation_diff, load_translations};
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for facet persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(FacetId),
    /// Another facet already uses this code.
    DuplicateCode(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "facet not found: {id}"),
            Self::DuplicateCode(code) => write!(f, "facet code already in use: `{code}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted facet data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// One page of facets plus the size of the full matching set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetPage {
    pub facets: Vec<Facet>,
    pub total_items: u64,
}

/// Repository interface for facet CRUD operations.
pub trait FacetRepository {
    /// Inserts a facet with its translations and seeded values.
    fn create_facet(&self, draft: &FacetDraft) -> RepoResult<FacetId>;
    /// Applies a translation diff and resaves the facet row.
    ///
    /// `code = None` keeps the stored code.
    fn update_facet(
        &self,
        id: FacetId,
        code: Option<&str>,
        diff: &TranslationDiff<FacetTranslation>,
    ) -> RepoResult<()>;
    /// Loads one facet with relations.
    fn get_facet(&self, id: FacetId) -> RepoResult<Option<Facet>>;
    /// Lists one page of facets. `lang` only affects name sorting.
    fn list_facets(&self, lang: &LanguageCode, options: &ListQueryOptions)
        -> RepoResult<FacetPage>;
    /// Loads persisted translations of one facet.
    fn list_facet_translations(&self, id: FacetId) -> RepoResult<Vec<FacetTranslation>>;
    /// Hard-deletes a facet; values and translations cascade.
    fn delete_facet(&self, id: FacetId) -> RepoResult<()>;
}

/// SQLite-backed facet repository.
pub struct SqliteFacetRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFacetRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Registers catalog SQL functions so connections not opened through
    /// `open_db` can still run list queries.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        for table in [
            "facets",
            "facet_translations",
            "facet_values",
            "facet_value_translations",
        ] {
            if !table_exists(conn, table)? {
                return Err(RepoError::InvalidData(format!(
                    "required table `{table}` is missing; open the database with open_db"
                )));
            }
        }
        register_functions(conn)?;
        Ok(Self { conn })
    }
}

impl FacetRepository for SqliteFacetRepository<'_> {
    fn create_facet(&self, draft: &FacetDraft) -> RepoResult<FacetId> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let facet_id = draft.id.to_string();

        tx.execute(
            "INSERT INTO facets (id, code) VALUES (?1, ?2);",
            params![facet_id.as_str(), draft.code.as_str()],
        )
        .map_err(|err| map_code_conflict(err, &draft.code))?;
        let initial = diff_translations::<FacetTranslation>(&[], &draft.translations);
        apply_translation_diff(&tx, draft.id, &initial)?;

        for value in &draft.values {
            tx.execute(
                "INSERT INTO facet_values (id, facet_id, code) VALUES (?1, ?2, ?3);",
                params![value.id.to_string(), facet_id.as_str(), value.code.as_str()],
            )?;
            let initial = diff_translations::<FacetValueTranslation>(&[], &value.translations);
            apply_translation_diff(&tx, value.id, &initial)?;
        }

        tx.commit()?;
        Ok(draft.id)
    }

    fn update_facet(
        &self,
        id: FacetId,
        code: Option<&str>,
        diff: &TranslationDiff<FacetTranslation>,
    ) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !facet_exists(&tx, id)? {
            return Err(RepoError::NotFound(id));
        }

        apply_translation_diff(&tx, id, diff)?;

        tx.execute(
            "UPDATE facets
             SET
                code = COALESCE(?2, code),
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id.to_string(), code],
        )
        .map_err(|err| map_code_conflict(err, code.unwrap_or_default()))?;

        tx.commit()?;
        Ok(())
    }

    fn get_facet(&self, id: FacetId) -> RepoResult<Option<Facet>> {
        let mut stmt = self.conn.prepare(
            "SELECT f.id, f.code, f.created_at, f.updated_at
             FROM facets f
             WHERE f.id = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            let facet = parse_facet_row(row)?;
            return Ok(Some(load_relations(self.conn, facet)?));
        }

        Ok(None)
    }

    fn list_facets(
        &self,
        lang: &LanguageCode,
        options: &ListQueryOptions,
    ) -> RepoResult<FacetPage> {
        let sql = build_facet_list_sql(lang, options);

        let total_items: i64 = self.conn.query_row(
            &sql.count_sql,
            params_from_iter(sql.count_params),
            |row| row.get(0),
        )?;

        let mut stmt = self.conn.prepare(&sql.page_sql)?;
        let mut rows = stmt.query(params_from_iter(sql.page_params))?;
        let mut facets = Vec::new();
        while let Some(row) = rows.next()? {
            facets.push(parse_facet_row(row)?);
        }

        let facets = facets
            .into_iter()
            .map(|facet| load_relations(self.conn, facet))
            .collect::<RepoResult<Vec<_>>>()?;

        Ok(FacetPage {
            facets,
            total_items: u64::try_from(total_items).map_err(|_| {
                RepoError::InvalidData(format!("negative facet count {total_items}"))
            })?,
        })
    }

    fn list_facet_translations(&self, id: FacetId) -> RepoResult<Vec<FacetTranslation>> {
        load_translations(self.conn, id)
    }

    fn delete_facet(&self, id: FacetId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM facets WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_facet_row(row: &Row<'_>) -> RepoResult<Facet> {
    let id_text: String = row.get("id")?;
    Ok(Facet {
        id: parse_uuid(&id_text, "facets.id")?,
        code: row.get("code")?,
        translations: Vec::new(),
        values: Vec::new(),
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn load_relations(conn: &Connection, mut facet: Facet) -> RepoResult<Facet> {
    facet.translations = load_translations(conn, facet.id)?;
    facet.values = load_values(conn, facet.id)?;
    Ok(facet)
}

fn load_values(conn: &Connection, facet_id: FacetId) -> RepoResult<Vec<FacetValue>> {
    let mut stmt = conn.prepare(
        "SELECT id, code, created_at, updated_at
         FROM facet_values
         WHERE facet_id = ?1
         ORDER BY created_at ASC, rowid ASC;",
    )?;
    let mut rows = stmt.query([facet_id.to_string()])?;
    let mut values = Vec::new();

    while let Some(row) = rows.next()? {
        let id_text: String = row.get("id")?;
        let id = parse_uuid(&id_text, "facet_values.id")?;
        values.push(FacetValue {
            id,
            facet_id,
            code: row.get("code")?,
            translations: load_translations(conn, id)?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        });
    }

    Ok(values)
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

fn facet_exists(conn: &Connection, id: FacetId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM facets WHERE id = ?1);",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn map_code_conflict(err: rusqlite::Error, code: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::DuplicateCode(code.to_string())
        }
        _ => err.into(),
    }
}
