//! Facet list query options and SQL assembly.
//!
//! # Responsibility
//! - Turn filter/sort/pagination options into one count query and one page
//!   query over `facets`.
//!
//! # Invariants
//! - Count and page queries share the same `WHERE` clause, so the total never
//!   depends on the pagination window.
//! - Every user-supplied value is bound as a parameter; only enum-derived
//!   fragments are formatted into SQL.
//! - Ordering always ends with `f.rowid ASC` to keep pages stable.
//! - Text matching and name ordering go through `fold()`, so the connection
//!   must have catalog SQL functions registered.

use crate::model::language::{LanguageCode, DEFAULT_LANGUAGE_CODE};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

pub const LIST_DEFAULT_TAKE: u32 = 10;
pub const LIST_TAKE_MAX: u32 = 100;

/// Sortable facet attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetSortField {
    Code,
    CreatedAt,
    UpdatedAt,
    /// Translated name in the requested language (with fallback).
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSort {
    pub field: FacetSortField,
    #[serde(default)]
    pub order: SortOrder,
}

/// Case-insensitive substring filters. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetFilter {
    #[serde(default)]
    pub code_contains: Option<String>,
    /// Matches against a translation in any language.
    #[serde(default)]
    pub name_contains: Option<String>,
}

/// Filtering, sorting and pagination options for facet lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQueryOptions {
    /// Page size. Defaults to 10 and clamps to 100.
    #[serde(default)]
    pub take: Option<u32>,
    /// Number of rows to skip.
    #[serde(default)]
    pub skip: u32,
    /// Defaults to creation order.
    #[serde(default)]
    pub sort: Option<FacetSort>,
    #[serde(default)]
    pub filter: FacetFilter,
}

/// Normalizes page size according to the list contract.
pub fn normalize_take(take: Option<u32>) -> u32 {
    match take {
        Some(0) | None => LIST_DEFAULT_TAKE,
        Some(value) if value > LIST_TAKE_MAX => LIST_TAKE_MAX,
        Some(value) => value,
    }
}

/// Prepared SQL pair for one list request.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FacetListSql {
    pub count_sql: String,
    pub count_params: Vec<Value>,
    pub page_sql: String,
    pub page_params: Vec<Value>,
}

pub(crate) fn build_facet_list_sql(
    lang: &LanguageCode,
    options: &ListQueryOptions,
) -> FacetListSql {
    let mut where_sql = String::from(" WHERE 1 = 1");
    let mut where_params: Vec<Value> = Vec::new();

    if let Some(needle) = non_blank(options.filter.code_contains.as_deref()) {
        where_sql.push_str(" AND instr(fold(f.code), fold(?)) > 0");
        where_params.push(Value::Text(needle.to_string()));
    }

    if let Some(needle) = non_blank(options.filter.name_contains.as_deref()) {
        where_sql.push_str(
            " AND EXISTS (
                SELECT 1
                FROM facet_translations ft
                WHERE ft.base_id = f.id
                  AND instr(fold(ft.name), fold(?)) > 0
            )",
        );
        where_params.push(Value::Text(needle.to_string()));
    }

    let count_sql = format!("SELECT COUNT(*) FROM facets f{where_sql};");

    let mut page_sql =
        format!("SELECT f.id, f.code, f.created_at, f.updated_at FROM facets f{where_sql}");
    let mut page_params = where_params.clone();

    match options.sort {
        Some(FacetSort { field, order }) => {
            let direction = match order {
                SortOrder::Asc => "ASC",
                SortOrder::Desc => "DESC",
            };
            match field {
                FacetSortField::Code => {
                    page_sql.push_str(&format!(" ORDER BY f.code {direction}"));
                }
                FacetSortField::CreatedAt => {
                    page_sql.push_str(&format!(" ORDER BY f.created_at {direction}"));
                }
                FacetSortField::UpdatedAt => {
                    page_sql.push_str(&format!(" ORDER BY f.updated_at {direction}"));
                }
                FacetSortField::Name => {
                    page_sql.push_str(&format!(
                        " ORDER BY fold((
                            SELECT ft.name
                            FROM facet_translations ft
                            WHERE ft.base_id = f.id
                            ORDER BY ft.language_code = ? DESC,
                                     ft.language_code = ? DESC,
                                     ft.id ASC
                            LIMIT 1
                        )) {direction}"
                    ));
                    page_params.push(Value::Text(lang.as_str().to_string()));
                    page_params.push(Value::Text(DEFAULT_LANGUAGE_CODE.to_string()));
                }
            }
            page_sql.push_str(", f.rowid ASC");
        }
        None => page_sql.push_str(" ORDER BY f.created_at ASC, f.rowid ASC"),
    }

    page_sql.push_str(" LIMIT ? OFFSET ?;");
    page_params.push(Value::Integer(i64::from(normalize_take(options.take))));
    page_params.push(Value::Integer(i64::from(options.skip)));

    FacetListSql {
        count_sql,
        count_params: where_params,
        page_sql,
        page_params,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{
        build_facet_list_sql, normalize_take, FacetFilter, FacetSort, FacetSortField,
        ListQueryOptions, SortOrder, LIST_DEFAULT_TAKE, LIST_TAKE_MAX,
    };
    use crate::model::language::LanguageCode;
    use rusqlite::types::Value;

    #[test]
    fn take_defaults_and_clamps() {
        assert_eq!(normalize_take(None), LIST_DEFAULT_TAKE);
        assert_eq!(normalize_take(Some(0)), LIST_DEFAULT_TAKE);
        assert_eq!(normalize_take(Some(25)), 25);
        assert_eq!(normalize_take(Some(5_000)), LIST_TAKE_MAX);
    }

    #[test]
    fn count_query_ignores_pagination() {
        let options = ListQueryOptions {
            take: Some(5),
            skip: 20,
            filter: FacetFilter {
                code_contains: Some("col".to_string()),
                name_contains: None,
            },
            ..ListQueryOptions::default()
        };
        let sql = build_facet_list_sql(&LanguageCode::default(), &options);

        assert!(!sql.count_sql.contains("LIMIT"));
        assert_eq!(sql.count_params, vec![Value::Text("col".to_string())]);
        assert_eq!(
            sql.page_params,
            vec![
                Value::Text("col".to_string()),
                Value::Integer(5),
                Value::Integer(20),
            ]
        );
    }

    #[test]
    fn blank_filters_are_ignored() {
        let options = ListQueryOptions {
            filter: FacetFilter {
                code_contains: Some("   ".to_string()),
                name_contains: Some(String::new()),
            },
            ..ListQueryOptions::default()
        };
        let sql = build_facet_list_sql(&LanguageCode::default(), &options);
        assert!(sql.count_params.is_empty());
        assert!(!sql.count_sql.contains("fold"));
    }

    #[test]
    fn name_sort_binds_requested_and_default_language() {
        let options = ListQueryOptions {
            sort: Some(FacetSort {
                field: FacetSortField::Name,
                order: SortOrder::Desc,
            }),
            ..ListQueryOptions::default()
        };
        let sql = build_facet_list_sql(&LanguageCode::parse("de").unwrap(), &options);

        assert!(sql.page_sql.contains(")) DESC, f.rowid ASC"));
        assert_eq!(sql.page_params[0], Value::Text("de".to_string()));
        assert_eq!(sql.page_params[1], Value::Text("en".to_string()));
    }
}
