use catalog_core::db::open_db_in_memory;
use catalog_core::model::facet::{FacetDraft, FacetValueDraft};
use catalog_core::{
    diff_translations, FacetRepository, LanguageCode, ListQueryOptions, RepoError,
    SqliteFacetRepository, TranslationDiff, TranslationInput,
};
use rusqlite::Connection;
use uuid::Uuid;

fn lang(code: &str) -> LanguageCode {
    LanguageCode::parse(code).unwrap()
}

fn input(code: &str, name: &str) -> TranslationInput {
    TranslationInput::new(lang(code), name)
}

fn draft(code: &str, translations: Vec<TranslationInput>) -> FacetDraft {
    FacetDraft {
        id: Uuid::new_v4(),
        code: code.to_string(),
        translations,
        values: Vec::new(),
    }
}

fn translation_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM facet_translations;", [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn create_and_get_loads_translations_and_values() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFacetRepository::try_new(&conn).unwrap();

    let mut facet = draft("color", vec![input("en", "Color"), input("de", "Farbe")]);
    facet.values.push(FacetValueDraft {
        id: Uuid::new_v4(),
        code: "red".to_string(),
        translations: vec![input("en", "Red"), input("de", "Rot")],
    });
    let id = repo.create_facet(&facet).unwrap();

    let loaded = repo.get_facet(id).unwrap().unwrap();
    assert_eq!(loaded.id, facet.id);
    assert_eq!(loaded.code, "color");
    assert_eq!(loaded.translations.len(), 2);
    assert!(loaded.translations.iter().all(|t| t.base_id == id));
    assert_eq!(loaded.values.len(), 1);
    assert_eq!(loaded.values[0].code, "red");
    assert_eq!(loaded.values[0].facet_id, id);
    assert_eq!(loaded.values[0].translations.len(), 2);
}

#[test]
fn get_unknown_facet_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFacetRepository::try_new(&conn).unwrap();

    assert!(repo.get_facet(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn duplicate_code_is_reported_and_rolled_back() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFacetRepository::try_new(&conn).unwrap();

    repo.create_facet(&draft("color", vec![input("en", "Color")]))
        .unwrap();
    let err = repo
        .create_facet(&draft("color", vec![input("en", "Colour")]))
        .unwrap_err();

    assert!(matches!(err, RepoError::DuplicateCode(code) if code == "color"));
    assert_eq!(translation_count(&conn), 1);
}

#[test]
fn update_applies_diff_and_preserves_row_identity() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFacetRepository::try_new(&conn).unwrap();
    let id = repo
        .create_facet(&draft(
            "color",
            vec![input("en", "Color"), input("de", "Farbe"), input("fr", "Couleur")],
        ))
        .unwrap();
    let before = repo.list_facet_translations(id).unwrap();
    let en_row_id = before
        .iter()
        .find(|t| t.language_code == lang("en"))
        .unwrap()
        .id;

    let target = vec![input("en", "Colour"), input("de", "Farbe"), input("es", "Color")];
    let diff = diff_translations(&before, &target);
    repo.update_facet(id, Some("colour"), &diff).unwrap();

    let after = repo.get_facet(id).unwrap().unwrap();
    assert_eq!(after.code, "colour");
    let mut codes: Vec<&str> = after
        .translations
        .iter()
        .map(|t| t.language_code.as_str())
        .collect();
    codes.sort_unstable();
    assert_eq!(codes, vec!["de", "en", "es"]);

    let en = after
        .translations
        .iter()
        .find(|t| t.language_code == lang("en"))
        .unwrap();
    assert_eq!(en.id, en_row_id);
    assert_eq!(en.name, "Colour");
}

#[test]
fn update_unknown_facet_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFacetRepository::try_new(&conn).unwrap();
    let id = Uuid::new_v4();

    let err = repo
        .update_facet(id, None, &TranslationDiff::default())
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
}

#[test]
fn update_to_existing_code_is_duplicate() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFacetRepository::try_new(&conn).unwrap();
    repo.create_facet(&draft("color", vec![input("en", "Color")]))
        .unwrap();
    let size_id = repo
        .create_facet(&draft("size", vec![input("en", "Size")]))
        .unwrap();

    let err = repo
        .update_facet(size_id, Some("color"), &TranslationDiff::default())
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateCode(_)));
}

#[test]
fn delete_cascades_to_values_and_translations() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFacetRepository::try_new(&conn).unwrap();
    let mut facet = draft("color", vec![input("en", "Color")]);
    facet.values.push(FacetValueDraft {
        id: Uuid::new_v4(),
        code: "red".to_string(),
        translations: vec![input("en", "Red")],
    });
    let id = repo.create_facet(&facet).unwrap();

    repo.delete_facet(id).unwrap();

    assert!(repo.get_facet(id).unwrap().is_none());
    assert_eq!(translation_count(&conn), 0);
    let value_translations: i64 = conn
        .query_row("SELECT COUNT(*) FROM facet_value_translations;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(value_translations, 0);

    let err = repo.delete_facet(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn list_reports_total_independent_of_window() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFacetRepository::try_new(&conn).unwrap();
    for idx in 0..7 {
        repo.create_facet(&draft(
            &format!("facet-{idx}"),
            vec![input("en", &format!("Facet {idx}"))],
        ))
        .unwrap();
    }

    let page = repo
        .list_facets(
            &lang("en"),
            &ListQueryOptions {
                take: Some(3),
                skip: 5,
                ..ListQueryOptions::default()
            },
        )
        .unwrap();
    assert_eq!(page.total_items, 7);
    assert_eq!(page.facets.len(), 2);
    assert_eq!(page.facets[0].code, "facet-5");
    assert_eq!(page.facets[1].code, "facet-6");
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteFacetRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
