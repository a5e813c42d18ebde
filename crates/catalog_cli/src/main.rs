//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `catalog_core` linkage and storage bootstrap end to end.
//! - Keep output deterministic apart from generated ids and timestamps.

use catalog_core::db::open_db_in_memory;
use catalog_core::{
    CreateFacetInput, CreateFacetValueInput, FacetService, LanguageCode, ListQueryOptions,
    SqliteFacetRepository, TranslationInput,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("catalog_core ping={}", catalog_core::ping());
    println!("catalog_core version={}", catalog_core::core_version());

    let conn = open_db_in_memory()?;
    let service = FacetService::new(SqliteFacetRepository::try_new(&conn)?);

    let en = LanguageCode::default_language();
    let de = LanguageCode::parse("de")?;
    service.create(CreateFacetInput {
        code: "color".to_string(),
        translations: vec![
            TranslationInput::new(en.clone(), "Color"),
            TranslationInput::new(de.clone(), "Farbe"),
        ],
        values: vec![CreateFacetValueInput {
            code: "red".to_string(),
            translations: vec![
                TranslationInput::new(en, "Red"),
                TranslationInput::new(de.clone(), "Rot"),
            ],
        }],
    })?;

    let listed = service.find_all(&de, &ListQueryOptions::default())?;
    println!("{}", serde_json::to_string_pretty(&listed)?);
    Ok(())
}
