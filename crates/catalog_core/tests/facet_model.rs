use catalog_core::model::facet::FacetDraft;
use catalog_core::{CreateFacetInput, LanguageCode, TranslationInput, UpdateFacetInput};
use serde_json::json;
use uuid::Uuid;

#[test]
fn create_input_deserializes_with_default_values() {
    let value = json!({
        "code": "color",
        "translations": [
            { "language_code": "EN", "name": "Color" },
            { "language_code": "pt_BR", "name": "Cor" }
        ]
    });

    let input: CreateFacetInput = serde_json::from_value(value).unwrap();
    assert_eq!(input.code, "color");
    assert!(input.values.is_empty());
    assert_eq!(input.translations[0].language_code.as_str(), "en");
    assert_eq!(input.translations[1].language_code.as_str(), "pt-br");
}

#[test]
fn malformed_language_code_fails_deserialization() {
    let value = json!({
        "code": "color",
        "translations": [{ "language_code": "english", "name": "Color" }]
    });

    let err = serde_json::from_value::<CreateFacetInput>(value).unwrap_err();
    assert!(
        err.to_string().contains("malformed language code"),
        "unexpected error: {err}"
    );
}

#[test]
fn update_input_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let input = UpdateFacetInput {
        id,
        code: None,
        translations: vec![TranslationInput::new(LanguageCode::default(), "Color")],
    };

    let json = serde_json::to_value(&input).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["code"], serde_json::Value::Null);
    assert_eq!(json["translations"][0]["language_code"], "en");
    assert_eq!(json["translations"][0]["name"], "Color");

    let decoded: UpdateFacetInput = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, input);
}

#[test]
fn draft_assigns_distinct_ids() {
    let draft = FacetDraft::from_input(CreateFacetInput {
        code: "color".to_string(),
        translations: Vec::new(),
        values: vec![
            catalog_core::CreateFacetValueInput {
                code: "red".to_string(),
                translations: Vec::new(),
            },
            catalog_core::CreateFacetValueInput {
                code: "blue".to_string(),
                translations: Vec::new(),
            },
        ],
    });

    assert!(!draft.id.is_nil());
    assert_ne!(draft.values[0].id, draft.values[1].id);
    assert_ne!(draft.values[0].id, draft.id);
}
