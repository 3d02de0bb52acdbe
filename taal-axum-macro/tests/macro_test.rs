use taal_axum_macro::translations;
use taal_core::{LanguageCode, Localizer, LocalizerOptions, ResourceSet, TranslationTable};

fn greeting() -> TranslationTable {
    translations!("Greeting", "tests/assets/greeting")
}

#[test]
fn test_json_and_toml_files_are_embedded() {
    let table = greeting();

    assert_eq!(table.get("en", "Greeting", "hello"), Some("Hello, world!"));
    assert_eq!(table.get("nl", "Greeting", "hello"), Some("Hallo, wereld!"));
    assert_eq!(table.get("de", "Greeting", "hello"), Some("Hallo, Welt!"));
    assert_eq!(table.languages().collect::<Vec<_>>(), vec!["de", "en", "nl"]);
    assert_eq!(table.len(), 5);
}

#[test]
fn test_non_locale_files_are_ignored() {
    let table = greeting();
    assert!(!table.contains_language("README"));
}

#[test]
fn test_empty_directory_gives_empty_table() {
    let table = translations!("Nothing", "tests/assets/empty",);
    assert!(table.is_empty());
}

#[test]
fn test_embedded_table_drives_a_localizer() {
    let l10n = Localizer::new(
        ResourceSet::aggregate([greeting()]),
        LocalizerOptions {
            default_language: LanguageCode::parse("nl").unwrap(),
            ..Default::default()
        },
    );

    assert_eq!(
        l10n.t_with("Greeting", "welcome", &[("name", "Jason")]),
        "Welkom, Jason!"
    );
    assert_eq!(l10n.t("Greeting", "missing"), "missing");
}
