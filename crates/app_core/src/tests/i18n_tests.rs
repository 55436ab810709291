use super::*;

use tempfile::TempDir;

fn locales() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("app_en.json"),
        r#"{"menu.file": "File", "menu.exit": "Exit"}"#,
    )
    .expect("write en");
    fs::write(
        dir.path().join("app_de.json"),
        r#"{"menu.file": "Datei", "menu.exit": "Beenden"}"#,
    )
    .expect("write de");
    fs::write(dir.path().join("app_fr.json"), "not json").expect("write fr");
    fs::write(dir.path().join("readme.txt"), "ignored").expect("write txt");
    dir
}

#[test]
fn translates_known_keys_and_echoes_unknown_ones() {
    let dir = locales();
    let mut i18n = I18nService::new(dir.path());

    assert!(i18n.set_language("de"));
    assert_eq!(i18n.tr("menu.file"), "Datei");
    assert_eq!(i18n.tr("menu.help"), "menu.help");
    assert_eq!(i18n.language(), Some("de"));
}

#[test]
fn regional_language_falls_back_to_base_catalog() {
    let dir = locales();
    let mut i18n = I18nService::new(dir.path());

    assert!(i18n.set_language("de_AT"));
    assert_eq!(i18n.tr("menu.exit"), "Beenden");
}

#[test]
fn switching_to_missing_language_drops_previous_catalog() {
    let dir = locales();
    let mut i18n = I18nService::new(dir.path());
    assert!(i18n.set_language("en"));

    assert!(!i18n.set_language("ja"));
    assert_eq!(i18n.tr("menu.file"), "menu.file");
}

#[test]
fn unreadable_catalog_counts_as_missing() {
    let dir = locales();
    let mut i18n = I18nService::new(dir.path());
    assert!(!i18n.set_language("fr"));
}

#[test]
fn lists_catalog_languages_sorted() {
    let dir = locales();
    let i18n = I18nService::new(dir.path());
    assert_eq!(i18n.available_languages(), vec!["de", "en", "fr"]);

    let missing = I18nService::new(dir.path().join("nope"));
    assert!(missing.available_languages().is_empty());
}

#[test]
fn reload_reads_updated_catalog() {
    let dir = locales();
    let mut i18n = I18nService::new(dir.path());
    assert!(!i18n.reload());
    assert!(i18n.set_language("en"));

    fs::write(dir.path().join("app_en.json"), r#"{"menu.file": "Files"}"#).expect("rewrite");
    assert!(i18n.reload());
    assert_eq!(i18n.tr("menu.file"), "Files");
}

#[test]
fn catalog_errors_name_the_file() {
    let dir = locales();

    let broken = dir.path().join("app_fr.json");
    let err = load_catalog(&broken).expect_err("invalid json");
    assert!(matches!(err, I18nError::Parse { ref path, .. } if *path == broken));
    assert!(err.to_string().contains("app_fr.json"));

    let missing = dir.path().join("app_xx.json");
    assert!(matches!(
        load_catalog(&missing),
        Err(I18nError::Read { .. })
    ));
}
