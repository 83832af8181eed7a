// SPDX-License-Identifier: MPL-2.0
use chrono::{TimeZone, Utc};
use locale_store::calendar::CalendarLocale;
use locale_store::config::{self, Config, GeneralConfig, CATALOG_FILE, LOCALE_STORAGE_KEY, STORAGE_FILE};
use locale_store::error::{CatalogError, Error};
use locale_store::i18n::catalog::{CatalogSource, DirectoryCatalogs, EmbeddedCatalogs};
use locale_store::i18n::I18n;
use locale_store::storage::{FileStorage, StorageBackend};
use locale_store::store::{LocaleSwitch, LocalizationStore};
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn file_store<C: CatalogSource>(data_dir: &Path, catalogs: C) -> LocalizationStore<C> {
    let backend = FileStorage::in_data_dir_with_override(Some(data_dir.to_path_buf()))
        .expect("storage path");
    LocalizationStore::new(
        Arc::new(backend),
        Arc::new(I18n::new()),
        Arc::new(CalendarLocale::default()),
        catalogs,
    )
}

#[tokio::test]
async fn language_choice_survives_restart() {
    let dir = tempdir().expect("Failed to create temporary directory");

    let first = file_store(dir.path(), EmbeddedCatalogs);
    assert_eq!(first.active_locale(), "en");
    first.init().await.expect("init");
    first.set_locale("fi").await.expect("switch to fi");
    drop(first);

    let second = file_store(dir.path(), EmbeddedCatalogs);
    assert_eq!(second.active_locale(), "fi");
    second.init().await.expect("init after restart");
    assert_eq!(second.i18n().tr("language-switcher"), "Kieli");
}

#[tokio::test]
async fn stored_value_lives_under_lang_ui_key() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let store = file_store(dir.path(), EmbeddedCatalogs);

    store.set_locale("ru").await.expect("switch to ru");

    let backend = FileStorage::in_data_dir_with_override(Some(dir.path().to_path_buf()))
        .expect("storage path");
    assert_eq!(
        backend.read(LOCALE_STORAGE_KEY).expect("read"),
        Some("ru".to_string())
    );
}

#[tokio::test]
async fn switching_localizes_messages_plurals_and_dates() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let store = file_store(dir.path(), EmbeddedCatalogs);
    let date = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();

    store.init().await.expect("init");
    let english_date = store.calendar().long_date(&date);
    assert_eq!(english_date, "15 March 2024");
    assert_eq!(store.i18n().tr_count("files-selected", 3), "3 files selected");

    assert_eq!(
        store.set_locale("ru").await.expect("switch to ru"),
        LocaleSwitch::Applied
    );
    assert_eq!(store.i18n().tr_count("files-selected", 3), "Выбрано 3 файла");
    assert_eq!(store.i18n().tr_count("files-selected", 5), "Выбрано 5 файлов");
    assert_eq!(store.i18n().tr_count("files-selected", 21), "Выбран 21 файл");
    assert_ne!(store.calendar().long_date(&date), english_date);
}

#[tokio::test]
async fn directory_catalogs_accept_unlisted_locales() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let catalogs = dir.path().join("locales");
    std::fs::create_dir_all(catalogs.join("sv")).expect("create sv dir");
    std::fs::write(catalogs.join("sv").join(CATALOG_FILE), "language-switcher = Språk\n")
        .expect("write sv catalog");

    let store = file_store(&dir.path().join("data"), DirectoryCatalogs::new(&catalogs));
    store.set_locale("sv").await.expect("switch to sv");

    assert_eq!(store.active_locale(), "sv");
    assert_eq!(store.i18n().tr("language-switcher"), "Språk");
    assert_eq!(store.calendar().code(), "sv");

    let err = store.set_locale("fi").await.unwrap_err();
    assert_eq!(err, Error::Catalog(CatalogError::NotFound("fi".to_string())));
    assert_eq!(store.active_locale(), "sv");
}

#[tokio::test]
async fn configured_default_applies_only_without_stored_choice() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let config_dir = dir.path().join("config");
    let config = Config {
        general: GeneralConfig {
            default_locale: Some("ru".to_string()),
        },
        ..Config::default()
    };
    config::save_with_override(&config, Some(config_dir.clone())).expect("save config");
    let (loaded, warning) = config::load_with_override(Some(config_dir));
    assert!(warning.is_none());

    let data_dir = dir.path().join("data");
    let backend = || {
        Arc::new(
            FileStorage::in_data_dir_with_override(Some(data_dir.clone())).expect("storage path"),
        )
    };
    let store = LocalizationStore::with_default_locale(
        loaded.default_locale(),
        backend(),
        Arc::new(I18n::new()),
        Arc::new(CalendarLocale::default()),
        EmbeddedCatalogs,
    );
    assert_eq!(store.active_locale(), "ru");
    store.set_locale("en").await.expect("switch to en");

    let restarted = LocalizationStore::with_default_locale(
        loaded.default_locale(),
        backend(),
        Arc::new(I18n::new()),
        Arc::new(CalendarLocale::default()),
        EmbeddedCatalogs,
    );
    assert_eq!(restarted.active_locale(), "en");
}

#[tokio::test]
async fn corrupt_storage_file_is_repaired_by_next_switch() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(dir.path().join(STORAGE_FILE), "lang_ui = = ").expect("write corrupt file");

    let store = file_store(dir.path(), EmbeddedCatalogs);
    assert_eq!(store.active_locale(), "en");
    store.set_locale("fi").await.expect("switch to fi");
    assert_eq!(store.storage().get(), "fi");
    drop(store);

    let restarted = file_store(dir.path(), EmbeddedCatalogs);
    assert_eq!(restarted.active_locale(), "fi");
}

#[tokio::test]
async fn directory_catalogs_refuse_paths_outside_root() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let root = dir.path().join("catalogs");
    std::fs::create_dir_all(root.join("fi")).expect("create locale dir");
    std::fs::write(root.join("fi").join(CATALOG_FILE), "greeting = Hei\n").expect("write catalog");

    let store = file_store(&dir.path().join("data"), DirectoryCatalogs::new(&root));
    let err = store.set_locale("../catalogs/fi").await.unwrap_err();

    assert_eq!(
        err,
        Error::Catalog(CatalogError::InvalidLocale("../catalogs/fi".to_string()))
    );
    assert_eq!(store.active_locale(), "en");
    assert_eq!(store.storage().get(), "en");
}
