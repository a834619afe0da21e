//! Integration tests for loading and saving the config file

use recipe_finder::config::{load_or_create_config_at, save_config_at, Config, DebugLogRotation};
use tempfile::TempDir;

#[test]
fn test_missing_file_is_created_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let config = load_or_create_config_at(&path).unwrap();
    assert!(path.exists());
    assert!(!config.debug);
    assert!(config.search.credentials().is_none());

    let reloaded = load_or_create_config_at(&path).unwrap();
    assert_eq!(reloaded.search.endpoint, config.search.endpoint);
}

#[test]
fn test_saved_values_are_loaded_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.debug = true;
    config.debug_log_rotation = Some(DebugLogRotation::None);
    config.search.api_key = Some("AIzaExample".to_string());
    config.search.search_engine_id = Some("cx-1".to_string());
    save_config_at(&config, &path).unwrap();

    let loaded = load_or_create_config_at(&path).unwrap();
    assert!(loaded.debug);
    assert_eq!(loaded.debug_log_rotation, Some(DebugLogRotation::None));
    let credentials = loaded.search.credentials().unwrap();
    assert_eq!(credentials.api_key, "AIzaExample");
    assert_eq!(credentials.search_engine_id, "cx-1");
}

#[test]
fn test_invalid_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "search = 42").unwrap();

    let err = load_or_create_config_at(&path).unwrap_err();
    assert!(format!("{err:#}").contains("config.toml"));
}
