use super::*;
use tempfile::tempdir;

#[test]
fn test_missing_settings_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let config = load_config_from(&dir.path().join("settings.json"));
    assert_eq!(config, WorkspaceConfig::default());
}

#[test]
fn test_malformed_settings_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert_eq!(load_config_from(&path), WorkspaceConfig::default());
}

#[test]
fn test_settings_file_overrides() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "max_tabs": 3, "user": "ada", "persist": false }"#).unwrap();

    let config = load_config_from(&path);
    assert_eq!(config.max_tabs, Some(3));
    assert_eq!(config.user.as_deref(), Some("ada"));
    assert!(!config.persist);
    assert_eq!(config.history_limit, 500);
}
