use super::*;

#[test]
fn test_get_workspace_dir() {
    let dir = get_workspace_dir();
    // 在测试环境中应该能获取到目录
    assert!(dir.is_some());
    let dir = dir.unwrap();
    assert!(dir.to_string_lossy().contains(APP_NAME));
    assert!(dir.to_string_lossy().contains(WORKSPACE_DIR));
}

#[test]
fn test_get_log_dir() {
    let dir = get_log_dir();
    assert!(dir.is_some());
    let dir = dir.unwrap();
    assert!(dir.to_string_lossy().contains(APP_NAME));
    assert!(dir.to_string_lossy().contains(LOG_DIR));
}

#[test]
fn test_get_config_dir() {
    let dir = get_config_dir().unwrap();
    assert!(dir.to_string_lossy().contains(APP_NAME));
}

#[test]
fn test_create_dir_if_missing_is_idempotent() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("a/b");
    create_dir_if_missing(&dir).unwrap();
    create_dir_if_missing(&dir).unwrap();
    assert!(dir.is_dir());
}
