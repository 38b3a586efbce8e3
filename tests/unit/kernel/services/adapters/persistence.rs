use super::*;
use crate::models::{LanguageId, VfsPath};
use tempfile::tempdir;

fn sample_tree() -> Vec<NodeSnapshot> {
    vec![
        NodeSnapshot::folder("src", vec![NodeSnapshot::file("index.ts", "export {}")]),
        NodeSnapshot::file("README.md", "# hi"),
    ]
}

fn sample_tab() -> TabSnapshot {
    TabSnapshot {
        id: TabId::new(1),
        name: "index.ts".to_string(),
        path: VfsPath::parse("/src/index.ts"),
        language: LanguageId::TypeScript,
        content: "export {};".to_string(),
        saved_content: "export {}".to_string(),
    }
}

#[test]
fn test_json_load_without_tree_is_none() {
    let dir = tempdir().unwrap();
    let persistence = JsonFilePersistence::new(dir.path());
    assert_eq!(persistence.load().unwrap(), None);
}

#[test]
fn test_json_persist_then_load() {
    let dir = tempdir().unwrap();
    let mut persistence = JsonFilePersistence::new(dir.path().join("nested"));
    persistence.persist_tree(&sample_tree()).unwrap();
    persistence.persist_tabs(&[sample_tab()]).unwrap();
    persistence.persist_active_tab(Some(TabId::new(1))).unwrap();

    let snapshot = persistence.load().unwrap().unwrap();
    assert_eq!(snapshot.tree, sample_tree());
    assert_eq!(snapshot.tabs, vec![sample_tab()]);
    assert_eq!(snapshot.active_tab, Some(TabId::new(1)));
    assert!(!dir.path().join("nested/filetree.json.tmp").exists());
}

#[test]
fn test_json_clearing_active_tab_removes_file() {
    let dir = tempdir().unwrap();
    let mut persistence = JsonFilePersistence::new(dir.path());
    persistence.persist_tree(&sample_tree()).unwrap();
    persistence.persist_active_tab(Some(TabId::new(4))).unwrap();
    persistence.persist_active_tab(None).unwrap();
    persistence.persist_active_tab(None).unwrap();

    assert!(!dir.path().join(ACTIVE_TAB_FILE).exists());
    assert_eq!(persistence.load().unwrap().unwrap().active_tab, None);
}

#[test]
fn test_json_malformed_tree_is_error() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(TREE_FILE), "[{").unwrap();
    let persistence = JsonFilePersistence::new(dir.path());
    let err = persistence.load().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn test_json_set_aside_moves_tree_and_tabs() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(TREE_FILE), "[{").unwrap();
    std::fs::write(dir.path().join(TABS_FILE), "[]").unwrap();
    let mut persistence = JsonFilePersistence::new(dir.path());

    persistence.set_aside_unreadable().unwrap();
    assert_eq!(persistence.load().unwrap(), None);
    let kept = std::fs::read_to_string(dir.path().join("filetree.json.corrupt")).unwrap();
    assert_eq!(kept, "[{");
    assert!(dir.path().join("tabs.json.corrupt").exists());

    // Nothing left to move is not an error.
    persistence.set_aside_unreadable().unwrap();
    assert!(dir.path().join("filetree.json.corrupt").exists());
}

#[test]
fn test_json_malformed_tabs_are_dropped() {
    let dir = tempdir().unwrap();
    let mut persistence = JsonFilePersistence::new(dir.path());
    persistence.persist_tree(&sample_tree()).unwrap();
    std::fs::write(dir.path().join(TABS_FILE), "nope").unwrap();

    let snapshot = persistence.load().unwrap().unwrap();
    assert!(snapshot.tabs.is_empty());
    assert_eq!(snapshot.tree, sample_tree());
}

#[test]
fn test_memory_handles_share_state() {
    let reader = MemoryPersistence::new();
    let mut writer = reader.clone();
    assert_eq!(reader.load().unwrap(), None);

    writer.persist_tree(&sample_tree()).unwrap();
    writer.persist_tabs(&[sample_tab()]).unwrap();
    assert_eq!(reader.writes(), 2);
    assert_eq!(reader.tree(), Some(sample_tree()));
    assert_eq!(reader.tabs(), vec![sample_tab()]);
}

#[test]
fn test_memory_failing_writes_keep_old_state() {
    let mut persistence = MemoryPersistence::with_snapshot(WorkspaceSnapshot {
        tree: sample_tree(),
        ..WorkspaceSnapshot::default()
    });
    persistence.set_fail_writes(true);

    assert!(persistence.persist_tree(&[]).is_err());
    assert!(persistence.persist_active_tab(Some(TabId::new(2))).is_err());
    assert_eq!(persistence.writes(), 0);
    assert_eq!(persistence.tree(), Some(sample_tree()));
    assert_eq!(persistence.active_tab(), None);
}
