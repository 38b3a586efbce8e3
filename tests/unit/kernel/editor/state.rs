use super::*;
use crate::models::FileTreeError;

fn p(path: &str) -> VfsPath {
    VfsPath::parse(path)
}

fn tree_with(files: &[&str]) -> FileTree {
    let mut tree = FileTree::new();
    for path in files {
        let full = p(path);
        let mut dir = VfsPath::root();
        for segment in &full.segments()[..full.depth() - 1] {
            let _ = tree.create_folder(&dir, segment);
            dir = dir.join(segment);
        }
        tree.create_file(&dir, full.name().unwrap(), format!("// {path}"))
            .unwrap();
    }
    tree
}

fn open_all(editor: &mut EditorState, tree: &FileTree, paths: &[&str]) -> Vec<TabId> {
    paths
        .iter()
        .map(|path| editor.open(tree, &p(path)).unwrap().unwrap())
        .collect()
}

#[test]
fn open_creates_active_tab_from_file() {
    let tree = tree_with(&["/src/index.ts"]);
    let mut editor = EditorState::default();

    let id = editor.open(&tree, &p("/src/index.ts")).unwrap().unwrap();
    let tab = editor.active_tab().unwrap();
    assert_eq!(tab.id, id);
    assert_eq!(tab.title, "index.ts");
    assert_eq!(tab.language, LanguageId::TypeScript);
    assert_eq!(tab.content(), "// /src/index.ts");
    assert_eq!(tab.saved_content(), tab.content());
    assert!(!tab.is_modified());
}

#[test]
fn open_same_path_reuses_tab() {
    let tree = tree_with(&["/a.ts", "/b.ts"]);
    let mut editor = EditorState::default();
    let ids = open_all(&mut editor, &tree, &["/a.ts", "/b.ts"]);

    let again = editor.open(&tree, &p("/a.ts")).unwrap();
    assert_eq!(again, Some(ids[0]));
    assert_eq!(editor.tabs().len(), 2);
    assert_eq!(editor.active_id(), Some(ids[0]));
}

#[test]
fn open_missing_or_folder_is_noop() {
    let tree = tree_with(&["/src/a.ts"]);
    let mut editor = EditorState::default();

    assert_eq!(editor.open(&tree, &p("/nope.ts")), Ok(None));
    assert_eq!(editor.open(&tree, &p("/src")), Ok(None));
    assert!(editor.tabs().is_empty());
    assert_eq!(editor.active_id(), None);
    assert_eq!(editor.version(), 0);
}

#[test]
fn open_respects_tab_limit() {
    let tree = tree_with(&["/a", "/b", "/c"]);
    let mut editor = EditorState::new(Some(2));
    open_all(&mut editor, &tree, &["/a", "/b"]);

    assert_eq!(
        editor.open(&tree, &p("/c")),
        Err(WorkspaceError::TooManyTabs { limit: 2 })
    );
    assert_eq!(editor.tabs().len(), 2);
    // Re-opening an existing tab is still allowed at the limit.
    assert!(editor.open(&tree, &p("/a")).unwrap().is_some());
}

#[test]
fn close_active_middle_tab_activates_next_in_place() {
    let tree = tree_with(&["/a", "/b", "/c"]);
    let mut editor = EditorState::default();
    let ids = open_all(&mut editor, &tree, &["/a", "/b", "/c"]);
    assert!(editor.set_active(ids[1]));

    assert!(editor.close(ids[1]));
    assert_eq!(editor.active_id(), Some(ids[2]));
}

#[test]
fn close_active_last_tab_activates_previous() {
    let tree = tree_with(&["/a", "/b", "/c"]);
    let mut editor = EditorState::default();
    let ids = open_all(&mut editor, &tree, &["/a", "/b", "/c"]);

    assert!(editor.close(ids[2]));
    assert_eq!(editor.active_id(), Some(ids[1]));
}

#[test]
fn close_inactive_tab_keeps_active() {
    let tree = tree_with(&["/a", "/b", "/c"]);
    let mut editor = EditorState::default();
    let ids = open_all(&mut editor, &tree, &["/a", "/b", "/c"]);

    assert!(editor.close(ids[0]));
    assert_eq!(editor.active_id(), Some(ids[2]));
    assert_eq!(editor.tabs().len(), 2);
}

#[test]
fn close_only_tab_clears_active() {
    let tree = tree_with(&["/a"]);
    let mut editor = EditorState::default();
    let id = editor.open(&tree, &p("/a")).unwrap().unwrap();

    assert!(editor.close(id));
    assert_eq!(editor.active_id(), None);
    assert!(!editor.close(id));
}

#[test]
fn set_active_unknown_is_noop() {
    let tree = tree_with(&["/a"]);
    let mut editor = EditorState::default();
    let id = editor.open(&tree, &p("/a")).unwrap().unwrap();

    assert!(!editor.set_active(TabId::new(999)));
    assert_eq!(editor.active_id(), Some(id));
}

#[test]
fn update_content_only_touches_buffer() {
    let tree = tree_with(&["/a.ts"]);
    let mut editor = EditorState::default();
    let id = editor.open(&tree, &p("/a.ts")).unwrap().unwrap();

    assert!(editor.update_content(id, "changed"));
    assert!(editor.is_modified(id));
    assert_eq!(tree.read_file(&p("/a.ts")), Ok("// /a.ts"));

    // Typing back the saved text clears the dirty flag.
    assert!(editor.update_content(id, "// /a.ts"));
    assert!(!editor.is_modified(id));

    assert!(!editor.update_content(TabId::new(42), "x"));
}

#[test]
fn save_writes_tree_and_is_idempotent() {
    let mut tree = tree_with(&["/a.ts"]);
    let mut editor = EditorState::default();
    let id = editor.open(&tree, &p("/a.ts")).unwrap().unwrap();
    editor.update_content(id, "saved");

    assert_eq!(editor.save(&mut tree, id), Ok(true));
    assert!(!editor.is_modified(id));
    assert_eq!(tree.read_file(&p("/a.ts")), Ok("saved"));

    let version = editor.version();
    assert_eq!(editor.save(&mut tree, id), Ok(true));
    assert_eq!(editor.version(), version);
    assert!(!editor.is_modified(id));

    assert_eq!(editor.save(&mut tree, TabId::new(77)), Ok(false));
}

#[test]
fn save_failure_leaves_tab_dirty() {
    let mut tree = tree_with(&["/a.ts"]);
    tree.set_max_file_size(Some(16));
    let mut editor = EditorState::default();
    let id = editor.open(&tree, &p("/a.ts")).unwrap().unwrap();
    editor.update_content(id, "x".repeat(32));

    assert_eq!(
        editor.save(&mut tree, id),
        Err(WorkspaceError::Tree(FileTreeError::TooLarge { limit: 16 }))
    );
    assert!(editor.is_modified(id));
    assert_eq!(tree.read_file(&p("/a.ts")), Ok("// /a.ts"));
}

#[test]
fn save_all_reports_failures() {
    let mut tree = tree_with(&["/a", "/b"]);
    let mut editor = EditorState::default();
    let ids = open_all(&mut editor, &tree, &["/a", "/b"]);
    editor.update_content(ids[0], "A");
    editor.update_content(ids[1], "B");
    tree.delete(&p("/b")).unwrap();

    let failed = editor.save_all(&mut tree);
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, p("/b"));
    assert!(!editor.is_modified(ids[0]));
    assert!(editor.is_modified(ids[1]));
}

#[test]
fn close_under_closes_descendants_only() {
    let tree = tree_with(&["/a/x.ts", "/a/y/z.ts", "/ab/w.ts", "/b.ts"]);
    let mut editor = EditorState::default();
    let ids = open_all(&mut editor, &tree, &["/a/x.ts", "/ab/w.ts", "/a/y/z.ts", "/b.ts"]);
    editor.set_active(ids[0]);

    let closed = editor.close_under(&p("/a"));
    assert_eq!(closed, vec![ids[0], ids[2]]);
    let remaining: Vec<TabId> = editor.tabs().iter().map(|t| t.id).collect();
    assert_eq!(remaining, vec![ids[1], ids[3]]);
    // /a/x.ts was at index 0; /ab/w.ts slid into its place.
    assert_eq!(editor.active_id(), Some(ids[1]));
}

#[test]
fn rebase_paths_keeps_buffers() {
    let tree = tree_with(&["/a/b.ts", "/ab.ts"]);
    let mut editor = EditorState::default();
    let ids = open_all(&mut editor, &tree, &["/a/b.ts", "/ab.ts"]);
    editor.update_content(ids[0], "dirty");

    assert_eq!(editor.rebase_paths(&p("/a"), &p("/c")), 1);
    let tab = editor.tab(ids[0]).unwrap();
    assert_eq!(tab.path, p("/c/b.ts"));
    assert_eq!(tab.content(), "dirty");
    assert!(tab.is_modified());
    assert_eq!(editor.tab(ids[1]).unwrap().path, p("/ab.ts"));
}

#[test]
fn rebase_renamed_file_updates_title_and_language() {
    let tree = tree_with(&["/note.md"]);
    let mut editor = EditorState::default();
    let id = editor.open(&tree, &p("/note.md")).unwrap().unwrap();

    editor.rebase_paths(&p("/note.md"), &p("/note.py"));
    let tab = editor.tab(id).unwrap();
    assert_eq!(tab.title, "note.py");
    assert_eq!(tab.language, LanguageId::Python);
}

#[test]
fn tab_paths_stay_unique() {
    let tree = tree_with(&["/a", "/b"]);
    let mut editor = EditorState::default();
    for path in ["/a", "/b", "/a", "/b", "/a"] {
        editor.open(&tree, &p(path)).unwrap();
    }
    let mut paths: Vec<_> = editor.tabs().iter().map(|t| t.path.clone()).collect();
    paths.dedup();
    assert_eq!(paths.len(), 2);
    assert_eq!(editor.tabs().len(), 2);
}

#[test]
fn restore_drops_unknown_active_and_continues_ids() {
    let tabs = vec![
        EditorTabState::from_file(TabId::new(3), p("/a"), "a"),
        EditorTabState::restore(TabId::new(7), p("/b"), "edited".into(), "b".into()),
    ];
    let mut editor = EditorState::restore(tabs, Some(TabId::new(9)), None);
    assert_eq!(editor.active_id(), None);
    assert!(editor.is_modified(TabId::new(7)));

    let tree = tree_with(&["/c"]);
    let id = editor.open(&tree, &p("/c")).unwrap().unwrap();
    assert_eq!(id, TabId::new(8));
}

#[test]
fn ids_wrap_after_the_largest_and_skip_open_tabs() {
    let tabs = vec![
        EditorTabState::from_file(TabId::new(1), p("/a"), "a"),
        EditorTabState::from_file(TabId::new(u64::MAX), p("/b"), "b"),
    ];
    let mut editor = EditorState::restore(tabs, None, None);

    let tree = tree_with(&["/c", "/d"]);
    let ids = open_all(&mut editor, &tree, &["/c", "/d"]);
    assert_eq!(ids, vec![TabId::new(2), TabId::new(3)]);

    let mut all: Vec<TabId> = editor.tabs().iter().map(|t| t.id).collect();
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 4);
}

#[test]
fn views_flag_active_and_modified() {
    let tree = tree_with(&["/a", "/b"]);
    let mut editor = EditorState::default();
    let ids = open_all(&mut editor, &tree, &["/a", "/b"]);
    editor.update_content(ids[0], "x");

    let views = editor.views();
    assert_eq!(views.len(), 2);
    assert!(views[0].modified && !views[0].active);
    assert!(!views[1].modified && views[1].active);
}
