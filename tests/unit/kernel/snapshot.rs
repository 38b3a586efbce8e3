use super::*;
use crate::kernel::seed::default_tree;
use crate::models::LanguageId;

fn p(path: &str) -> VfsPath {
    VfsPath::parse(path)
}

fn tab(id: u64, path: &str, content: &str, saved: &str) -> TabSnapshot {
    let path = p(path);
    TabSnapshot {
        id: TabId::new(id),
        name: path.name().unwrap_or_default().to_string(),
        language: LanguageId::from_name(path.name().unwrap_or_default()),
        path,
        content: content.to_string(),
        saved_content: saved.to_string(),
    }
}

#[test]
fn seed_tree_loads_cleanly() {
    let (tree, dropped) = tree_from_snapshot(&default_tree());
    assert_eq!(dropped, 0);
    assert!(tree.get(&p("/src/components/App.tsx")).is_some());
    assert!(tree.get(&p("/src/utils/constants.ts")).is_some());
    assert!(tree.get(&p("/public/favicon.ico")).is_some());
    assert_eq!(
        tree.get(&p("/README.md")).and_then(|n| n.language()),
        Some(LanguageId::Markdown)
    );
}

#[test]
fn tree_round_trips_through_snapshot_in_display_order() {
    let (tree, _) = tree_from_snapshot(&default_tree());
    let snapshot = tree_to_snapshot(&tree);

    let top: Vec<&str> = snapshot.iter().map(NodeSnapshot::name).collect();
    assert_eq!(
        top,
        vec!["public", "src", "README.md", "package.json", "tsconfig.json"]
    );

    let (again, dropped) = tree_from_snapshot(&snapshot);
    assert_eq!(dropped, 0);
    assert_eq!(tree_to_snapshot(&again), snapshot);
    assert_eq!(again.node_count(), tree.node_count());
}

#[test]
fn nested_folders_close_at_the_right_depth() {
    let mut tree = FileTree::new();
    tree.create_folder(&VfsPath::root(), "a").unwrap();
    tree.create_folder(&p("/a"), "b").unwrap();
    tree.create_file(&p("/a/b"), "deep.rs", "x").unwrap();
    tree.create_file(&p("/a"), "mid.rs", "y").unwrap();
    tree.create_file(&VfsPath::root(), "top.rs", "z").unwrap();

    let snapshot = tree_to_snapshot(&tree);
    assert_eq!(
        snapshot,
        vec![
            NodeSnapshot::folder(
                "a",
                vec![
                    NodeSnapshot::folder("b", vec![NodeSnapshot::file("deep.rs", "x")]),
                    NodeSnapshot::file("mid.rs", "y"),
                ],
            ),
            NodeSnapshot::file("top.rs", "z"),
        ]
    );
}

#[test]
fn duplicate_and_invalid_nodes_are_dropped() {
    let nodes = vec![
        NodeSnapshot::folder(
            "src",
            vec![NodeSnapshot::file("a.ts", "first"), NodeSnapshot::file("b.ts", "")],
        ),
        NodeSnapshot::folder("src", vec![NodeSnapshot::file("a.ts", "second")]),
        NodeSnapshot::file("bad/name", ""),
        NodeSnapshot::file("", ""),
    ];

    let (tree, dropped) = tree_from_snapshot(&nodes);
    assert_eq!(dropped, 4);
    assert_eq!(tree.read_file(&p("/src/a.ts")), Ok("first"));
    assert_eq!(tree.node_count(), 3);
}

#[test]
fn stored_language_is_rederived_from_name() {
    let nodes = vec![NodeSnapshot::File {
        name: "main.py".to_string(),
        language: Some(LanguageId::Rust),
        content: String::new(),
    }];
    let (tree, _) = tree_from_snapshot(&nodes);
    assert_eq!(
        tree.get(&p("/main.py")).and_then(|n| n.language()),
        Some(LanguageId::Python)
    );
}

#[test]
fn tabs_for_missing_files_and_duplicate_paths_are_dropped() {
    let (tree, _) = tree_from_snapshot(&default_tree());
    let tabs = vec![
        tab(1, "/src/index.ts", "edited", "orig"),
        tab(2, "/gone.ts", "", ""),
        tab(3, "/src", "", ""),
        tab(4, "/src/index.ts", "", ""),
        tab(5, "/README.md", "", ""),
    ];

    let editor = editor_from_snapshot(tabs, Some(TabId::new(2)), &tree, None);
    let ids: Vec<TabId> = editor.tabs().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![TabId::new(1), TabId::new(5)]);
    assert_eq!(editor.active_id(), None);
    assert!(editor.is_modified(TabId::new(1)));
}

#[test]
fn duplicate_tab_ids_are_reassigned() {
    let (tree, _) = tree_from_snapshot(&default_tree());
    let tabs = vec![
        tab(7, "/src/index.ts", "", ""),
        tab(7, "/README.md", "", ""),
    ];

    let mut editor = editor_from_snapshot(tabs, Some(TabId::new(7)), &tree, None);
    let ids: Vec<TabId> = editor.tabs().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![TabId::new(7), TabId::new(8)]);
    assert_eq!(editor.active_id(), Some(TabId::new(7)));

    let opened = editor.open(&tree, &p("/package.json")).unwrap();
    assert_eq!(opened, Some(TabId::new(9)));
}

#[test]
fn duplicate_ids_at_the_top_of_the_range_wrap() {
    let (tree, _) = tree_from_snapshot(&default_tree());
    let tabs = vec![
        tab(u64::MAX, "/src/index.ts", "", ""),
        tab(u64::MAX, "/README.md", "", ""),
        tab(1, "/package.json", "", ""),
    ];

    let mut editor = editor_from_snapshot(tabs, None, &tree, None);
    let ids: Vec<TabId> = editor.tabs().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![TabId::new(u64::MAX), TabId::new(2), TabId::new(1)]);

    let opened = editor.open(&tree, &p("/src/components/App.tsx")).unwrap();
    assert_eq!(opened, Some(TabId::new(3)));
}

#[test]
fn tabs_snapshot_keeps_buffers() {
    let (tree, _) = tree_from_snapshot(&default_tree());
    let mut editor = EditorState::default();
    let id = editor.open(&tree, &p("/README.md")).unwrap().unwrap();
    editor.update_content(id, "draft");

    let snapshot = tabs_to_snapshot(&editor);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "README.md");
    assert_eq!(snapshot[0].content, "draft");
    assert_ne!(snapshot[0].saved_content, "draft");
}
