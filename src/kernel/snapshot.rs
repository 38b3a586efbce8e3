//! Conversion between live state and persisted snapshots.
//!
//! Loading repairs instead of trusting: anything that would break a tree or
//! tab invariant is dropped with a warning.

use rustc_hash::FxHashSet;

use crate::kernel::editor::{next_raw_id, EditorState, EditorTabState, TabId};
use crate::kernel::services::ports::{NodeSnapshot, TabSnapshot};
use crate::models::{FileTree, NodeData, NodeId, NodeKind, VfsPath};

pub fn tree_to_snapshot(tree: &FileTree) -> Vec<NodeSnapshot> {
    let mut top = Vec::new();
    // Folders still collecting children, innermost last.
    let mut open: Vec<(String, Vec<NodeSnapshot>)> = Vec::new();

    fn close_one(top: &mut Vec<NodeSnapshot>, open: &mut Vec<(String, Vec<NodeSnapshot>)>) {
        if let Some((name, children)) = open.pop() {
            let folder = NodeSnapshot::folder(name, children);
            match open.last_mut() {
                Some((_, siblings)) => siblings.push(folder),
                None => top.push(folder),
            }
        }
    }

    for row in tree.flatten(tree.root()) {
        while open.len() > usize::from(row.depth) {
            close_one(&mut top, &mut open);
        }
        let Some(node) = tree.node(row.id) else {
            continue;
        };
        match node.data() {
            NodeData::Folder { .. } => open.push((node.name().to_string(), Vec::new())),
            NodeData::File { content, language } => {
                let file = NodeSnapshot::File {
                    name: node.name().to_string(),
                    language: Some(*language),
                    content: content.clone(),
                };
                match open.last_mut() {
                    Some((_, siblings)) => siblings.push(file),
                    None => top.push(file),
                }
            }
        }
    }
    while !open.is_empty() {
        close_one(&mut top, &mut open);
    }
    top
}

/// Rebuilds a tree, returning it with the number of nodes that had to be
/// dropped. Size limits are not applied here; persisted content is kept even
/// if the limit shrank since it was written.
pub fn tree_from_snapshot(nodes: &[NodeSnapshot]) -> (FileTree, usize) {
    let mut tree = FileTree::new();
    let mut dropped = 0;
    let mut stack: Vec<(NodeId, &NodeSnapshot)> =
        nodes.iter().rev().map(|n| (tree.root(), n)).collect();

    while let Some((parent, snapshot)) = stack.pop() {
        let inserted = match snapshot {
            NodeSnapshot::File { name, content, .. } => {
                tree.insert_file(parent, name, content.clone())
            }
            NodeSnapshot::Folder { name, .. } => tree.insert_folder(parent, name),
        };
        match inserted {
            Ok(id) => {
                if let NodeSnapshot::Folder { children, .. } = snapshot {
                    stack.extend(children.iter().rev().map(|child| (id, child)));
                }
            }
            Err(err) => {
                let skipped = count_nodes(snapshot);
                tracing::warn!(
                    name = snapshot.name(),
                    error = %err,
                    skipped,
                    "dropping invalid node from persisted tree"
                );
                dropped += skipped;
            }
        }
    }

    (tree, dropped)
}

fn count_nodes(snapshot: &NodeSnapshot) -> usize {
    let mut count = 0;
    let mut stack = vec![snapshot];
    while let Some(node) = stack.pop() {
        count += 1;
        if let NodeSnapshot::Folder { children, .. } = node {
            stack.extend(children.iter());
        }
    }
    count
}

pub fn tabs_to_snapshot(editor: &EditorState) -> Vec<TabSnapshot> {
    editor
        .tabs()
        .iter()
        .map(|tab| TabSnapshot {
            id: tab.id,
            name: tab.title.clone(),
            path: tab.path.clone(),
            language: tab.language,
            content: tab.content().to_string(),
            saved_content: tab.saved_content().to_string(),
        })
        .collect()
}

/// Restores tabs against an already loaded tree. Tabs pointing at missing
/// files or repeating an earlier path are dropped; repeated ids are
/// reassigned.
pub fn editor_from_snapshot(
    tabs: Vec<TabSnapshot>,
    active: Option<TabId>,
    tree: &FileTree,
    max_tabs: Option<usize>,
) -> EditorState {
    let mut next_id = tabs.iter().map(|t| t.id.raw()).max().unwrap_or(0);
    let mut taken: FxHashSet<TabId> = tabs.iter().map(|t| t.id).collect();
    let mut seen_ids = FxHashSet::default();
    let mut seen_paths: FxHashSet<VfsPath> = FxHashSet::default();
    let mut restored = Vec::with_capacity(tabs.len());

    for tab in tabs {
        let is_file = tree
            .get(&tab.path)
            .is_some_and(|node| node.kind() == NodeKind::File);
        if !is_file {
            tracing::warn!(path = %tab.path, "dropping tab for missing file");
            continue;
        }
        if !seen_paths.insert(tab.path.clone()) {
            tracing::warn!(path = %tab.path, "dropping duplicate tab");
            continue;
        }

        let id = if seen_ids.insert(tab.id) {
            tab.id
        } else {
            let fresh = loop {
                next_id = next_raw_id(next_id);
                let candidate = TabId::new(next_id);
                if taken.insert(candidate) {
                    break candidate;
                }
            };
            tracing::warn!(old = %tab.id, new = %fresh, "reassigning duplicate tab id");
            fresh
        };

        restored.push(EditorTabState::restore(
            id,
            tab.path,
            tab.content,
            tab.saved_content,
        ));
    }

    let active = active.filter(|id| restored.iter().any(|t| t.id == *id));
    EditorState::restore(restored, active, max_tabs)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/snapshot.rs"]
mod tests;
