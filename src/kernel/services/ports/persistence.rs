use serde::{Deserialize, Serialize};
use std::io;

use crate::kernel::editor::TabId;
use crate::models::{LanguageId, VfsPath};

/// Serialized tree node: `{ "name", "type": "file" | "folder", ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeSnapshot {
    File {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<LanguageId>,
        #[serde(default)]
        content: String,
    },
    Folder {
        name: String,
        #[serde(default)]
        children: Vec<NodeSnapshot>,
    },
}

impl NodeSnapshot {
    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        NodeSnapshot::File {
            language: Some(LanguageId::from_name(&name)),
            name,
            content: content.into(),
        }
    }

    pub fn folder(name: impl Into<String>, children: Vec<NodeSnapshot>) -> Self {
        NodeSnapshot::Folder {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NodeSnapshot::File { name, .. } | NodeSnapshot::Folder { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSnapshot {
    pub id: TabId,
    pub name: String,
    pub path: VfsPath,
    pub language: LanguageId,
    pub content: String,
    pub saved_content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceSnapshot {
    pub tree: Vec<NodeSnapshot>,
    pub tabs: Vec<TabSnapshot>,
    pub active_tab: Option<TabId>,
}

/// Durable store for the three workspace slices. Writes are best effort: the
/// caller logs failures and keeps going.
pub trait WorkspacePersistence {
    /// `Ok(None)` when nothing was ever persisted.
    fn load(&self) -> io::Result<Option<WorkspaceSnapshot>>;
    fn persist_tree(&mut self, tree: &[NodeSnapshot]) -> io::Result<()>;
    fn persist_tabs(&mut self, tabs: &[TabSnapshot]) -> io::Result<()>;
    fn persist_active_tab(&mut self, active: Option<TabId>) -> io::Result<()>;
    /// Moves data that `load` could not read out of the way, so the next
    /// write cannot destroy it.
    fn set_aside_unreadable(&mut self) -> io::Result<()>;
}
