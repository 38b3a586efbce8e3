//! 文件树数据模型
//!
//! Nodes live in a slot arena addressed by stable `NodeId`s; folders own the
//! ordered id list of their children. Children are always kept folders-first,
//! then by case-sensitive name, so iteration order is the display order.

use compact_str::CompactString;
use slotmap::{new_key_type, SlotMap};
use std::fmt;

use super::language::LanguageId;
use super::path::{VfsPath, SEPARATOR};

new_key_type! { pub struct NodeId; }

/// Deepest path (in segments) a node may live at. Each folder costs two JSON
/// nesting levels in a snapshot and serde_json reads at most 128, so deeper
/// trees could be written but never loaded back.
pub const MAX_DEPTH: usize = 48;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Folder,
    File,
}

impl NodeKind {
    fn rank(self) -> u8 {
        match self {
            NodeKind::Folder => 0,
            NodeKind::File => 1,
        }
    }
}

/// Coarse failure classes shared by every workspace operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    WrongKind,
    Conflict,
    InvalidOperation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTreeError {
    NotFound,
    NotADirectory,
    NotAFile,
    NameExists,
    InvalidName,
    RootImmutable,
    TooLarge { limit: usize },
    TooDeep { limit: usize },
}

impl FileTreeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FileTreeError::NotFound => ErrorKind::NotFound,
            FileTreeError::NotADirectory | FileTreeError::NotAFile => ErrorKind::WrongKind,
            FileTreeError::NameExists => ErrorKind::Conflict,
            FileTreeError::InvalidName
            | FileTreeError::RootImmutable
            | FileTreeError::TooLarge { .. }
            | FileTreeError::TooDeep { .. } => ErrorKind::InvalidOperation,
        }
    }
}

impl fmt::Display for FileTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileTreeError::NotFound => write!(f, "no such file or directory"),
            FileTreeError::NotADirectory => write!(f, "not a directory"),
            FileTreeError::NotAFile => write!(f, "is a directory"),
            FileTreeError::NameExists => write!(f, "already exists"),
            FileTreeError::InvalidName => write!(f, "invalid name"),
            FileTreeError::RootImmutable => write!(f, "cannot modify the root folder"),
            FileTreeError::TooLarge { limit } => {
                write!(f, "content exceeds the {limit} byte limit")
            }
            FileTreeError::TooDeep { limit } => {
                write!(f, "nesting exceeds the maximum depth of {limit}")
            }
        }
    }
}

impl std::error::Error for FileTreeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    File { content: String, language: LanguageId },
    Folder { children: Vec<NodeId> },
}

#[derive(Debug, Clone)]
pub struct Node {
    name: CompactString,
    parent: Option<NodeId>,
    data: NodeData,
}

impl Node {
    fn new_file(name: CompactString, parent: NodeId, content: String) -> Self {
        let language = LanguageId::from_name(&name);
        Self {
            name,
            parent: Some(parent),
            data: NodeData::File { content, language },
        }
    }

    fn new_folder(name: CompactString, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            data: NodeData::Folder {
                children: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::File { .. } => NodeKind::File,
            NodeData::Folder { .. } => NodeKind::Folder,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == NodeKind::Folder
    }

    pub fn content(&self) -> Option<&str> {
        match &self.data {
            NodeData::File { content, .. } => Some(content),
            NodeData::Folder { .. } => None,
        }
    }

    pub fn language(&self) -> Option<LanguageId> {
        match self.data {
            NodeData::File { language, .. } => Some(language),
            NodeData::Folder { .. } => None,
        }
    }

    pub fn children(&self) -> Option<&[NodeId]> {
        match &self.data {
            NodeData::Folder { children } => Some(children),
            NodeData::File { .. } => None,
        }
    }

    fn sort_key(&self) -> (u8, &str) {
        (self.kind().rank(), self.name.as_str())
    }
}

/// Names are single path segments.
pub fn validate_name(name: &str) -> Result<(), FileTreeError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(SEPARATOR) {
        return Err(FileTreeError::InvalidName);
    }
    if name.chars().any(char::is_control) {
        return Err(FileTreeError::InvalidName);
    }
    Ok(())
}

#[derive(Debug)]
pub struct FileTree {
    arena: SlotMap<NodeId, Node>,
    root: NodeId,
    max_file_size: Option<usize>,
    version: u64,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTree {
    pub fn new() -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Node::new_folder(CompactString::default(), None));
        Self {
            arena,
            root,
            max_file_size: None,
            version: 0,
        }
    }

    pub fn with_max_file_size(mut self, limit: Option<usize>) -> Self {
        self.max_file_size = limit;
        self
    }

    pub fn set_max_file_size(&mut self, limit: Option<usize>) {
        self.max_file_size = limit;
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Bumped on every successful mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of nodes below the root.
    pub fn node_count(&self) -> usize {
        self.arena.len().saturating_sub(1)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    pub fn lookup(&self, path: &VfsPath) -> Option<NodeId> {
        let mut current = self.root;
        for segment in path.segments() {
            current = self.child_by_name(current, segment)?;
        }
        Some(current)
    }

    pub fn get(&self, path: &VfsPath) -> Option<&Node> {
        self.lookup(path).and_then(|id| self.arena.get(id))
    }

    pub fn path_of(&self, id: NodeId) -> Option<VfsPath> {
        let mut names = Vec::new();
        let mut current = self.arena.get(id)?;
        while let Some(parent) = current.parent {
            names.push(current.name.as_str());
            current = self.arena.get(parent)?;
        }
        let mut path = VfsPath::root();
        for name in names.iter().rev() {
            path = path.join(name);
        }
        Some(path)
    }

    /// An empty folder is `Ok(vec![])`; a missing path is `NotFound`.
    pub fn list_children(&self, path: &VfsPath) -> Result<Vec<&Node>, FileTreeError> {
        let node = self.get(path).ok_or(FileTreeError::NotFound)?;
        let children = node.children().ok_or(FileTreeError::NotADirectory)?;
        Ok(children
            .iter()
            .filter_map(|&id| self.arena.get(id))
            .collect())
    }

    pub fn read_file(&self, path: &VfsPath) -> Result<&str, FileTreeError> {
        let node = self.get(path).ok_or(FileTreeError::NotFound)?;
        node.content().ok_or(FileTreeError::NotAFile)
    }

    pub fn create_file(
        &mut self,
        parent: &VfsPath,
        name: &str,
        content: impl Into<String>,
    ) -> Result<NodeId, FileTreeError> {
        let parent_id = self.lookup(parent).ok_or(FileTreeError::NotFound)?;
        self.insert_file(parent_id, name, content.into())
    }

    pub fn create_folder(&mut self, parent: &VfsPath, name: &str) -> Result<NodeId, FileTreeError> {
        let parent_id = self.lookup(parent).ok_or(FileTreeError::NotFound)?;
        self.insert_folder(parent_id, name)
    }

    pub fn insert_file(
        &mut self,
        parent: NodeId,
        name: &str,
        content: String,
    ) -> Result<NodeId, FileTreeError> {
        self.check_size(&content)?;
        self.check_insert(parent, name)?;
        let node = Node::new_file(CompactString::from(name), parent, content);
        Ok(self.attach(parent, node))
    }

    pub fn insert_folder(&mut self, parent: NodeId, name: &str) -> Result<NodeId, FileTreeError> {
        self.check_insert(parent, name)?;
        let node = Node::new_folder(CompactString::from(name), Some(parent));
        Ok(self.attach(parent, node))
    }

    /// Removes the node at `path` and everything it owns. Returns the number
    /// of nodes removed.
    pub fn delete(&mut self, path: &VfsPath) -> Result<usize, FileTreeError> {
        if path.is_root() {
            return Err(FileTreeError::RootImmutable);
        }
        let id = self.lookup(path).ok_or(FileTreeError::NotFound)?;
        self.detach(id);

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            if let Some(node) = self.arena.remove(node_id) {
                if let NodeData::Folder { children } = node.data {
                    stack.extend(children);
                }
                removed += 1;
            }
        }

        self.version += 1;
        Ok(removed)
    }

    /// Renames the node at `path`, returning its new path. Files get their
    /// language re-derived from the new name.
    pub fn rename(&mut self, path: &VfsPath, new_name: &str) -> Result<VfsPath, FileTreeError> {
        let (_, old_name) = path.split_last().ok_or(FileTreeError::RootImmutable)?;
        validate_name(new_name)?;
        let id = self.lookup(path).ok_or(FileTreeError::NotFound)?;
        let new_path = path.with_name(new_name).ok_or(FileTreeError::RootImmutable)?;

        if old_name == new_name {
            return Ok(new_path);
        }

        let parent = self
            .arena
            .get(id)
            .and_then(|n| n.parent)
            .ok_or(FileTreeError::RootImmutable)?;
        if self.child_by_name(parent, new_name).is_some() {
            return Err(FileTreeError::NameExists);
        }

        self.detach(id);
        if let Some(node) = self.arena.get_mut(id) {
            node.name = CompactString::from(new_name);
            if let NodeData::File { language, .. } = &mut node.data {
                *language = LanguageId::from_name(new_name);
            }
        }
        self.insert_sorted(parent, id);

        self.version += 1;
        Ok(new_path)
    }

    pub fn update_file_content(
        &mut self,
        path: &VfsPath,
        new_content: impl Into<String>,
    ) -> Result<(), FileTreeError> {
        let new_content = new_content.into();
        self.check_size(&new_content)?;
        let id = self.lookup(path).ok_or(FileTreeError::NotFound)?;
        match self.arena.get_mut(id).map(|n| &mut n.data) {
            Some(NodeData::File { content, .. }) => {
                *content = new_content;
            }
            Some(NodeData::Folder { .. }) => return Err(FileTreeError::NotAFile),
            None => return Err(FileTreeError::NotFound),
        }
        self.version += 1;
        Ok(())
    }

    fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.arena
            .get(parent)?
            .children()?
            .iter()
            .copied()
            .find(|&id| self.arena.get(id).is_some_and(|n| n.name.as_str() == name))
    }

    fn check_size(&self, content: &str) -> Result<(), FileTreeError> {
        match self.max_file_size {
            Some(limit) if content.len() > limit => Err(FileTreeError::TooLarge { limit }),
            _ => Ok(()),
        }
    }

    fn check_insert(&self, parent: NodeId, name: &str) -> Result<(), FileTreeError> {
        validate_name(name)?;
        let parent_node = self.arena.get(parent).ok_or(FileTreeError::NotFound)?;
        if parent_node.children().is_none() {
            return Err(FileTreeError::NotADirectory);
        }
        if self.child_by_name(parent, name).is_some() {
            return Err(FileTreeError::NameExists);
        }
        if self.depth_of(parent) >= MAX_DEPTH {
            return Err(FileTreeError::TooDeep { limit: MAX_DEPTH });
        }
        Ok(())
    }

    /// Segments between the root and `id`; the root itself is 0.
    fn depth_of(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.arena.get(id).and_then(|n| n.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.arena.get(parent).and_then(|n| n.parent);
        }
        depth
    }

    fn attach(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.arena.insert(node);
        self.insert_sorted(parent, id);
        self.version += 1;
        id
    }

    fn insert_sorted(&mut self, parent: NodeId, id: NodeId) {
        let position = {
            let (Some(node), Some(children)) = (
                self.arena.get(id),
                self.arena.get(parent).and_then(Node::children),
            ) else {
                return;
            };
            let key = node.sort_key();
            children.partition_point(|&child| {
                self.arena
                    .get(child)
                    .is_some_and(|c| c.sort_key() < key)
            })
        };

        if let Some(NodeData::Folder { children }) = self.arena.get_mut(parent).map(|n| &mut n.data)
        {
            children.insert(position, id);
        }
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.arena.get(id).and_then(|n| n.parent) else {
            return;
        };
        if let Some(NodeData::Folder { children }) = self.arena.get_mut(parent).map(|n| &mut n.data)
        {
            children.retain(|&child| child != id);
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileTreeRow {
    pub id: NodeId,
    pub depth: u16,
    pub name: CompactString,
    pub kind: NodeKind,
}

impl FileTree {
    /// Depth-first listing of everything below `from`, in display order.
    pub fn flatten(&self, from: NodeId) -> Vec<FileTreeRow> {
        let mut result = Vec::new();
        let mut stack: Vec<(NodeId, u16)> = Vec::new();
        if let Some(children) = self.arena.get(from).and_then(Node::children) {
            stack.extend(children.iter().rev().map(|&id| (id, 0)));
        }

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.arena.get(id) else {
                continue;
            };
            result.push(FileTreeRow {
                id,
                depth,
                name: node.name.clone(),
                kind: node.kind(),
            });
            if let Some(children) = node.children() {
                stack.extend(children.iter().rev().map(|&child| (child, depth.saturating_add(1))));
            }
        }

        result
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;
