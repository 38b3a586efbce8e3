use serde::{Deserialize, Serialize};

use crate::kernel::error::WorkspaceError;
use crate::models::{FileTree, LanguageId, VfsPath};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(u64);

impl TabId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One open buffer. `content` is a private copy of the file; it only reaches
/// the tree through `EditorState::save`.
#[derive(Debug, Clone)]
pub struct EditorTabState {
    pub id: TabId,
    pub title: String,
    pub path: VfsPath,
    pub language: LanguageId,
    content: String,
    saved_content: String,
}

impl EditorTabState {
    pub fn from_file(id: TabId, path: VfsPath, content: &str) -> Self {
        Self::restore(id, path, content.to_string(), content.to_string())
    }

    pub fn restore(id: TabId, path: VfsPath, content: String, saved_content: String) -> Self {
        let title = path.name().unwrap_or("Untitled").to_string();
        let language = LanguageId::from_name(&title);
        Self {
            id,
            title,
            path,
            language,
            content,
            saved_content,
        }
    }

    pub fn set_path(&mut self, path: VfsPath) {
        self.title = path.name().unwrap_or("Untitled").to_string();
        self.language = LanguageId::from_name(&self.title);
        self.path = path;
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn saved_content(&self) -> &str {
        &self.saved_content
    }

    pub fn is_modified(&self) -> bool {
        self.content != self.saved_content
    }
}

/// Read-only projection for rendering a tab strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub id: TabId,
    pub title: String,
    pub path: VfsPath,
    pub language: LanguageId,
    pub modified: bool,
    pub active: bool,
}

#[derive(Debug)]
pub struct EditorState {
    tabs: Vec<EditorTabState>,
    active: Option<TabId>,
    next_tab_id: u64,
    max_tabs: Option<usize>,
    version: u64,
}

impl EditorState {
    pub fn new(max_tabs: Option<usize>) -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
            next_tab_id: 1,
            max_tabs,
            version: 0,
        }
    }

    /// Rebuilds state from already validated tabs. An active id that is not
    /// among `tabs` is dropped.
    pub fn restore(
        tabs: Vec<EditorTabState>,
        active: Option<TabId>,
        max_tabs: Option<usize>,
    ) -> Self {
        let next_tab_id = tabs
            .iter()
            .map(|t| t.id.raw())
            .max()
            .map_or(1, next_raw_id);
        let active = active.filter(|id| tabs.iter().any(|t| t.id == *id));
        Self {
            tabs,
            active,
            next_tab_id,
            max_tabs,
            version: 0,
        }
    }

    /// Ids count up from the last one handed out and wrap past `u64::MAX`,
    /// skipping any still held by an open tab.
    fn alloc_tab_id(&mut self) -> TabId {
        let mut raw = self.next_tab_id;
        while self.tabs.iter().any(|t| t.id.raw() == raw) {
            raw = next_raw_id(raw);
        }
        self.next_tab_id = next_raw_id(raw);
        TabId::new(raw)
    }

    /// Bumped whenever the tab list or any tab's buffer or path changes.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn tabs(&self) -> &[EditorTabState] {
        &self.tabs
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active
    }

    pub fn active_tab(&self) -> Option<&EditorTabState> {
        self.active.and_then(|id| self.tab(id))
    }

    pub fn tab(&self, id: TabId) -> Option<&EditorTabState> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn tab_for_path(&self, path: &VfsPath) -> Option<&EditorTabState> {
        self.tabs.iter().find(|t| &t.path == path)
    }

    fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn views(&self) -> Vec<TabView> {
        self.tabs
            .iter()
            .map(|t| TabView {
                id: t.id,
                title: t.title.clone(),
                path: t.path.clone(),
                language: t.language,
                modified: t.is_modified(),
                active: self.active == Some(t.id),
            })
            .collect()
    }

    /// Activates the tab already showing `path`, or opens a new one for it.
    ///
    /// Returns `Ok(None)` without touching state when `path` is missing or is
    /// a folder.
    pub fn open(
        &mut self,
        tree: &FileTree,
        path: &VfsPath,
    ) -> Result<Option<TabId>, WorkspaceError> {
        if let Some(existing) = self.tab_for_path(path).map(|t| t.id) {
            self.active = Some(existing);
            return Ok(Some(existing));
        }

        let Some(content) = tree.get(path).and_then(|n| n.content()) else {
            return Ok(None);
        };

        if let Some(limit) = self.max_tabs {
            if self.tabs.len() >= limit {
                return Err(WorkspaceError::TooManyTabs { limit });
            }
        }

        let id = self.alloc_tab_id();
        self.tabs
            .push(EditorTabState::from_file(id, path.clone(), content));
        self.active = Some(id);
        self.version += 1;
        Ok(Some(id))
    }

    /// Closing an unknown id is a no-op. When the active tab closes, the tab
    /// that slides into its index takes over, else the new last tab.
    pub fn close(&mut self, id: TabId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.tabs.remove(index);
        if self.active == Some(id) {
            self.active = if self.tabs.is_empty() {
                None
            } else {
                let candidate = index.min(self.tabs.len() - 1);
                Some(self.tabs[candidate].id)
            };
        }
        self.version += 1;
        true
    }

    pub fn set_active(&mut self, id: TabId) -> bool {
        if self.index_of(id).is_none() || self.active == Some(id) {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Replaces the live buffer only; the tree and `saved_content` are left
    /// alone.
    pub fn update_content(&mut self, id: TabId, content: impl Into<String>) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let content = content.into();
        let tab = &mut self.tabs[index];
        if tab.content == content {
            return false;
        }
        tab.content = content;
        self.version += 1;
        true
    }

    /// Writes the buffer into the tree. The tab only counts as saved once the
    /// tree accepted the write. Unknown ids yield `Ok(false)`.
    pub fn save(&mut self, tree: &mut FileTree, id: TabId) -> Result<bool, WorkspaceError> {
        let Some(index) = self.index_of(id) else {
            return Ok(false);
        };
        let tab = &mut self.tabs[index];
        tree.update_file_content(&tab.path, tab.content.as_str())?;
        if tab.saved_content != tab.content {
            tab.saved_content = tab.content.clone();
            self.version += 1;
        }
        Ok(true)
    }

    /// Saves every modified tab, returning the ones the tree rejected.
    pub fn save_all(&mut self, tree: &mut FileTree) -> Vec<(VfsPath, WorkspaceError)> {
        let dirty: Vec<TabId> = self
            .tabs
            .iter()
            .filter(|t| t.is_modified())
            .map(|t| t.id)
            .collect();

        let mut failed = Vec::new();
        for id in dirty {
            if let Err(err) = self.save(tree, id) {
                if let Some(tab) = self.tab(id) {
                    failed.push((tab.path.clone(), err));
                }
            }
        }
        failed
    }

    pub fn is_modified(&self, id: TabId) -> bool {
        self.tab(id).is_some_and(EditorTabState::is_modified)
    }

    /// Closes every tab at `path` or below it, applying the close rule to
    /// each in list order.
    pub fn close_under(&mut self, path: &VfsPath) -> Vec<TabId> {
        let doomed: Vec<TabId> = self
            .tabs
            .iter()
            .filter(|t| t.path.starts_with(path))
            .map(|t| t.id)
            .collect();
        for &id in &doomed {
            self.close(id);
        }
        doomed
    }

    /// Rewrites tab paths after `old` was renamed to `new`. Buffers and dirty
    /// state are untouched.
    pub fn rebase_paths(&mut self, old: &VfsPath, new: &VfsPath) -> usize {
        let mut moved = 0;
        for tab in &mut self.tabs {
            if let Some(rebased) = tab.path.replace_prefix(old, new) {
                tab.set_path(rebased);
                moved += 1;
            }
        }
        if moved > 0 {
            self.version += 1;
        }
        moved
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Successor of a raw tab id. Zero is never handed out.
pub(crate) fn next_raw_id(raw: u64) -> u64 {
    raw.checked_add(1).unwrap_or(1)
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/state.rs"]
mod tests;
