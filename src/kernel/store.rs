use tracing::debug;

use crate::kernel::services::adapters::{PermissionTable, StaticIdentity};
use crate::kernel::services::ports::{FilePermission, IdentityProvider, PermissionSource};
use crate::models::VfsPath;

use super::{Action, AppState, EditorAction, Effect, TabId, WorkspaceError};

mod commands;

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
    pub error: Option<WorkspaceError>,
}

/// Read-only collaborators consulted by `whoami` and `perm`.
pub struct Collaborators {
    pub identity: Box<dyn IdentityProvider>,
    pub permissions: Box<dyn PermissionSource>,
    pub group_id: Option<String>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            identity: Box::new(StaticIdentity::anonymous()),
            permissions: Box::new(PermissionTable::new()),
            group_id: None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct Marker {
    tree: u64,
    tabs: u64,
    active: Option<TabId>,
}

pub struct Store {
    state: AppState,
    collab: Collaborators,
    pending: Vec<Effect>,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self::with_collaborators(state, Collaborators::default())
    }

    pub fn with_collaborators(state: AppState, collab: Collaborators) -> Self {
        Self {
            state,
            collab,
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Effects accumulated by direct calls since the last drain.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending)
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let before = self.mark();
        let outcome: Result<bool, WorkspaceError> = match action {
            Action::CreateFile {
                parent,
                name,
                content,
            } => self.create_file(&parent, &name, content).map(|_| false),
            Action::CreateFolder { parent, name } => {
                self.create_folder(&parent, &name).map(|_| false)
            }
            Action::DeleteNode { path } => self.delete_node(&path).map(|_| false),
            Action::RenameNode { path, new_name } => {
                self.rename_node(&path, &new_name).map(|_| false)
            }
            Action::UpdateFileContent { path, content } => {
                self.update_file_content(&path, content).map(|_| false)
            }
            Action::Editor(editor_action) => self.dispatch_editor(editor_action),
            Action::TerminalSubmit { line } => {
                self.execute_command(&line);
                Ok(true)
            }
            Action::TerminalSetInput { text } => {
                let changed = self.state.terminal.input() != text;
                self.state.terminal.set_input(text);
                Ok(changed)
            }
            Action::TerminalHistoryPrev => Ok(self.state.terminal.history_prev()),
            Action::TerminalHistoryNext => Ok(self.state.terminal.history_next()),
        };

        let (extra, error) = match outcome {
            Ok(changed) => (changed, None),
            Err(err) => (false, Some(err)),
        };
        DispatchResult {
            effects: self.take_effects(),
            state_changed: extra || self.mark() != before,
            error,
        }
    }

    fn dispatch_editor(&mut self, action: EditorAction) -> Result<bool, WorkspaceError> {
        match action {
            EditorAction::OpenFile { path } => self.open_file(&path).map(|_| false),
            EditorAction::CloseTab { id } => Ok(self.close_tab(id)),
            EditorAction::SetActiveTab { id } => Ok(self.set_active_tab(id)),
            EditorAction::UpdateContent { id, content } => {
                Ok(self.update_tab_content(id, content))
            }
            EditorAction::SaveTab { id } => self.save_tab(id),
            EditorAction::SaveActive => self.save_active_tab(),
            EditorAction::SaveAll => match self.save_all().into_iter().next() {
                Some((_, err)) => Err(err),
                None => Ok(false),
            },
        }
    }

    fn mark(&self) -> Marker {
        Marker {
            tree: self.state.tree.version(),
            tabs: self.state.editor.version(),
            active: self.state.editor.active_id(),
        }
    }

    /// Runs `op` and queues one persistence effect per slice it changed.
    fn tracked<T>(&mut self, op: impl FnOnce(&mut AppState) -> T) -> T {
        let before = self.mark();
        let out = op(&mut self.state);
        let after = self.mark();

        let mut push = |effect: Effect| {
            if !self.pending.contains(&effect) {
                self.pending.push(effect);
            }
        };
        if after.tree != before.tree {
            push(Effect::PersistTree);
        }
        if after.tabs != before.tabs {
            push(Effect::PersistTabs);
        }
        if after.active != before.active {
            push(Effect::PersistActiveTab);
        }
        out
    }

    // ── tree ────────────────────────────────────────────────────────────

    pub fn create_file(
        &mut self,
        parent: &VfsPath,
        name: &str,
        content: impl Into<String>,
    ) -> Result<VfsPath, WorkspaceError> {
        let content = content.into();
        self.tracked(|state| state.tree.create_file(parent, name, content))?;
        let path = parent.join(name);
        debug!(path = %path, "created file");
        Ok(path)
    }

    pub fn create_folder(&mut self, parent: &VfsPath, name: &str) -> Result<VfsPath, WorkspaceError> {
        self.tracked(|state| state.tree.create_folder(parent, name))?;
        let path = parent.join(name);
        debug!(path = %path, "created folder");
        Ok(path)
    }

    /// Deletes `path` and its subtree, then closes every tab that was showing
    /// something inside it. Returns the number of nodes removed.
    pub fn delete_node(&mut self, path: &VfsPath) -> Result<usize, WorkspaceError> {
        let (removed, closed) = self.tracked(|state| {
            let removed = state.tree.delete(path)?;
            let closed = state.editor.close_under(path);
            Ok::<_, WorkspaceError>((removed, closed))
        })?;
        // A removed cwd falls back to its nearest surviving ancestor.
        if self.state.terminal.cwd().starts_with(path) {
            self.state
                .terminal
                .set_cwd(path.parent().unwrap_or_else(VfsPath::root));
        }
        debug!(path = %path, removed, closed_tabs = closed.len(), "deleted node");
        Ok(removed)
    }

    /// Renames the node at `path` and moves open tabs along with it.
    pub fn rename_node(&mut self, path: &VfsPath, new_name: &str) -> Result<VfsPath, WorkspaceError> {
        let (new_path, moved) = self.tracked(|state| {
            let new_path = state.tree.rename(path, new_name)?;
            let moved = state.editor.rebase_paths(path, &new_path);
            Ok::<_, WorkspaceError>((new_path, moved))
        })?;
        if let Some(cwd) = self.state.terminal.cwd().replace_prefix(path, &new_path) {
            self.state.terminal.set_cwd(cwd);
        }
        debug!(from = %path, to = %new_path, moved_tabs = moved, "renamed node");
        Ok(new_path)
    }

    /// Overwrites file content directly. Open tabs keep their own buffers.
    pub fn update_file_content(
        &mut self,
        path: &VfsPath,
        content: impl Into<String>,
    ) -> Result<(), WorkspaceError> {
        let content = content.into();
        self.tracked(|state| state.tree.update_file_content(path, content))?;
        Ok(())
    }

    // ── tabs ────────────────────────────────────────────────────────────

    pub fn open_file(&mut self, path: &VfsPath) -> Result<Option<TabId>, WorkspaceError> {
        self.tracked(|state| state.editor.open(&state.tree, path))
    }

    pub fn close_tab(&mut self, id: TabId) -> bool {
        self.tracked(|state| state.editor.close(id))
    }

    pub fn set_active_tab(&mut self, id: TabId) -> bool {
        self.tracked(|state| state.editor.set_active(id))
    }

    pub fn update_tab_content(&mut self, id: TabId, content: impl Into<String>) -> bool {
        let content = content.into();
        self.tracked(|state| state.editor.update_content(id, content))
    }

    pub fn save_tab(&mut self, id: TabId) -> Result<bool, WorkspaceError> {
        let saved = self.tracked(|state| state.editor.save(&mut state.tree, id));
        if let Err(err) = &saved {
            debug!(tab = %id, error = %err, "save failed");
        }
        saved
    }

    /// `Ok(false)` when no tab is active.
    pub fn save_active_tab(&mut self) -> Result<bool, WorkspaceError> {
        match self.state.editor.active_id() {
            Some(id) => self.save_tab(id),
            None => Ok(false),
        }
    }

    pub fn save_all(&mut self) -> Vec<(VfsPath, WorkspaceError)> {
        self.tracked(|state| state.editor.save_all(&mut state.tree))
    }

    pub fn is_tab_modified(&self, id: TabId) -> bool {
        self.state.editor.is_modified(id)
    }

    // ── terminal ────────────────────────────────────────────────────────

    pub fn set_terminal_input(&mut self, text: impl Into<String>) {
        self.state.terminal.set_input(text);
    }

    pub fn terminal_history_prev(&mut self) -> bool {
        self.state.terminal.history_prev()
    }

    pub fn terminal_history_next(&mut self) -> bool {
        self.state.terminal.history_next()
    }

    pub fn prompt(&self) -> String {
        self.state.terminal.prompt(&self.current_user())
    }

    // ── collaborators ───────────────────────────────────────────────────

    pub fn current_user(&self) -> String {
        self.collab
            .identity
            .current_user_id()
            .unwrap_or_else(|| "guest".to_string())
    }

    /// Flag for `path` in the configured group; `None` without a group.
    pub fn file_permission(&self, path: &VfsPath) -> Option<FilePermission> {
        let group = self.collab.group_id.as_deref()?;
        self.collab.permissions.file_permission(group, path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
