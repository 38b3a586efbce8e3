//! 工作区：Store + 持久化适配器
//!
//! Owns the store and runs the persistence effects it emits. Writes are fire
//! and forget: a failed write is logged and the live session carries on.

use crate::kernel::seed::default_tree;
use crate::kernel::services::ports::{WorkspaceConfig, WorkspacePersistence, WorkspaceSnapshot};
use crate::kernel::snapshot::{editor_from_snapshot, tabs_to_snapshot, tree_from_snapshot, tree_to_snapshot};
use crate::kernel::{
    Action, AppState, Collaborators, DispatchResult, EditorState, Effect, Store, TabId,
    TerminalEntry,
};

pub struct Workspace {
    store: Store,
    persistence: Box<dyn WorkspacePersistence>,
    persist: bool,
}

impl Workspace {
    /// Restores the last session from `persistence`, or seeds the starter
    /// project when there is none.
    pub fn load(
        config: WorkspaceConfig,
        mut persistence: Box<dyn WorkspacePersistence>,
        collab: Collaborators,
    ) -> Self {
        let mut persist = config.persist;
        let (state, needs_write) = match persistence.load() {
            Ok(Some(snapshot)) => restore(snapshot, config),
            Ok(None) => {
                tracing::info!("no saved workspace, seeding starter project");
                (seeded(config), true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load workspace, seeding starter project");
                // The unreadable data must survive this session's writes.
                persist = persist && set_aside(persistence.as_mut());
                (seeded(config), persist)
            }
        };

        let mut workspace = Self {
            store: Store::with_collaborators(state, collab),
            persistence,
            persist,
        };
        if needs_write {
            workspace.run_effects(&[
                Effect::PersistTree,
                Effect::PersistTabs,
                Effect::PersistActiveTab,
            ]);
        }
        workspace
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let result = self.store.dispatch(action);
        self.run_effects(&result.effects);
        result
    }

    pub fn execute_command(&mut self, line: &str) -> Vec<TerminalEntry> {
        self.with_store(|store| store.execute_command(line))
    }

    /// Runs typed store operations, then persists whatever they changed.
    pub fn with_store<T>(&mut self, op: impl FnOnce(&mut Store) -> T) -> T {
        let out = op(&mut self.store);
        let effects = self.store.take_effects();
        self.run_effects(&effects);
        out
    }

    pub fn snapshot(&self) -> WorkspaceSnapshot {
        let state = self.store.state();
        WorkspaceSnapshot {
            tree: tree_to_snapshot(&state.tree),
            tabs: tabs_to_snapshot(&state.editor),
            active_tab: state.editor.active_id(),
        }
    }

    fn run_effects(&mut self, effects: &[Effect]) {
        if !self.persist {
            return;
        }
        for effect in effects {
            let state = self.store.state();
            let result = match effect {
                Effect::PersistTree => self.persistence.persist_tree(&tree_to_snapshot(&state.tree)),
                Effect::PersistTabs => self
                    .persistence
                    .persist_tabs(&tabs_to_snapshot(&state.editor)),
                Effect::PersistActiveTab => {
                    self.persistence.persist_active_tab(state.editor.active_id())
                }
            };
            if let Err(e) = result {
                tracing::warn!(?effect, error = %e, "persistence write failed");
            }
        }
    }
}

fn set_aside(persistence: &mut dyn WorkspacePersistence) -> bool {
    match persistence.set_aside_unreadable() {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "cannot set aside unreadable workspace, persistence disabled");
            false
        }
    }
}

fn seeded(config: WorkspaceConfig) -> AppState {
    let (tree, _) = tree_from_snapshot(&default_tree());
    let editor = EditorState::new(config.max_tabs);
    AppState::with_parts(tree, editor, config)
}

/// Rebuilds state from a snapshot. The flag asks for a rewrite when repair
/// dropped anything, so the store stops carrying the bad data.
fn restore(snapshot: WorkspaceSnapshot, config: WorkspaceConfig) -> (AppState, bool) {
    let stored_ids: Vec<TabId> = snapshot.tabs.iter().map(|t| t.id).collect();
    let wanted_active = snapshot.active_tab;

    let (tree, dropped_nodes) = tree_from_snapshot(&snapshot.tree);
    let editor = editor_from_snapshot(snapshot.tabs, snapshot.active_tab, &tree, config.max_tabs);
    let repaired = dropped_nodes > 0
        || editor.tabs().iter().map(|t| t.id).ne(stored_ids.iter().copied())
        || editor.active_id() != wanted_active;

    tracing::info!(
        nodes = tree.node_count(),
        tabs = editor.tabs().len(),
        repaired,
        "workspace restored"
    );
    (AppState::with_parts(tree, editor, config), repaired)
}

#[cfg(test)]
#[path = "../../tests/unit/app/workspace.rs"]
mod tests;
