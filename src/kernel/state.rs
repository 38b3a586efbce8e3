use crate::kernel::services::ports::WorkspaceConfig;
use crate::models::FileTree;

use super::editor::EditorState;
use super::terminal::TerminalSession;

/// Everything one workspace session owns.
#[derive(Debug)]
pub struct AppState {
    pub tree: FileTree,
    pub editor: EditorState,
    pub terminal: TerminalSession,
    pub config: WorkspaceConfig,
}

impl AppState {
    pub fn new(config: WorkspaceConfig) -> Self {
        Self::with_parts(FileTree::new(), EditorState::new(config.max_tabs), config)
    }

    /// Applies the configured limits to `tree` and starts a fresh terminal.
    pub fn with_parts(mut tree: FileTree, editor: EditorState, config: WorkspaceConfig) -> Self {
        tree.set_max_file_size(config.max_file_size);
        let terminal = TerminalSession::new(config.scrollback_limit, config.history_limit);
        Self {
            tree,
            editor,
            terminal,
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(WorkspaceConfig::default())
    }
}
