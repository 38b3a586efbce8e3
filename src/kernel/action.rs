use crate::kernel::editor::EditorAction;
use crate::models::VfsPath;

/// Every state change the workspace accepts. Paths are already canonical;
/// resolving user input against a cwd happens before an action is built.
#[derive(Debug, Clone)]
pub enum Action {
    CreateFile {
        parent: VfsPath,
        name: String,
        content: String,
    },
    CreateFolder {
        parent: VfsPath,
        name: String,
    },
    DeleteNode {
        path: VfsPath,
    },
    RenameNode {
        path: VfsPath,
        new_name: String,
    },
    UpdateFileContent {
        path: VfsPath,
        content: String,
    },
    Editor(EditorAction),
    TerminalSubmit {
        line: String,
    },
    TerminalSetInput {
        text: String,
    },
    TerminalHistoryPrev,
    TerminalHistoryNext,
}
