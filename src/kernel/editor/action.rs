use crate::models::VfsPath;

use super::TabId;

#[derive(Debug, Clone)]
pub enum EditorAction {
    OpenFile { path: VfsPath },
    CloseTab { id: TabId },
    SetActiveTab { id: TabId },
    UpdateContent { id: TabId, content: String },
    SaveTab { id: TabId },
    SaveActive,
    SaveAll,
}
