use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::FilePermission;

pub const DEFAULT_MAX_TABS: usize = 20;
pub const DEFAULT_MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Workspace limits and toggles, read from `settings.json`. Every field is
/// optional in the file; `null` for a limit disables it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub max_tabs: Option<usize>,
    pub max_file_size: Option<usize>,
    pub scrollback_limit: usize,
    pub history_limit: usize,
    pub persist: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Flags for `group_id`, keyed by absolute path.
    #[serde(skip_serializing_if = "FxHashMap::is_empty")]
    pub permissions: FxHashMap<String, FilePermission>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            max_tabs: Some(DEFAULT_MAX_TABS),
            max_file_size: Some(DEFAULT_MAX_FILE_SIZE),
            scrollback_limit: 1000,
            history_limit: 500,
            persist: true,
            user: None,
            group_id: None,
            permissions: FxHashMap::default(),
        }
    }
}

impl WorkspaceConfig {
    pub fn unlimited() -> Self {
        Self {
            max_tabs: None,
            max_file_size: None,
            ..Self::default()
        }
    }
}
