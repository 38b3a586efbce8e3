use rustc_hash::FxHashMap;

use crate::kernel::services::ports::{
    FilePermission, IdentityProvider, PermissionSource, WorkspaceConfig,
};
use crate::models::VfsPath;

/// Identity fixed at startup (from settings or the command line).
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user: Option<String>,
}

impl StaticIdentity {
    pub fn new(user: Option<String>) -> Self {
        Self {
            user: user.filter(|u| !u.trim().is_empty()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user_id(&self) -> Option<String> {
        self.user.clone()
    }
}

/// Permission flags keyed by group and canonical path. Flags apply to the
/// exact path only.
#[derive(Debug, Clone, Default)]
pub struct PermissionTable {
    entries: FxHashMap<(String, VfsPath), FilePermission>,
}

impl PermissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The flags listed in settings, all filed under the configured group.
    /// Without a group nothing is loaded.
    pub fn from_settings(config: &WorkspaceConfig) -> Self {
        let mut table = Self::new();
        if let Some(group_id) = &config.group_id {
            for (path, permission) in &config.permissions {
                table.set(group_id, VfsPath::parse(path), *permission);
            }
        }
        table
    }

    pub fn set(&mut self, group_id: &str, path: VfsPath, permission: FilePermission) {
        self.entries
            .insert((group_id.to_string(), path), permission);
    }

    pub fn unset(&mut self, group_id: &str, path: &VfsPath) -> bool {
        self.entries
            .remove(&(group_id.to_string(), path.clone()))
            .is_some()
    }
}

impl PermissionSource for PermissionTable {
    fn file_permission(&self, group_id: &str, path: &VfsPath) -> Option<FilePermission> {
        self.entries
            .get(&(group_id.to_string(), path.clone()))
            .copied()
    }
}
