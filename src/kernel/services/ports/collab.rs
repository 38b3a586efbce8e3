//! Read-only views onto the identity and collaboration services.
//!
//! The workspace never enforces permissions; it only reports them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::VfsPath;

pub trait IdentityProvider {
    fn current_user_id(&self) -> Option<String>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilePermission {
    Visible,
    Locked,
}

impl FilePermission {
    pub fn as_str(self) -> &'static str {
        match self {
            FilePermission::Visible => "visible",
            FilePermission::Locked => "locked",
        }
    }
}

impl fmt::Display for FilePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait PermissionSource {
    /// `None` means no flag was ever set for this path.
    fn file_permission(&self, group_id: &str, path: &VfsPath) -> Option<FilePermission>;
}
