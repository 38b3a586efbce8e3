use std::fmt;

use crate::models::{ErrorKind, FileTreeError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    Tree(FileTreeError),
    TooManyTabs { limit: usize },
}

impl WorkspaceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkspaceError::Tree(err) => err.kind(),
            WorkspaceError::TooManyTabs { .. } => ErrorKind::InvalidOperation,
        }
    }
}

impl fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceError::Tree(err) => err.fmt(f),
            WorkspaceError::TooManyTabs { limit } => {
                write!(f, "too many open tabs (limit {limit})")
            }
        }
    }
}

impl std::error::Error for WorkspaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkspaceError::Tree(err) => Some(err),
            WorkspaceError::TooManyTabs { .. } => None,
        }
    }
}

impl From<FileTreeError> for WorkspaceError {
    fn from(err: FileTreeError) -> Self {
        WorkspaceError::Tree(err)
    }
}
