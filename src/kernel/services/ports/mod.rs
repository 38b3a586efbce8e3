//! Service ports: traits + data contracts.

pub mod collab;
pub mod config;
pub mod persistence;

pub use collab::{FilePermission, IdentityProvider, PermissionSource};
pub use config::WorkspaceConfig;
pub use persistence::{NodeSnapshot, TabSnapshot, WorkspacePersistence, WorkspaceSnapshot};
