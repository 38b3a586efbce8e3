//! Service adapters: filesystem and in-memory implementations of the ports.

pub mod collab;
pub mod paths;
pub mod persistence;
pub mod settings;

pub use collab::{PermissionTable, StaticIdentity};
pub use paths::{ensure_log_dir, ensure_workspace_dir, get_config_dir, get_log_dir, get_workspace_dir};
pub use persistence::{JsonFilePersistence, MemoryPersistence, MemoryStore};
pub use settings::{ensure_settings_file, get_settings_path, load_config, load_config_from};
