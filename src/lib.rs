//! auris - in-memory workspace core for a browser IDE shell
//!
//! Module layout:
//! - models: data models (VfsPath, FileTree, LanguageId)
//! - kernel: headless core (editor tabs, terminal interpreter, Store, effects, service ports)
//! - app: application layer (Workspace = Store + persistence adapter)

pub mod app;
pub mod kernel;
pub mod models;
