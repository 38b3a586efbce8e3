//! 数据模型层

pub mod file_tree;
pub mod language;
pub mod path;

pub use file_tree::{
    ErrorKind, FileTree, FileTreeError, FileTreeRow, Node, NodeData, NodeId, NodeKind, MAX_DEPTH,
};
pub use language::LanguageId;
pub use path::{resolve, VfsPath, SEPARATOR};
