//! 数据模型层

pub mod content;
pub mod explorer;
pub mod file_tree;
pub mod path;

pub use content::ContentStore;
pub use explorer::ExplorerState;
pub use file_tree::{Entry, FileTree, NodeId, NodeKind};
pub use path::{Result, VfsError};
