//! zpad - 浏览器端代码编辑器的虚拟工作区核心
//!
//! 模块结构：
//! - models: 数据模型（路径算法、FileTree、ContentStore、ExplorerState）
//! - workspace: 工作区门面（聚合三个存储，保证级联更新原子可见）
//! - template: 项目模板（内置 React 启动模板）
//! - config: 工作区配置

pub mod config;
pub mod models;
pub mod template;
pub mod workspace;

pub use config::WorkspaceConfig;
pub use models::{Entry, NodeKind, Result, VfsError};
pub use template::Template;
pub use workspace::{TreeRow, Workspace};
