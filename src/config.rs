//! 工作区配置
//!
//! 宿主（浏览器壳层）以 JSON 下发，缺省字段取默认值

use serde::{Deserialize, Serialize};

use crate::models::{Result, VfsError};

pub const DEFAULT_MAX_NAME_LEN: usize = 255;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// 创建文件/目录后自动展开其父目录
    pub auto_expand_parent: bool,
    /// 创建文件后自动选中
    pub auto_select_created: bool,
    /// 名称长度上限（字符数）
    pub max_name_len: usize,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            auto_expand_parent: true,
            auto_select_created: true,
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

impl WorkspaceConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// 长度校验是配置层的补充；结构校验见 [`crate::models::path::validate_name`]
    pub fn check_name_len(&self, name: &str) -> Result<()> {
        if name.chars().count() > self.max_name_len {
            return Err(VfsError::InvalidName(name.to_string()));
        }
        Ok(())
    }
}
