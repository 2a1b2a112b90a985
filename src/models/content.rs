//! 内容存储：规范路径 → 编辑器缓冲区
//!
//! 与树结构解耦，只按路径键值存储 Rope 缓冲区。条目的生命周期由
//! Workspace 在树变更的同一调用栈内维护，因此键集合恒等于树中的
//! 文件集合，不存在悬垂路径。

use ropey::Rope;
use rustc_hash::FxHashMap;

use super::path::{self, Result, VfsError};

#[derive(Default, Debug)]
pub struct ContentStore {
    buffers: FxHashMap<String, Rope>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.buffers.contains_key(canonical)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn get(&self, canonical: &str) -> Result<String> {
        self.buffers
            .get(canonical)
            .map(|rope| rope.to_string())
            .ok_or_else(|| VfsError::NotFound(canonical.to_string()))
    }

    /// 无条件覆盖，不做版本管理
    pub fn set(&mut self, canonical: &str, content: &str) -> Result<()> {
        match self.buffers.get_mut(canonical) {
            Some(rope) => {
                *rope = Rope::from_str(content);
                Ok(())
            }
            None => Err(VfsError::NotFound(canonical.to_string())),
        }
    }

    /// 建立空缓冲区；仅由 Workspace 的 create_file / 模板种子调用
    pub(crate) fn initialize(&mut self, canonical: &str) {
        self.buffers.insert(canonical.to_string(), Rope::new());
    }

    /// 建立带初始内容的缓冲区（模板种子）
    pub(crate) fn insert(&mut self, canonical: &str, content: &str) {
        self.buffers
            .insert(canonical.to_string(), Rope::from_str(content));
    }

    /// 幂等移除；仅由 Workspace 的 delete 级联调用
    pub(crate) fn remove(&mut self, canonical: &str) {
        self.buffers.remove(canonical);
    }

    /// 重命名/移动级联：把 `old_prefix` 及其子树下的键改挂到 `new_prefix`
    pub(crate) fn rekey_prefix(&mut self, old_prefix: &str, new_prefix: &str) {
        let affected: Vec<String> = self
            .buffers
            .keys()
            .filter(|k| *k == old_prefix || path::is_descendant_of(k, old_prefix))
            .cloned()
            .collect();

        for old_key in affected {
            if let Some(rope) = self.buffers.remove(&old_key) {
                let new_key = path::rekey(&old_key, old_prefix, new_prefix);
                self.buffers.insert(new_key, rope);
            }
        }
    }
}
