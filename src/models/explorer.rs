//! Explorer UI 状态
//!
//! 只保存展开目录集合与选中文件路径。路径有效性由 Workspace 对照
//! 树结构校验后再进入这里，删除/重命名级联在同一调用栈内完成，
//! 外部观察不到指向已删节点的状态。

use rustc_hash::FxHashSet;

use super::path;

#[derive(Default, Debug)]
pub struct ExplorerState {
    expanded: FxHashSet<String>,
    selected: Option<String>,
}

impl ExplorerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 根目录恒视为展开，不进集合
    pub fn is_expanded(&self, canonical: &str) -> bool {
        path::is_root(canonical) || self.expanded.contains(canonical)
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// 幂等；展开已展开目录是无操作
    pub(crate) fn expand(&mut self, canonical: &str) {
        if !path::is_root(canonical) {
            self.expanded.insert(canonical.to_string());
        }
    }

    /// 幂等；折叠未展开目录是无操作
    pub(crate) fn collapse(&mut self, canonical: &str) {
        self.expanded.remove(canonical);
    }

    /// 替换（而非叠加）当前选中
    pub(crate) fn select(&mut self, canonical: &str) {
        self.selected = Some(canonical.to_string());
    }

    /// 删除级联：清掉子树内的展开项，选中若指向子树则清空
    pub(crate) fn purge_subtree(&mut self, root: &str) {
        self.expanded
            .retain(|p| p != root && !path::is_descendant_of(p, root));

        if let Some(selected) = &self.selected {
            if selected == root || path::is_descendant_of(selected, root) {
                self.selected = None;
            }
        }
    }

    /// 重命名/移动级联：子树内的展开项与选中路径整体改挂前缀
    pub(crate) fn rekey_subtree(&mut self, old_prefix: &str, new_prefix: &str) {
        let affected: Vec<String> = self
            .expanded
            .iter()
            .filter(|p| *p == old_prefix || path::is_descendant_of(p, old_prefix))
            .cloned()
            .collect();
        for old in affected {
            self.expanded.remove(&old);
            self.expanded.insert(path::rekey(&old, old_prefix, new_prefix));
        }

        if let Some(selected) = &self.selected {
            if selected == old_prefix || path::is_descendant_of(selected, old_prefix) {
                self.selected = Some(path::rekey(selected, old_prefix, new_prefix));
            }
        }
    }
}
