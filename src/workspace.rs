//! 工作区门面
//!
//! 聚合文件树、内容存储与 Explorer UI 状态，是 UI 层唯一的操作入口。
//! 每个变更操作在同一个同步调用栈内完成全部级联更新（树 → 缓冲区 →
//! UI 状态），校验先于变更，外部观察不到中间状态，也没有部分失败。

use compact_str::CompactString;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::WorkspaceConfig;
use crate::models::{
    path, ContentStore, Entry, ExplorerState, FileTree, NodeId, NodeKind, Result, VfsError,
};
use crate::template::Template;

#[derive(Debug)]
pub struct Workspace {
    tree: FileTree,
    content: ContentStore,
    explorer: ExplorerState,
    config: WorkspaceConfig,
}

/// Explorer 渲染行：按展开状态拍扁后的树快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeRow {
    pub depth: u16,
    pub name: CompactString,
    pub path: String,
    pub is_dir: bool,
    pub is_expanded: bool,
    pub is_selected: bool,
}

impl Workspace {
    pub fn new(config: WorkspaceConfig) -> Self {
        Self {
            tree: FileTree::new(),
            content: ContentStore::new(),
            explorer: ExplorerState::new(),
            config,
        }
    }

    /// 从模板种子工作区；深层路径的中间目录自动补齐
    pub fn from_template(config: WorkspaceConfig, template: &Template) -> Result<Self> {
        let mut ws = Self::new(config);
        for (raw_path, content) in template.files() {
            let p = path::normalize(raw_path)?;
            if path::is_root(&p) {
                return Err(VfsError::InvalidPath(raw_path.to_string()));
            }
            let folder = path::parent_of(&p).to_string();
            ws.ensure_folders(&folder)?;
            ws.tree.create_file(&folder, path::name_of(&p))?;
            ws.content.insert(&p, content);
        }
        info!(files = template.len(), "workspace seeded from template");
        Ok(ws)
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// 自根向下补齐缺失的目录段；某段已被文件占用则报重名
    fn ensure_folders(&mut self, canonical: &str) -> Result<()> {
        let mut current = String::new();
        for seg in path::segments(canonical) {
            let next = path::join(&current, seg)?;
            match self.tree.resolve(&next) {
                Some(id) if self.tree.is_dir(id) => {}
                Some(_) => return Err(VfsError::DuplicateName(seg.to_string())),
                None => {
                    self.tree.create_folder(&current, seg)?;
                }
            }
            current = next;
        }
        Ok(())
    }

    // ==================== 变更操作 ====================

    pub fn create_file(&mut self, target_folder: &str, name: &str) -> Result<String> {
        let folder = path::normalize(target_folder)?;
        self.config.check_name_len(name)?;

        let new_path = self.tree.create_file(&folder, name)?;
        self.content.initialize(&new_path);
        if self.config.auto_expand_parent {
            self.explorer.expand(&folder);
        }
        if self.config.auto_select_created {
            self.explorer.select(&new_path);
        }

        debug!(path = %new_path, "create file");
        Ok(new_path)
    }

    pub fn create_folder(&mut self, target_folder: &str, name: &str) -> Result<String> {
        let folder = path::normalize(target_folder)?;
        self.config.check_name_len(name)?;

        let new_path = self.tree.create_folder(&folder, name)?;
        if self.config.auto_expand_parent {
            self.explorer.expand(&folder);
            self.explorer.expand(&new_path);
        }

        debug!(path = %new_path, "create folder");
        Ok(new_path)
    }

    pub fn delete(&mut self, target: &str) -> Result<()> {
        let p = path::normalize(target)?;
        let removed = self.tree.delete(&p)?;

        for (removed_path, kind) in &removed {
            if *kind == NodeKind::File {
                self.content.remove(removed_path);
            }
        }
        self.explorer.purge_subtree(&p);

        debug!(path = %p, nodes = removed.len(), "delete");
        Ok(())
    }

    pub fn rename(&mut self, target: &str, new_name: &str) -> Result<String> {
        let old_path = path::normalize(target)?;
        self.config.check_name_len(new_name)?;

        let new_path = self.tree.rename(&old_path, new_name)?;
        if new_path != old_path {
            self.content.rekey_prefix(&old_path, &new_path);
            self.explorer.rekey_subtree(&old_path, &new_path);
        }

        debug!(from = %old_path, to = %new_path, "rename");
        Ok(new_path)
    }

    pub fn move_to(&mut self, target: &str, new_parent: &str) -> Result<String> {
        let old_path = path::normalize(target)?;
        let parent = path::normalize(new_parent)?;

        let new_path = self.tree.move_to(&old_path, &parent)?;
        if new_path != old_path {
            self.content.rekey_prefix(&old_path, &new_path);
            self.explorer.rekey_subtree(&old_path, &new_path);
        }

        debug!(from = %old_path, to = %new_path, "move");
        Ok(new_path)
    }

    pub fn write_file(&mut self, target: &str, content: &str) -> Result<()> {
        let p = path::normalize(target)?;
        match self.tree.resolve(&p).and_then(|id| self.tree.kind_of(id)) {
            Some(NodeKind::File) => self.content.set(&p, content),
            _ => Err(VfsError::NotFound(p)),
        }
    }

    // ==================== 查询 ====================

    pub fn resolve(&self, target: &str) -> Option<Entry> {
        let p = path::normalize(target).ok()?;
        self.tree.entry(&p)
    }

    pub fn list(&self, folder: &str) -> Result<Vec<Entry>> {
        let p = path::normalize(folder)?;
        self.tree.list(&p)
    }

    pub fn read_file(&self, target: &str) -> Result<String> {
        let p = path::normalize(target)?;
        match self.tree.resolve(&p).and_then(|id| self.tree.kind_of(id)) {
            Some(NodeKind::File) => self.content.get(&p),
            _ => Err(VfsError::NotFound(p)),
        }
    }

    // ==================== Explorer UI 状态 ====================

    pub fn expand_folder(&mut self, target: &str) -> Result<()> {
        let p = path::normalize(target)?;
        match self.tree.resolve(&p).and_then(|id| self.tree.kind_of(id)) {
            Some(NodeKind::Dir) => {
                self.explorer.expand(&p);
                Ok(())
            }
            _ => Err(VfsError::FolderNotFound(p)),
        }
    }

    pub fn collapse_folder(&mut self, target: &str) {
        if let Ok(p) = path::normalize(target) {
            self.explorer.collapse(&p);
        }
    }

    pub fn select_file(&mut self, target: &str) -> Result<()> {
        let p = path::normalize(target)?;
        match self.tree.resolve(&p).and_then(|id| self.tree.kind_of(id)) {
            Some(NodeKind::File) => {
                self.explorer.select(&p);
                Ok(())
            }
            _ => Err(VfsError::NotFound(p)),
        }
    }

    pub fn is_expanded(&self, target: &str) -> bool {
        path::normalize(target)
            .map(|p| self.explorer.is_expanded(&p))
            .unwrap_or(false)
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.explorer.selected_file()
    }

    /// 将树按展开状态拍扁成渲染行：根不显示，目录优先，组内按名称排序
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        let mut stack: Vec<(NodeId, String, u16)> =
            vec![(self.tree.root(), String::new(), 0)];

        while let Some((id, node_path, depth)) = stack.pop() {
            if !path::is_root(&node_path) {
                rows.push(TreeRow {
                    depth,
                    name: CompactString::from(path::name_of(&node_path)),
                    is_dir: self.tree.is_dir(id),
                    is_expanded: self.explorer.is_expanded(&node_path),
                    is_selected: self.explorer.selected_file() == Some(node_path.as_str()),
                    path: node_path.clone(),
                });
            }

            if !self.explorer.is_expanded(&node_path) {
                continue;
            }
            if let Some(children) = self.tree.children(id) {
                let mut dirs = Vec::new();
                let mut files = Vec::new();
                for (name, &child_id) in children {
                    if self.tree.is_dir(child_id) {
                        dirs.push((name.clone(), child_id));
                    } else {
                        files.push((name.clone(), child_id));
                    }
                }

                let child_depth = if path::is_root(&node_path) { 0 } else { depth + 1 };
                // 逆序入栈：出栈时目录在前、组内名称升序
                for (name, file_id) in files.into_iter().rev() {
                    let child_path = child_path(&node_path, &name);
                    stack.push((file_id, child_path, child_depth));
                }
                for (name, dir_id) in dirs.into_iter().rev() {
                    let child_path = child_path(&node_path, &name);
                    stack.push((dir_id, child_path, child_depth));
                }
            }
        }

        rows
    }
}

fn child_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", base, path::SEPARATOR, name)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(WorkspaceConfig::default())
    }
}

#[cfg(test)]
#[path = "../tests/unit/workspace.rs"]
mod tests;
