//! 文件树数据模型
//!
//! 命名空间形状的唯一事实来源：节点存放在 slotmap 池中，目录用
//! 有序 name → id 映射持有子节点。完整路径不冗余存储，始终按
//! 父指针推导。本模块的路径参数假定已由 [`path::normalize`]
//! 规范化（Workspace 负责入口处的规范化）。

use compact_str::CompactString;
use serde::Serialize;
use slotmap::{new_key_type, SlotMap};
use std::collections::BTreeMap;

use super::path::{self, Result, VfsError};

new_key_type! { pub struct NodeId; }

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Dir,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    name: CompactString,
    parent: Option<NodeId>,
    children: Option<BTreeMap<CompactString, NodeId>>,
}

impl Node {
    fn new_file(name: CompactString, parent: NodeId) -> Self {
        Self {
            kind: NodeKind::File,
            name,
            parent: Some(parent),
            children: None,
        }
    }

    fn new_dir(name: CompactString, parent: Option<NodeId>) -> Self {
        Self {
            kind: NodeKind::Dir,
            name,
            parent,
            children: Some(BTreeMap::new()),
        }
    }
}

/// 目录项快照，`list` / `resolve` 返回给 UI 层
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub name: CompactString,
    pub kind: NodeKind,
    pub path: String,
}

#[derive(Debug)]
pub struct FileTree {
    arena: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl FileTree {
    /// 创建只有根目录的空树；根目录没有自己的名称段
    pub fn new() -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Node::new_dir(CompactString::default(), None));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// 按规范路径精确查找；根路径 `""` 返回根节点
    pub fn resolve(&self, canonical: &str) -> Option<NodeId> {
        let mut current = self.root;
        for seg in path::segments(canonical) {
            let children = self.arena.get(current)?.children.as_ref()?;
            current = *children.get(seg)?;
        }
        Some(current)
    }

    /// `resolve` 的快照版本：返回节点视图而不是内部 id
    pub fn entry(&self, canonical: &str) -> Option<Entry> {
        let id = self.resolve(canonical)?;
        let node = self.arena.get(id)?;
        Some(Entry {
            name: node.name.clone(),
            kind: node.kind,
            path: canonical.to_string(),
        })
    }

    pub fn is_dir(&self, id: NodeId) -> bool {
        self.arena
            .get(id)
            .map(|n| n.kind == NodeKind::Dir)
            .unwrap_or(false)
    }

    pub fn kind_of(&self, id: NodeId) -> Option<NodeKind> {
        self.arena.get(id).map(|n| n.kind)
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id).map(|n| n.name.as_str())
    }

    /// 推导节点完整路径（根为 `""`）
    pub fn path_of(&self, id: NodeId) -> String {
        let mut components = vec![];
        let mut current = id;

        while let Some(node) = self.arena.get(current) {
            if let Some(parent) = node.parent {
                components.push(node.name.as_str());
                current = parent;
            } else {
                break;
            }
        }

        let mut out = String::new();
        for comp in components.iter().rev() {
            if !out.is_empty() {
                out.push(path::SEPARATOR);
            }
            out.push_str(comp);
        }
        out
    }

    pub fn children(
        &self,
        id: NodeId,
    ) -> Option<impl Iterator<Item = (&CompactString, &NodeId)>> {
        self.arena
            .get(id)
            .and_then(|n| n.children.as_ref())
            .map(|c| c.iter())
    }

    pub fn create_file(&mut self, folder: &str, name: &str) -> Result<String> {
        self.create_child(folder, name, NodeKind::File)
    }

    pub fn create_folder(&mut self, folder: &str, name: &str) -> Result<String> {
        self.create_child(folder, name, NodeKind::Dir)
    }

    fn create_child(&mut self, folder: &str, name: &str, kind: NodeKind) -> Result<String> {
        let parent = self
            .resolve(folder)
            .filter(|id| self.is_dir(*id))
            .ok_or_else(|| VfsError::FolderNotFound(folder.to_string()))?;

        // join 同时完成名称校验
        let new_path = path::join(folder, name)?;

        // 只读预检：重名冲突在任何变更之前拒绝
        {
            let parent_ro = self
                .arena
                .get(parent)
                .ok_or_else(|| VfsError::FolderNotFound(folder.to_string()))?;
            let children_ro = parent_ro
                .children
                .as_ref()
                .ok_or_else(|| VfsError::FolderNotFound(folder.to_string()))?;
            if children_ro.contains_key(name) {
                return Err(VfsError::DuplicateName(name.to_string()));
            }
        }

        let cname = CompactString::from(name);
        let node = match kind {
            NodeKind::File => Node::new_file(cname.clone(), parent),
            NodeKind::Dir => Node::new_dir(cname.clone(), Some(parent)),
        };
        let id = self.arena.insert(node);

        if let Some(children) = self.arena.get_mut(parent).and_then(|n| n.children.as_mut()) {
            children.insert(cname, id);
        }

        Ok(new_path)
    }

    /// 删除节点及整个子树，返回被移除的 (路径, 类型) 列表供级联清理
    pub fn delete(&mut self, canonical: &str) -> Result<Vec<(String, NodeKind)>> {
        if path::is_root(canonical) {
            return Err(VfsError::InvalidPath(canonical.to_string()));
        }
        let id = self
            .resolve(canonical)
            .ok_or_else(|| VfsError::NotFound(canonical.to_string()))?;

        let mut removed = Vec::new();
        self.collect_subtree(id, canonical.to_string(), &mut removed);

        // 从父节点断开
        let (parent, name) = {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| VfsError::NotFound(canonical.to_string()))?;
            (node.parent, node.name.clone())
        };
        if let Some(parent_id) = parent {
            if let Some(children) = self
                .arena
                .get_mut(parent_id)
                .and_then(|n| n.children.as_mut())
            {
                children.remove(&name);
            }
        }

        for (removed_id, _, _) in &removed {
            self.arena.remove(*removed_id);
        }

        Ok(removed.into_iter().map(|(_, p, kind)| (p, kind)).collect())
    }

    fn collect_subtree(
        &self,
        id: NodeId,
        node_path: String,
        out: &mut Vec<(NodeId, String, NodeKind)>,
    ) {
        if let Some(node) = self.arena.get(id) {
            if let Some(children) = &node.children {
                for (name, &child_id) in children.iter() {
                    let child_path = if node_path.is_empty() {
                        name.to_string()
                    } else {
                        format!("{}{}{}", node_path, path::SEPARATOR, name)
                    };
                    self.collect_subtree(child_id, child_path, out);
                }
            }
            out.push((id, node_path, node.kind));
        }
    }

    /// 重命名；重命名为当前名称是无操作
    pub fn rename(&mut self, canonical: &str, new_name: &str) -> Result<String> {
        if path::is_root(canonical) {
            return Err(VfsError::InvalidPath(canonical.to_string()));
        }
        let id = self
            .resolve(canonical)
            .ok_or_else(|| VfsError::NotFound(canonical.to_string()))?;

        let new_path = path::join(path::parent_of(canonical), new_name)?;

        let (parent, old_name) = {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| VfsError::NotFound(canonical.to_string()))?;
            (node.parent, node.name.clone())
        };

        if old_name == new_name {
            return Ok(new_path);
        }

        if let Some(parent_id) = parent {
            let children = self
                .arena
                .get_mut(parent_id)
                .and_then(|n| n.children.as_mut())
                .ok_or_else(|| VfsError::NotFound(canonical.to_string()))?;

            if children.contains_key(new_name) {
                return Err(VfsError::DuplicateName(new_name.to_string()));
            }
            children.remove(&old_name);
            children.insert(CompactString::from(new_name), id);
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.name = CompactString::from(new_name);
        }

        Ok(new_path)
    }

    /// 移动子树到新的父目录；移动到当前父目录是无操作
    pub fn move_to(&mut self, canonical: &str, new_parent: &str) -> Result<String> {
        if path::is_root(canonical) {
            return Err(VfsError::InvalidPath(canonical.to_string()));
        }
        let id = self
            .resolve(canonical)
            .ok_or_else(|| VfsError::NotFound(canonical.to_string()))?;
        let parent_id = self
            .resolve(new_parent)
            .filter(|p| self.is_dir(*p))
            .ok_or_else(|| VfsError::FolderNotFound(new_parent.to_string()))?;

        if new_parent == canonical || path::is_descendant_of(new_parent, canonical) {
            return Err(VfsError::MoveIntoDescendant(canonical.to_string()));
        }

        let name = path::name_of(canonical);
        let new_path = path::join(new_parent, name)?;
        if new_path == canonical {
            return Ok(new_path);
        }

        {
            let children = self
                .arena
                .get(parent_id)
                .and_then(|n| n.children.as_ref())
                .ok_or_else(|| VfsError::FolderNotFound(new_parent.to_string()))?;
            if children.contains_key(name) {
                return Err(VfsError::DuplicateName(name.to_string()));
            }
        }

        let (old_parent, cname) = {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| VfsError::NotFound(canonical.to_string()))?;
            (node.parent, node.name.clone())
        };
        if let Some(old_parent_id) = old_parent {
            if let Some(children) = self
                .arena
                .get_mut(old_parent_id)
                .and_then(|n| n.children.as_mut())
            {
                children.remove(&cname);
            }
        }

        if let Some(children) = self
            .arena
            .get_mut(parent_id)
            .and_then(|n| n.children.as_mut())
        {
            children.insert(cname, id);
        }
        if let Some(node) = self.arena.get_mut(id) {
            node.parent = Some(parent_id);
        }

        Ok(new_path)
    }

    /// 目录的直接子项，显示顺序在读取时重算：目录在前，组内按名称排序
    pub fn list(&self, folder: &str) -> Result<Vec<Entry>> {
        let id = self
            .resolve(folder)
            .filter(|id| self.is_dir(*id))
            .ok_or_else(|| VfsError::FolderNotFound(folder.to_string()))?;

        let mut dirs = Vec::new();
        let mut files = Vec::new();

        if let Some(children) = self.children(id) {
            for (name, &child_id) in children {
                if let Some(kind) = self.kind_of(child_id) {
                    let entry = Entry {
                        name: name.clone(),
                        kind,
                        path: path::join(folder, name.as_str())?,
                    };
                    if kind == NodeKind::Dir {
                        dirs.push(entry);
                    } else {
                        files.push(entry);
                    }
                }
            }
        }

        dirs.extend(files);
        Ok(dirs)
    }
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}
