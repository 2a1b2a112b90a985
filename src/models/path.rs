//! 虚拟路径算法
//!
//! 工作区内的路径是以 `/` 分隔的 UTF-8 字符串，根目录为空串 `""`。
//! 所有来自 UI 层的路径在进入树结构之前都先经过这里的规范化与校验。

use std::fmt;

pub const SEPARATOR: char = '/';

pub type Result<T> = std::result::Result<T, VfsError>;

/// 虚拟文件系统操作错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VfsError {
    InvalidPath(String),
    InvalidName(String),
    DuplicateName(String),
    FolderNotFound(String),
    NotFound(String),
    MoveIntoDescendant(String),
}

impl fmt::Display for VfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VfsError::InvalidPath(p) => write!(f, "invalid path: {:?}", p),
            VfsError::InvalidName(n) => write!(f, "invalid name: {:?}", n),
            VfsError::DuplicateName(n) => {
                write!(f, "name already exists in parent: {:?}", n)
            }
            VfsError::FolderNotFound(p) => write!(f, "folder not found: {:?}", p),
            VfsError::NotFound(p) => write!(f, "not found: {:?}", p),
            VfsError::MoveIntoDescendant(p) => {
                write!(f, "cannot move node into its own subtree: {:?}", p)
            }
        }
    }
}

impl std::error::Error for VfsError {}

pub fn is_root(path: &str) -> bool {
    path.is_empty()
}

/// 规范化路径：折叠多余分隔符、去掉首尾分隔符
///
/// 不做遍历解析：出现 `.` 或 `..` 段直接拒绝
pub fn normalize(path: &str) -> Result<String> {
    let mut out = String::with_capacity(path.len());
    for seg in path.split(SEPARATOR) {
        if seg.is_empty() {
            continue;
        }
        if seg == "." || seg == ".." {
            return Err(VfsError::InvalidPath(path.to_string()));
        }
        if !out.is_empty() {
            out.push(SEPARATOR);
        }
        out.push_str(seg);
    }
    Ok(out)
}

/// 名称校验的唯一事实来源，UI 层不得重复实现
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(VfsError::InvalidName(name.to_string()));
    }
    if name.contains(SEPARATOR) || name.contains('\\') || name.contains('\0') {
        return Err(VfsError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// 拼接父路径与名称；父路径为根时直接返回名称
pub fn join(parent: &str, name: &str) -> Result<String> {
    validate_name(name)?;
    if parent.is_empty() {
        Ok(name.to_string())
    } else {
        let mut out = String::with_capacity(parent.len() + 1 + name.len());
        out.push_str(parent);
        out.push(SEPARATOR);
        out.push_str(name);
        Ok(out)
    }
}

/// 去掉最后一段；根层级的路径返回根
pub fn parent_of(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(i) => &path[..i],
        None => "",
    }
}

/// 最后一段（显示名）
pub fn name_of(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty())
}

/// `path` 是否位于 `ancestor` 子树内（不含 `ancestor` 自身）
pub fn is_descendant_of(path: &str, ancestor: &str) -> bool {
    if ancestor.is_empty() {
        return !path.is_empty();
    }
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == SEPARATOR as u8
}

/// 把 `old_prefix` 子树内的路径改挂到 `new_prefix` 下
///
/// 调用方保证 `path` 等于 `old_prefix` 或位于其子树内
pub fn rekey(path: &str, old_prefix: &str, new_prefix: &str) -> String {
    let mut out = String::with_capacity(new_prefix.len() + path.len() - old_prefix.len());
    out.push_str(new_prefix);
    out.push_str(&path[old_prefix.len()..]);
    out
}
