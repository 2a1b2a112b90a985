use super::*;

fn ws() -> Workspace {
    Workspace::new(WorkspaceConfig::default())
}

#[test]
fn test_create_file_initializes_buffer() {
    let mut ws = ws();
    let path = ws.create_file("", "a.ts").unwrap();
    assert_eq!(path, "a.ts");
    assert_eq!(ws.read_file("a.ts").unwrap(), "");
}

#[test]
fn test_create_file_auto_selects_and_expands() {
    let mut ws = ws();
    ws.create_folder("", "src").unwrap();
    ws.collapse_folder("src");

    let path = ws.create_file("src", "index.ts").unwrap();
    assert_eq!(ws.selected_file(), Some(path.as_str()));
    assert!(ws.is_expanded("src"));
}

#[test]
fn test_create_gates_disabled() {
    let config = WorkspaceConfig {
        auto_expand_parent: false,
        auto_select_created: false,
        ..Default::default()
    };
    let mut ws = Workspace::new(config);
    ws.create_folder("", "src").unwrap();
    ws.create_file("src", "index.ts").unwrap();

    assert!(!ws.is_expanded("src"));
    assert_eq!(ws.selected_file(), None);
}

#[test]
fn test_create_folder_expands_itself() {
    let mut ws = ws();
    ws.create_folder("", "src").unwrap();
    assert!(ws.is_expanded("src"));
}

#[test]
fn test_duplicate_leaves_workspace_unchanged() {
    let mut ws = ws();
    ws.create_file("", "a.ts").unwrap();
    ws.write_file("a.ts", "content").unwrap();

    let err = ws.create_file("", "a.ts").unwrap_err();
    assert!(matches!(err, VfsError::DuplicateName(_)));
    assert_eq!(ws.list("").unwrap().len(), 1);
    assert_eq!(ws.read_file("a.ts").unwrap(), "content");
}

#[test]
fn test_name_len_limit() {
    let config = WorkspaceConfig {
        max_name_len: 3,
        ..Default::default()
    };
    let mut ws = Workspace::new(config);
    assert!(matches!(
        ws.create_file("", "long-name.ts"),
        Err(VfsError::InvalidName(_))
    ));
}

#[test]
fn test_delete_cascades_content_and_ui() {
    let mut ws = ws();
    ws.create_folder("", "lib").unwrap();
    ws.create_folder("lib", "sub").unwrap();
    ws.create_file("lib/sub", "y.ts").unwrap();
    ws.expand_folder("lib/sub").unwrap();
    ws.select_file("lib/sub/y.ts").unwrap();

    ws.delete("lib").unwrap();

    assert!(ws.resolve("lib/sub/y.ts").is_none());
    assert!(matches!(ws.read_file("lib/sub/y.ts"), Err(VfsError::NotFound(_))));
    assert!(!ws.is_expanded("lib"));
    assert!(!ws.is_expanded("lib/sub"));
    assert_eq!(ws.selected_file(), None);
}

#[test]
fn test_delete_missing() {
    let mut ws = ws();
    assert!(matches!(ws.delete("nope"), Err(VfsError::NotFound(_))));
}

#[test]
fn test_rename_is_atomic() {
    let mut ws = ws();
    ws.create_file("", "README.md").unwrap();
    ws.write_file("README.md", "hello").unwrap();
    ws.select_file("README.md").unwrap();

    let new_path = ws.rename("README.md", "README2.md").unwrap();
    assert_eq!(new_path, "README2.md");
    assert!(ws.resolve("README.md").is_none());
    assert_eq!(ws.read_file("README2.md").unwrap(), "hello");
    assert_eq!(ws.selected_file(), Some("README2.md"));
}

#[test]
fn test_rename_folder_rekeys_subtree() {
    let mut ws = ws();
    ws.create_folder("", "lib").unwrap();
    ws.create_folder("lib", "sub").unwrap();
    ws.create_file("lib/sub", "y.ts").unwrap();
    ws.write_file("lib/sub/y.ts", "y").unwrap();
    ws.expand_folder("lib/sub").unwrap();

    ws.rename("lib", "pkg").unwrap();

    assert_eq!(ws.read_file("pkg/sub/y.ts").unwrap(), "y");
    assert!(ws.is_expanded("pkg/sub"));
    assert_eq!(ws.selected_file(), Some("pkg/sub/y.ts"));
}

#[test]
fn test_move_rekeys_content_and_selection() {
    let mut ws = ws();
    ws.create_folder("", "src").unwrap();
    ws.create_folder("", "lib").unwrap();
    ws.create_file("lib", "x.ts").unwrap();
    ws.write_file("lib/x.ts", "x").unwrap();

    let new_path = ws.move_to("lib/x.ts", "src").unwrap();
    assert_eq!(new_path, "src/x.ts");
    assert_eq!(ws.read_file("src/x.ts").unwrap(), "x");
    assert_eq!(ws.selected_file(), Some("src/x.ts"));
    assert!(ws.resolve("lib/x.ts").is_none());
}

#[test]
fn test_expand_requires_folder() {
    let mut ws = ws();
    ws.create_file("", "a.ts").unwrap();
    assert!(matches!(
        ws.expand_folder("a.ts"),
        Err(VfsError::FolderNotFound(_))
    ));
    assert!(matches!(
        ws.expand_folder("nope"),
        Err(VfsError::FolderNotFound(_))
    ));
}

#[test]
fn test_expand_collapse_idempotent() {
    let mut ws = ws();
    ws.create_folder("", "src").unwrap();

    ws.expand_folder("src").unwrap();
    ws.expand_folder("src").unwrap();
    assert!(ws.is_expanded("src"));

    ws.collapse_folder("src");
    ws.collapse_folder("src");
    assert!(!ws.is_expanded("src"));
}

#[test]
fn test_select_requires_file() {
    let mut ws = ws();
    ws.create_folder("", "src").unwrap();
    assert!(matches!(
        ws.select_file("src"),
        Err(VfsError::NotFound(_))
    ));
}

#[test]
fn test_write_file_rejects_folder() {
    let mut ws = ws();
    ws.create_folder("", "src").unwrap();
    assert!(matches!(
        ws.write_file("src", "x"),
        Err(VfsError::NotFound(_))
    ));
}

#[test]
fn test_visible_rows_respects_expansion() {
    let config = WorkspaceConfig {
        auto_expand_parent: false,
        auto_select_created: false,
        ..Default::default()
    };
    let mut ws = Workspace::new(config);
    ws.create_file("", "zz.ts").unwrap();
    ws.create_folder("", "src").unwrap();
    ws.create_file("src", "index.ts").unwrap();

    // 未展开：只有根层级，目录在前
    let rows = ws.visible_rows();
    let paths: Vec<_> = rows.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["src", "zz.ts"]);
    assert_eq!(rows[0].depth, 0);

    ws.expand_folder("src").unwrap();
    let rows = ws.visible_rows();
    let paths: Vec<_> = rows.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["src", "src/index.ts", "zz.ts"]);
    assert_eq!(rows[1].depth, 1);
    assert!(rows[0].is_expanded);
}

#[test]
fn test_visible_rows_marks_selection() {
    let mut ws = ws();
    ws.create_file("", "a.ts").unwrap();

    let rows = ws.visible_rows();
    let row = rows.iter().find(|r| r.path == "a.ts").unwrap();
    assert!(row.is_selected);
    assert!(!row.is_dir);
}

#[test]
fn test_from_template_nested_paths() {
    let template = Template::new()
        .with_file("src/components/ui/button.tsx", "export {}")
        .with_file("src/main.tsx", "main");
    let ws = Workspace::from_template(WorkspaceConfig::default(), &template).unwrap();

    assert_eq!(ws.resolve("src").unwrap().kind, NodeKind::Dir);
    assert_eq!(ws.resolve("src/components/ui").unwrap().kind, NodeKind::Dir);
    assert_eq!(ws.read_file("src/components/ui/button.tsx").unwrap(), "export {}");
}

#[test]
fn test_from_template_folder_file_conflict() {
    // "src" 先作为文件出现，再被用作目录段
    let template = Template::new()
        .with_file("src", "not a folder")
        .with_file("src/main.tsx", "main");
    let err = Workspace::from_template(WorkspaceConfig::default(), &template).unwrap_err();
    assert!(matches!(err, VfsError::DuplicateName(_)));
}
