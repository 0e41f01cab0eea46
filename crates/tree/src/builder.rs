use crate::error::{Result, TreeError};
use crate::types::TreeNode;

/// Folds `/`-separated file paths into a tree rooted at an unnamed directory.
///
/// Paths are sorted first so the build order is deterministic. Empty segments are skipped,
/// so `/src//main.ts` and `src/main.ts` name the same file, and a repeated file path is
/// folded into one leaf. A name used both as a file and as a directory under the same parent
/// is rejected with [`TreeError::MalformedTree`].
pub fn build_tree<I, S>(paths: I) -> Result<TreeNode>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sorted: Vec<String> = paths
        .into_iter()
        .map(|path| path.as_ref().to_string())
        .collect();
    sorted.sort();
    sorted.dedup();

    let mut top_level = Vec::new();
    for raw in &sorted {
        let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
        let Some((file_name, dirs)) = segments.split_last() else {
            continue;
        };

        let mut children: &mut Vec<TreeNode> = &mut top_level;
        let mut current = String::new();
        for dir in dirs {
            push_segment(&mut current, dir);
            children = descend(children, dir, &current)?;
        }
        push_segment(&mut current, file_name);
        insert_file(children, file_name, current)?;
    }

    Ok(TreeNode::Directory {
        path: String::new(),
        name: String::new(),
        children: top_level,
    })
}

fn push_segment(path: &mut String, segment: &str) {
    if !path.is_empty() {
        path.push('/');
    }
    path.push_str(segment);
}

fn descend<'a>(
    children: &'a mut Vec<TreeNode>,
    name: &str,
    path: &str,
) -> Result<&'a mut Vec<TreeNode>> {
    let idx = match children.iter().position(|child| child.name() == name) {
        Some(idx) => idx,
        None => {
            children.push(TreeNode::Directory {
                path: path.to_string(),
                name: name.to_string(),
                children: Vec::new(),
            });
            children.len() - 1
        }
    };

    match &mut children[idx] {
        TreeNode::Directory { children, .. } => Ok(children),
        TreeNode::File { .. } => Err(TreeError::MalformedTree {
            path: path.to_string(),
        }),
    }
}

fn insert_file(children: &mut Vec<TreeNode>, name: &str, path: String) -> Result<()> {
    match children.iter().find(|child| child.name() == name) {
        Some(TreeNode::Directory { .. }) => Err(TreeError::MalformedTree { path }),
        Some(TreeNode::File { .. }) => Ok(()),
        None => {
            children.push(TreeNode::File {
                path,
                name: name.to_string(),
            });
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn child<'a>(node: &'a TreeNode, name: &str) -> &'a TreeNode {
        node.children()
            .iter()
            .find(|c| c.name() == name)
            .unwrap_or_else(|| panic!("missing child {name}"))
    }

    fn count_files(node: &TreeNode) -> usize {
        match node {
            TreeNode::File { .. } => 1,
            TreeNode::Directory { children, .. } => children.iter().map(count_files).sum(),
        }
    }

    #[test]
    fn builds_tree_from_flat_paths() {
        let tree = build_tree(["src/index.ts", "src/utils.ts", "package.json"]).unwrap();
        assert_eq!(tree.children().len(), 2);

        let src = child(&tree, "src");
        assert!(src.is_dir());
        assert_eq!(src.path(), "src");
        assert_eq!(src.children().len(), 2);
        assert_eq!(child(src, "utils.ts").path(), "src/utils.ts");

        let pkg = child(&tree, "package.json");
        assert!(!pkg.is_dir());
        assert_eq!(count_files(&tree), 3);
    }

    #[test]
    fn nested_directories_form_a_chain() {
        let tree = build_tree(["a/b/c/file.ts"]).unwrap();
        let expected = TreeNode::Directory {
            path: String::new(),
            name: String::new(),
            children: vec![TreeNode::Directory {
                path: "a".into(),
                name: "a".into(),
                children: vec![TreeNode::Directory {
                    path: "a/b".into(),
                    name: "b".into(),
                    children: vec![TreeNode::Directory {
                        path: "a/b/c".into(),
                        name: "c".into(),
                        children: vec![TreeNode::File {
                            path: "a/b/c/file.ts".into(),
                            name: "file.ts".into(),
                        }],
                    }],
                }],
            }],
        };
        assert_eq!(tree, expected);
    }

    #[test]
    fn empty_input_yields_empty_root() {
        let tree = build_tree(Vec::<String>::new()).unwrap();
        assert_eq!(tree, TreeNode::root());
    }

    #[test]
    fn shared_directories_are_not_duplicated() {
        let tree = build_tree(["src/b.ts", "src/a/x.ts", "src/a/y.ts", "src/c.ts"]).unwrap();
        assert_eq!(tree.children().len(), 1);
        let src = child(&tree, "src");
        assert_eq!(src.children().len(), 3);
        assert_eq!(child(src, "a").children().len(), 2);
    }

    #[test]
    fn empty_segments_and_duplicates_are_folded() {
        let tree = build_tree(["/src//main.ts", "src/main.ts", "src/main.ts", ""]).unwrap();
        assert_eq!(count_files(&tree), 1);
        assert_eq!(child(child(&tree, "src"), "main.ts").path(), "src/main.ts");
    }

    #[test]
    fn file_directory_collision_is_malformed() {
        let err = build_tree(["lib", "lib/index.ts"]).unwrap_err();
        assert_eq!(
            err,
            TreeError::MalformedTree {
                path: "lib".to_string()
            }
        );

        let err = build_tree(["a/b/c.ts", "a/b"]).unwrap_err();
        assert_eq!(
            err,
            TreeError::MalformedTree {
                path: "a/b".to_string()
            }
        );
    }
}
