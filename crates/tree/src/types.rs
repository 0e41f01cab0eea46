/// Node of a project file tree.
///
/// The root is a `Directory` with an empty `path` and `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    File {
        path: String,
        name: String,
    },
    Directory {
        path: String,
        name: String,
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    pub fn root() -> Self {
        Self::Directory {
            path: String::new(),
            name: String::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Directory { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::File { path, .. } | Self::Directory { path, .. } => path,
        }
    }

    pub fn is_dir(&self) -> bool {
        match self {
            Self::File { .. } => false,
            Self::Directory { .. } => true,
        }
    }

    /// Children in build order; empty for files.
    pub fn children(&self) -> &[TreeNode] {
        match self {
            Self::File { .. } => &[],
            Self::Directory { children, .. } => children,
        }
    }
}
