mod builder;
mod error;
mod format;
mod types;

pub use builder::build_tree;
pub use error::{Result, TreeError};
pub use format::format_tree;
pub use types::TreeNode;
