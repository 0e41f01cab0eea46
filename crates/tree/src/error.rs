use thiserror::Error;

pub type Result<T> = std::result::Result<T, TreeError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A path is used both as a file and as a directory.
    #[error("Malformed tree: '{path}' is both a file and a directory")]
    MalformedTree { path: String },
}
