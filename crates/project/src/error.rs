use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProjectError>;

/// Why a project reference could not be turned into a project id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("Empty project reference")]
    Empty,

    #[error("Unsupported URL: only {expected} URLs are supported, got {host}")]
    UnsupportedHost { host: String, expected: String },

    #[error("Could not extract project ID from URL: {0}")]
    Unresolvable(String),
}

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error(transparent)]
    InvalidReference(#[from] ReferenceError),

    #[error("Failed to fetch project {id}: {status} {reason}")]
    FetchFailed {
        id: String,
        status: u16,
        reason: String,
    },

    #[error("Transport error while fetching project {id}: {source}")]
    Transport {
        id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Timed out after {timeout:?} fetching project {id}")]
    Timeout { id: String, timeout: Duration },

    #[error("Fetch of project {0} was cancelled")]
    Cancelled(String),
}

impl ProjectError {
    pub fn transport(
        id: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Transport {
            id: id.into(),
            source: source.into(),
        }
    }

    /// HTTP status reported by the store, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::FetchFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
