//! Project access for StackBlitz snapshots.
//!
//! - [`resolve_project_id`] / [`ReferenceResolver`] turn ids and URLs into a [`ProjectId`]
//! - [`ProjectCache`] serves [`ProjectSnapshot`]s through a [`SnapshotFetcher`] with a
//!   freshness window and a capacity bound

mod cache;
mod error;
mod fetch;
mod model;
mod reference;

pub use cache::{
    CacheConfig, ProjectCache, DEFAULT_CAPACITY, DEFAULT_FETCH_TIMEOUT, DEFAULT_TTL,
};
pub use error::{ProjectError, ReferenceError, Result};
pub use fetch::SnapshotFetcher;
pub use model::{FileRecord, ProjectSnapshot};
pub use reference::{resolve_project_id, ProjectId, ReferenceResolver, DEFAULT_HOST};
pub use tokio_util::sync::CancellationToken;
