use crate::error::Result;
use crate::model::ProjectSnapshot;
use crate::reference::ProjectId;
use async_trait::async_trait;

/// Source of project snapshots on a cache miss.
///
/// Implementations report a non-success answer from the store as
/// [`ProjectError::FetchFailed`](crate::ProjectError::FetchFailed) and network-level failures
/// as [`ProjectError::Transport`](crate::ProjectError::Transport).
#[async_trait]
pub trait SnapshotFetcher: Send + Sync {
    async fn fetch_snapshot(&self, id: &ProjectId) -> Result<ProjectSnapshot>;
}
