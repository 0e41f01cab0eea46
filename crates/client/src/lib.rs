//! StackBlitz project API client.
//!
//! Implements [`SnapshotFetcher`] on top of
//! `GET {api_base}/api/projects/{id}?include_files=true`.

use anyhow::{Context as AnyhowContext, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use stackblitz_project::{ProjectError, ProjectId, ProjectSnapshot, SnapshotFetcher};
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://stackblitz.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin (optionally with a path prefix) the API paths are appended to.
    pub api_base: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ProjectEnvelope {
    project: ProjectSnapshot,
}

/// Decodes the `{ "project": { ... } }` payload returned by the project endpoint.
pub fn decode_project(body: &[u8]) -> serde_json::Result<ProjectSnapshot> {
    serde_json::from_slice::<ProjectEnvelope>(body).map(|envelope| envelope.project)
}

#[derive(Clone, Debug)]
pub struct StackBlitzClient {
    http: Client,
    api_base: Url,
}

impl StackBlitzClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api_base = Url::parse(&config.api_base)
            .with_context(|| format!("Invalid API base URL: {}", config.api_base))?;
        if api_base.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot carry a path: {}", config.api_base);
        }

        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, api_base })
    }

    /// Endpoint for `id`; the id is percent-encoded as a single path segment.
    pub fn project_url(&self, id: &ProjectId) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "projects", id.as_str()]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("include_files", "true");
        url
    }
}

#[async_trait]
impl SnapshotFetcher for StackBlitzClient {
    async fn fetch_snapshot(&self, id: &ProjectId) -> stackblitz_project::Result<ProjectSnapshot> {
        let url = self.project_url(id);
        log::debug!("GET {url}");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| ProjectError::transport(id.as_str(), err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProjectError::FetchFailed {
                id: id.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| ProjectError::transport(id.as_str(), err))?;
        let snapshot =
            decode_project(&body).map_err(|err| ProjectError::transport(id.as_str(), err))?;
        log::debug!(
            "fetched project {id}: {} files, {} bytes",
            snapshot.file_count(),
            body.len()
        );
        Ok(snapshot)
    }
}
