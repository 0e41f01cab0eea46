use super::schemas::{
    ListFilesRequest, ReadFileRequest, ResolveProjectRequest, SearchFilesRequest,
};
use super::{project, resources, search};
use crate::config::ServerConfig;
use anyhow::{Context as AnyhowContext, Result};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Implementation, ListResourceTemplatesResult, PaginatedRequestParam,
    ReadResourceRequestParam, ReadResourceResult, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use stackblitz_client::StackBlitzClient;
use stackblitz_project::{
    CancellationToken, ProjectCache, ProjectError, ProjectId, ProjectSnapshot, ReferenceResolver,
};
use std::sync::Arc;

const INSTRUCTIONS: &str = "Read-only access to StackBlitz projects. \
Pass a project URL (https://stackblitz.com/edit/<id>) or a bare project ID as `projectRef`. \
Start with `resolve_project` for metadata, use `list_files` to see the tree, `read_file` for \
contents and `search_files` to find lines. Snapshots are cached for a few minutes, so recent \
edits may take a moment to appear.";

/// MCP service over a shared snapshot cache.
#[derive(Clone)]
pub struct StackBlitzService {
    resolver: ReferenceResolver,
    cache: Arc<ProjectCache>,
    tool_router: ToolRouter<Self>,
}

impl StackBlitzService {
    pub fn new(resolver: ReferenceResolver, cache: Arc<ProjectCache>) -> Self {
        Self {
            resolver,
            cache,
            tool_router: Self::tool_router(),
        }
    }

    /// Wires the HTTP client and cache described by `config`.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let client = StackBlitzClient::new(&config.client)
            .context("Failed to create StackBlitz API client")?;
        let cache = ProjectCache::new(Arc::new(client), config.cache.clone());
        Ok(Self::new(
            ReferenceResolver::new(config.host.as_str()),
            Arc::new(cache),
        ))
    }

    pub(super) async fn load_snapshot(
        &self,
        reference: &str,
        cancel: &CancellationToken,
    ) -> Result<(ProjectId, Arc<ProjectSnapshot>), ProjectError> {
        let id = self.resolver.resolve(reference)?;
        let snapshot = self.cache.get_with_cancel(&id, cancel).await?;
        Ok((id, snapshot))
    }
}

#[tool_router]
impl StackBlitzService {
    #[tool(
        description = "Resolve a StackBlitz project URL or ID and return its metadata (title, description, preset, visibility, file count, tree resource URI)."
    )]
    pub async fn resolve_project(
        &self,
        Parameters(request): Parameters<ResolveProjectRequest>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        project::resolve_project(self, request, &context.ct).await
    }

    #[tool(
        description = "Show the file tree of a StackBlitz project. Optionally pass 'path' to list only files at or below that prefix."
    )]
    pub async fn list_files(
        &self,
        Parameters(request): Parameters<ListFilesRequest>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        project::list_files(self, request, &context.ct).await
    }

    #[tool(
        description = "Read the contents of one file of a StackBlitz project. Unknown paths return suggestions with a similar name."
    )]
    pub async fn read_file(
        &self,
        Parameters(request): Parameters<ReadFileRequest>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        project::read_file(self, request, &context.ct).await
    }

    #[tool(
        description = "Search all files of a StackBlitz project line by line (literal text or regex). Results are grouped by file with line numbers."
    )]
    pub async fn search_files(
        &self,
        Parameters(request): Parameters<SearchFilesRequest>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        search::search_files(self, request, &context.ct).await
    }
}

#[tool_handler]
impl ServerHandler for StackBlitzService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourceTemplatesResult, McpError>>
           + Send
           + '_ {
        async move {
            Ok(ListResourceTemplatesResult::with_all_items(
                resources::resource_templates()?,
            ))
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        async move { resources::read_resource(self, &request.uri, &context.ct).await }
    }
}
