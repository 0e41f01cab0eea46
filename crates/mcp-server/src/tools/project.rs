use super::resources::{file_uri, resource_link, tree_uri};
use super::schemas::{ListFilesRequest, ProjectSummary, ReadFileRequest, ResolveProjectRequest};
use super::service::StackBlitzService;
use crate::mime::guess_mime_type;
use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use stackblitz_project::{CancellationToken, ProjectSnapshot};
use stackblitz_tree::{build_tree, format_tree};

const MAX_SUGGESTIONS: usize = 5;

pub(super) fn error_result(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}

pub(super) fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

pub(super) async fn resolve_project(
    service: &StackBlitzService,
    request: ResolveProjectRequest,
    cancel: &CancellationToken,
) -> Result<CallToolResult, McpError> {
    let (id, snapshot) = match service.load_snapshot(&request.project_ref, cancel).await {
        Ok(loaded) => loaded,
        Err(err) => return Ok(error_result(err.to_string())),
    };

    let summary = ProjectSummary {
        project_id: id.to_string(),
        title: snapshot.title.clone(),
        description: snapshot.description.clone(),
        preset: snapshot.preset.clone(),
        visibility: snapshot.visibility.clone(),
        file_count: snapshot.file_count(),
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => Ok(CallToolResult::success(vec![
            Content::text(json),
            resource_link(tree_uri(&id), format!("{id} file tree"), "text/plain"),
        ])),
        Err(err) => Err(McpError::internal_error(
            format!("Failed to serialize project summary: {err}"),
            None,
        )),
    }
}

pub(super) async fn list_files(
    service: &StackBlitzService,
    request: ListFilesRequest,
    cancel: &CancellationToken,
) -> Result<CallToolResult, McpError> {
    let (_, snapshot) = match service.load_snapshot(&request.project_ref, cancel).await {
        Ok(loaded) => loaded,
        Err(err) => return Ok(error_result(err.to_string())),
    };

    let prefix = request
        .path
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());
    let paths = match prefix {
        Some(prefix) => snapshot.file_list_under(prefix),
        None => snapshot.file_list(),
    };

    if paths.is_empty() {
        let message = match prefix {
            Some(prefix) => format!("No files found under {prefix}"),
            None => "Project has no files".to_string(),
        };
        return Ok(text_result(message));
    }

    match build_tree(&paths) {
        Ok(root) => Ok(text_result(format_tree(&root))),
        Err(err) => Ok(error_result(err.to_string())),
    }
}

pub(super) async fn read_file(
    service: &StackBlitzService,
    request: ReadFileRequest,
    cancel: &CancellationToken,
) -> Result<CallToolResult, McpError> {
    let (id, snapshot) = match service.load_snapshot(&request.project_ref, cancel).await {
        Ok(loaded) => loaded,
        Err(err) => return Ok(error_result(err.to_string())),
    };

    match snapshot.file(&request.path) {
        Some(record) => Ok(CallToolResult::success(vec![
            Content::text(record.contents.clone()),
            resource_link(
                file_uri(&id, &request.path),
                request.path.clone(),
                guess_mime_type(&request.path),
            ),
        ])),
        None => Ok(error_result(not_found_message(&snapshot, &request.path))),
    }
}

/// Paths whose full path contains the basename of `path`, at most [`MAX_SUGGESTIONS`].
pub(super) fn suggest_paths(snapshot: &ProjectSnapshot, path: &str) -> Vec<String> {
    let basename = path.rsplit('/').next().unwrap_or_default();
    if basename.is_empty() {
        return Vec::new();
    }
    snapshot
        .file_list()
        .into_iter()
        .filter(|candidate| candidate.contains(basename))
        .take(MAX_SUGGESTIONS)
        .collect()
}

pub(super) fn not_found_message(snapshot: &ProjectSnapshot, path: &str) -> String {
    let mut message = format!("File not found: {path}");
    let suggestions = suggest_paths(snapshot, path);
    if !suggestions.is_empty() {
        message.push_str("\n\nDid you mean:");
        for suggestion in suggestions {
            message.push_str("\n  - ");
            message.push_str(&suggestion);
        }
    }
    message
}
