//! `stackblitz://` resource templates.

use super::service::StackBlitzService;
use crate::mime::guess_mime_type;
use rmcp::model::{
    AnnotateAble, Content, RawContent, RawResource, ReadResourceResult, ResourceContents,
    ResourceTemplate,
};
use rmcp::ErrorData as McpError;
use serde_json::json;
use stackblitz_project::{CancellationToken, ProjectError, ProjectId};
use stackblitz_tree::{build_tree, format_tree};

pub const SCHEME: &str = "stackblitz://";
pub const TREE_TEMPLATE: &str = "stackblitz://{projectId}/tree";
pub const FILE_TEMPLATE: &str = "stackblitz://{projectId}/files/{+path}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ResourceTarget<'a> {
    Tree { project: &'a str },
    File { project: &'a str, path: &'a str },
}

pub(super) fn tree_uri(id: &ProjectId) -> String {
    format!("{SCHEME}{id}/tree")
}

pub(super) fn file_uri(id: &ProjectId, path: &str) -> String {
    format!("{SCHEME}{id}/files/{path}")
}

/// `resource_link` content pointing a client at one of the templates above.
pub(super) fn resource_link(uri: String, name: String, mime: &str) -> Content {
    let mut resource = RawResource::new(uri, name);
    resource.mime_type = Some(mime.to_string());
    RawContent::resource_link(resource).no_annotation()
}

/// Splits a `stackblitz://` URI into its project part and target; `None` for anything else.
pub(super) fn parse_resource_uri(uri: &str) -> Option<ResourceTarget<'_>> {
    let rest = uri.strip_prefix(SCHEME)?;
    let (project, target) = rest.split_once('/')?;
    if project.is_empty() {
        return None;
    }
    if target == "tree" {
        return Some(ResourceTarget::Tree { project });
    }
    let path = target.strip_prefix("files/")?;
    if path.is_empty() {
        return None;
    }
    Some(ResourceTarget::File { project, path })
}

pub(super) fn resource_templates() -> Result<Vec<ResourceTemplate>, McpError> {
    let templates = [
        json!({
            "uriTemplate": TREE_TEMPLATE,
            "name": "Project file tree",
            "description": "Formatted file tree of a StackBlitz project",
            "mimeType": "text/plain",
        }),
        json!({
            "uriTemplate": FILE_TEMPLATE,
            "name": "Project file",
            "description": "Contents of a single file of a StackBlitz project",
        }),
    ];

    templates
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|err| {
                McpError::internal_error(format!("Invalid resource template: {err}"), None)
            })
        })
        .collect()
}

pub(super) async fn read_resource(
    service: &StackBlitzService,
    uri: &str,
    cancel: &CancellationToken,
) -> Result<ReadResourceResult, McpError> {
    let target = parse_resource_uri(uri).ok_or_else(|| {
        McpError::invalid_params(
            format!(
                "Unsupported resource URI: {uri} (expected {TREE_TEMPLATE} or {FILE_TEMPLATE})"
            ),
            None,
        )
    })?;

    let project = match &target {
        ResourceTarget::Tree { project } | ResourceTarget::File { project, .. } => *project,
    };
    let (_, snapshot) = service
        .load_snapshot(project, cancel)
        .await
        .map_err(project_error)?;

    let contents = match target {
        ResourceTarget::Tree { .. } => {
            let root = build_tree(snapshot.file_list())
                .map_err(|err| McpError::internal_error(err.to_string(), None))?;
            text_contents(uri, "text/plain", format_tree(&root))
        }
        ResourceTarget::File { path, .. } => {
            let record = snapshot.file(path).ok_or_else(|| {
                McpError::resource_not_found(format!("File not found: {path}"), None)
            })?;
            text_contents(uri, guess_mime_type(path), record.contents.clone())
        }
    };

    Ok(ReadResourceResult {
        contents: vec![contents],
    })
}

fn project_error(err: ProjectError) -> McpError {
    match err {
        ProjectError::InvalidReference(_) => McpError::invalid_params(err.to_string(), None),
        _ => McpError::internal_error(err.to_string(), None),
    }
}

fn text_contents(uri: &str, mime: &str, text: String) -> ResourceContents {
    let mut contents = ResourceContents::text(text, uri);
    if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
        *mime_type = Some(mime.to_string());
    }
    contents
}
