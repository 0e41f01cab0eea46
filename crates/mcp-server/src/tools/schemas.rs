use rmcp::schemars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveProjectRequest {
    /// Project URL or ID
    #[schemars(
        description = "StackBlitz project URL (https://stackblitz.com/edit/<id>) or bare project ID"
    )]
    pub project_ref: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesRequest {
    #[schemars(description = "StackBlitz project URL or project ID")]
    pub project_ref: String,

    /// Optional directory (or file) prefix; only files at or below it are listed.
    #[schemars(description = "Optional path prefix to filter the tree (e.g. 'src')")]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadFileRequest {
    #[schemars(description = "StackBlitz project URL or project ID")]
    pub project_ref: String,

    #[schemars(description = "Full path of the file relative to the project root")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilesRequest {
    #[schemars(description = "StackBlitz project URL or project ID")]
    pub project_ref: String,

    #[schemars(description = "Text to search for (a regular expression when 'regex' is true)")]
    pub query: String,

    #[schemars(description = "Interpret the query as a regular expression (default: false)")]
    #[serde(default)]
    pub regex: bool,

    #[schemars(description = "Match case exactly (default: false)")]
    #[serde(default)]
    pub case_sensitive: bool,

    /// Maximum number of matching lines (default: 50)
    #[schemars(description = "Maximum number of matching lines to return (default: 50)")]
    pub max_results: Option<usize>,
}

/// Metadata returned by `resolve_project`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    pub preset: String,
    pub visibility: String,
    pub file_count: usize,
}
