use super::project::{error_result, text_result};
use super::schemas::SearchFilesRequest;
use super::service::StackBlitzService;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use stackblitz_project::CancellationToken;
use stackblitz_search::{
    render_matches, search_with, LineMatcher, SearchOptions, DEFAULT_MAX_RESULTS,
};

pub(super) async fn search_files(
    service: &StackBlitzService,
    request: SearchFilesRequest,
    cancel: &CancellationToken,
) -> Result<CallToolResult, McpError> {
    let options = SearchOptions {
        regex: request.regex,
        case_sensitive: request.case_sensitive,
        max_results: request.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
    };

    // Invalid patterns fail before any fetch.
    let matcher = match LineMatcher::new(&request.query, &options) {
        Ok(matcher) => matcher,
        Err(err) => return Ok(error_result(err.to_string())),
    };

    let (_, snapshot) = match service.load_snapshot(&request.project_ref, cancel).await {
        Ok(loaded) => loaded,
        Err(err) => return Ok(error_result(err.to_string())),
    };

    let matches = search_with(&snapshot, &matcher, options.max_results);
    log::debug!(
        "search_files: {} matches for {:?} in {} files",
        matches.len(),
        request.query,
        snapshot.file_count()
    );
    Ok(text_result(render_matches(&request.query, &matches)))
}
