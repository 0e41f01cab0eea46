use std::path::Path;

/// MIME type for a project file, inferred from its extension (case-insensitive).
pub fn guess_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("ts" | "tsx") => "text/typescript",
        Some("js" | "jsx") => "text/javascript",
        Some("json") => "application/json",
        Some("md") => "text/markdown",
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("scss") => "text/scss",
        Some("less") => "text/less",
        Some("svg") => "image/svg+xml",
        Some("yaml" | "yml") => "text/yaml",
        Some("xml") => "text/xml",
        Some("vue") => "text/x-vue",
        Some("svelte") => "text/x-svelte",
        _ => "text/plain",
    }
}
