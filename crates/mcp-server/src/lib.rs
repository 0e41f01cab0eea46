//! StackBlitz MCP Server
//!
//! Gives AI agents read-only access to StackBlitz projects via the MCP protocol.
//!
//! ## Tools
//!
//! - `resolve_project` - Resolve a project URL or ID and return project metadata
//! - `list_files` - File tree of a project, optionally below a path prefix
//! - `read_file` - Contents of one file
//! - `search_files` - Line search (literal or regex) across all files
//!
//! ## Resources
//!
//! - `stackblitz://{projectId}/tree`
//! - `stackblitz://{projectId}/files/{+path}`
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "stackblitz": {
//!       "command": "stackblitz-mcp"
//!     }
//!   }
//! }
//! ```

use anyhow::{Context as AnyhowContext, Result};
use rmcp::transport::stdio;
use rmcp::ServiceExt;

pub mod config;
mod mime;
mod tools;

pub use config::ServerConfig;
pub use mime::guess_mime_type;
pub use tools::StackBlitzService;

pub async fn main_entry() -> Result<()> {
    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = ServerConfig::from_env();
    log::info!(
        "Starting StackBlitz MCP server (api base {}, cache ttl {:?}, capacity {})",
        config.client.api_base,
        config.cache.ttl,
        config.cache.capacity
    );

    let service = StackBlitzService::from_config(&config)?;
    let server = service
        .serve(stdio())
        .await
        .context("Failed to start MCP server on stdio")?;

    server.waiting().await?;

    log::info!("StackBlitz MCP server stopped");
    Ok(())
}
