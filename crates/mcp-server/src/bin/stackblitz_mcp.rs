use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    stackblitz_mcp::main_entry().await
}
