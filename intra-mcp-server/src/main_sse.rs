// src/main_sse.rs
use intra_mcp_server::start_sse;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let host = std::env::var("INTRA_SSE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("INTRA_SSE_PORT") {
        Ok(port) => port.parse()?,
        Err(_) => 8000,
    };
    start_sse(&host, port).await?;
    Ok(())
}
