// src/main_rest.rs

use intra_mcp_server::{init_tracing, rest};
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let addr: SocketAddr = std::env::var("INTRA_REST_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
        .parse()?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("MCP REST server listening on http://{}", addr);
    axum::serve(listener, rest::router()).await?;
    Ok(())
}
