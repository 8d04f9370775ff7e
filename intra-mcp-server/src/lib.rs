mod handler;
pub mod rest;
pub mod tools;

#[cfg(test)]
mod tests;

use handler::IntraServerHandler;
use rust_mcp_sdk::{
    error::SdkResult,
    mcp_server::{hyper_server, server_runtime, HyperServerOptions, ServerRuntime},
    schema::{
        Implementation, InitializeResult, ServerCapabilities, ServerCapabilitiesTools,
        LATEST_PROTOCOL_VERSION,
    },
    McpServer, StdioTransport, TransportOptions,
};
use tools::ServerTools;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn server_details(name: &str, instructions: &str) -> InitializeResult {
    InitializeResult {
        server_info: Implementation {
            name: name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools { list_changed: None }),
            ..Default::default()
        },
        protocol_version: LATEST_PROTOCOL_VERSION.to_string(),
        instructions: Some(instructions.into()),
        meta: None,
    }
}

/// Installs the `tracing` subscriber used by the network transports.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}

pub async fn start_stdio() -> SdkResult<()> {
    // stdout carries the protocol, so logs go to stderr through env_logger
    env_logger::init();

    let server_details = server_details(
        "Intra-MCP-Server",
        "Analyzes repository bundles and generates Dockerfiles. Use list_tools to see available functionalities.",
    );

    let available_tools = ServerTools::tools();
    eprintln!("🚀 Starting Intra-MCP-Server (stdio mode)...");
    eprintln!("📋 Available tools ({}):", available_tools.len());
    for (i, tool) in available_tools.iter().enumerate() {
        eprintln!(
            "   {}. {} - {}",
            i + 1,
            tool.name,
            tool.description.as_deref().unwrap_or("No description")
        );
    }
    eprintln!();
    eprintln!("✅ Server initialized successfully. Listening for MCP requests...");

    let transport = StdioTransport::new(TransportOptions::default())?;
    let handler = IntraServerHandler {};
    let server: ServerRuntime = server_runtime::create_server(server_details, transport, handler);

    server.start().await?;
    Ok(())
}

pub async fn start_sse(host: &str, port: u16) -> SdkResult<()> {
    init_tracing();

    let server_details = server_details(
        "Intra-MCP-Server (SSE)",
        "Analyzes repository bundles and generates Dockerfiles. Connect via a web client.",
    );

    let available_tools = ServerTools::tools();
    tracing::info!("🚀 Starting Intra-MCP-Server (SSE)...");
    tracing::info!("📋 Available tools ({}):", available_tools.len());
    for (i, tool) in available_tools.iter().enumerate() {
        tracing::info!(
            "   {}. {} - {}",
            i + 1,
            tool.name,
            tool.description.as_deref().unwrap_or("No description")
        );
    }

    let handler = IntraServerHandler {};
    let options = HyperServerOptions {
        host: host.to_string(),
        port,
        ..Default::default()
    };

    let server = hyper_server::create_server(server_details, handler, options);

    tracing::info!("✅ SSE server listening on http://{}:{}", host, port);
    server.start().await?;
    Ok(())
}
