// src/tools.rs

use intra_cli::analyzer::{self, AnalysisResult};
use intra_cli::config::Config;
use intra_cli::IntraError;
use rust_mcp_sdk::schema::{schema_utils::CallToolError, CallToolResult};
use rust_mcp_sdk::{
    macros::{mcp_tool, JsonSchema},
    tool_box,
};
use std::error::Error;
use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub struct ToolError(String);

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for ToolError {}

fn tool_error(context: &str, err: IntraError) -> CallToolError {
    let message = if err.is_recoverable() {
        err.to_string()
    } else {
        format!("{}: {}", context, err)
    };
    tracing::warn!("{}", message);
    CallToolError::new(ToolError(message))
}

fn json_result(result: &AnalysisResult) -> CallToolResult {
    let json_output = serde_json::to_string_pretty(result).unwrap_or_else(|e| {
        format!(
            "{{\"error\": \"Failed to serialize analysis result: {}\"}}",
            e
        )
    });
    CallToolResult::text_content(json_output, None)
}

// --- Tool to act as the "info" resource ---
#[mcp_tool(
    name = "about_info",
    description = "Describes this server: repository environment inference and Dockerfile synthesis for development workspaces."
)]
#[derive(Debug, ::serde::Deserialize, ::serde::Serialize, JsonSchema)]
pub struct AboutInfoTool {}

impl AboutInfoTool {
    pub fn call_tool(&self) -> Result<CallToolResult, CallToolError> {
        let info = format!(
            "Intra repository analyzer v{version}\n\n\
            Infers how to build a repository and generates a Dockerfile for its development workspace.\n\n\
            Tools:\n\
            1. analyze_bundle: analyze the flattened text bundle of a repository (argument `bundle`). \
            Returns project types, language version, dependencies, OS requirements, environment variables, \
            ports, notes and the Dockerfile as JSON. Set `allow_empty` to accept bundles without file sections.\n\
            2. generate_dockerfile: return only the Dockerfile for a bundle (argument `bundle`).\n\
            3. analyze_directory: analyze a local checkout (argument `path`, default the current directory).\n\n\
            Recognized manifests: {manifests}.\n",
            version = intra_cli::VERSION,
            manifests = analyzer::supported_signatures()
                .into_iter()
                .map(|(ecosystem, _)| ecosystem)
                .collect::<Vec<_>>()
                .join(", "),
        );
        Ok(CallToolResult::text_content(info, None))
    }
}

// --- Tool for analyzing a repository bundle ---
#[mcp_tool(
    name = "analyze_bundle",
    description = "Analyzes a repository bundle (the bundler's flattened text output) and returns the environment analysis with a generated Dockerfile as JSON."
)]
#[derive(Debug, ::serde::Deserialize, ::serde::Serialize, JsonSchema)]
pub struct AnalyzeBundleTool {
    /// The full bundle text, including the `Repository Files` section.
    pub bundle: String,
    /// Return an empty analysis instead of an error when the bundle has no file sections.
    pub allow_empty: Option<bool>,
}

impl AnalyzeBundleTool {
    pub fn call_tool(&self) -> Result<CallToolResult, CallToolError> {
        tracing::info!("Analyzing bundle of {} bytes", self.bundle.len());
        let outcome = if self.allow_empty.unwrap_or(false) {
            analyzer::analyze_bundle(&self.bundle)
        } else {
            analyzer::analyze_bundle_strict(&self.bundle)
        };
        outcome
            .map(|result| json_result(&result))
            .map_err(|e| tool_error("Failed to analyze bundle", e))
    }
}

#[mcp_tool(
    name = "generate_dockerfile",
    description = "Generates the Dockerfile for a repository bundle and returns it as plain text."
)]
#[derive(Debug, ::serde::Deserialize, ::serde::Serialize, JsonSchema)]
pub struct GenerateDockerfileTool {
    /// The full bundle text, including the `Repository Files` section.
    pub bundle: String,
}

impl GenerateDockerfileTool {
    pub fn call_tool(&self) -> Result<CallToolResult, CallToolError> {
        analyzer::analyze_bundle_strict(&self.bundle)
            .map(|result| CallToolResult::text_content(result.dockerfile, None))
            .map_err(|e| tool_error("Failed to generate Dockerfile", e))
    }
}

#[mcp_tool(
    name = "analyze_directory",
    description = "Analyzes a repository checkout on the server's filesystem. Defaults to the current directory if no path is provided."
)]
#[derive(Debug, ::serde::Deserialize, ::serde::Serialize, JsonSchema)]
pub struct AnalyzeDirectoryTool {
    /// The path to the repository to analyze. Defaults to the current directory.
    pub path: Option<String>,
}

impl AnalyzeDirectoryTool {
    pub fn call_tool(&self) -> Result<CallToolResult, CallToolError> {
        let project_path_str = self.path.as_deref().unwrap_or(".");
        tracing::info!("Analyzing directory: {}", project_path_str);

        analyzer::analyze_directory(Path::new(project_path_str), &Config::default())
            .map(|result| json_result(&result))
            .map_err(|e| tool_error("Failed to analyze directory", e))
    }
}

// --- Create a Tool Box ---
// This generates an enum `ServerTools` that contains all our defined tools.
tool_box!(
    ServerTools,
    [
        AboutInfoTool,
        AnalyzeBundleTool,
        GenerateDockerfileTool,
        AnalyzeDirectoryTool
    ]
);

impl ServerTools {
    /// Runs the selected tool.
    pub fn call(self) -> Result<CallToolResult, CallToolError> {
        match self {
            ServerTools::AboutInfoTool(tool) => tool.call_tool(),
            ServerTools::AnalyzeBundleTool(tool) => tool.call_tool(),
            ServerTools::GenerateDockerfileTool(tool) => tool.call_tool(),
            ServerTools::AnalyzeDirectoryTool(tool) => tool.call_tool(),
        }
    }
}
