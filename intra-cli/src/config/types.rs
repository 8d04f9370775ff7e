use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub generation: GenerationConfig,
    pub output: OutputConfig,
}

/// Analysis configuration
///
/// Only used when building a file map from a local directory; bundles arrive
/// already filtered by the bundler's own ignore rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub ignore_patterns: Vec<String>,
    pub max_file_size: usize,
    pub follow_links: bool,
}

/// Generation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub dockerfile: DockerfileConfig,
}

/// Dockerfile generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerfileConfig {
    /// Replaces the base image picked from the stack table.
    pub base_image_override: Option<String>,
    pub workdir: String,
    /// File the bootstrap script writes the container environment into, relative to `workdir`.
    pub env_file: String,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Summary,
    Detailed,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "target".to_string(),
                "build".to_string(),
                ".next".to_string(),
                "dist".to_string(),
                "vendor".to_string(),
                "Pods".to_string(),
            ],
            max_file_size: 1024 * 1024, // 1MB
            follow_links: false,
        }
    }
}

impl Default for DockerfileConfig {
    fn default() -> Self {
        Self {
            base_image_override: None,
            workdir: "/app".to_string(),
            env_file: ".env".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Summary,
        }
    }
}
