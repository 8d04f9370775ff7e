pub mod types;

use crate::error::{ConfigError, Result};
use std::path::Path;

pub use types::{AnalysisConfig, Config, DockerfileConfig, OutputFormat};

/// Load configuration from file or use defaults
///
/// Missing sections and keys fall back to their defaults, so a config file
/// only needs to mention what it changes.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        log::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    if !path.is_file() {
        return Err(ConfigError::InvalidFile(format!("{} does not exist", path.display())).into());
    }

    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    log::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Parse a TOML configuration document
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str::<Config>(content)
        .map_err(|e| ConfigError::ParsingFailed(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_path() {
        let config = load_config(None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.generation.dockerfile.workdir, "/app");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config(
            r#"
[generation.dockerfile]
base_image_override = "ubuntu:22.04"

[output]
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(
            config.generation.dockerfile.base_image_override.as_deref(),
            Some("ubuntu:22.04")
        );
        assert_eq!(config.generation.dockerfile.env_file, ".env");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.analysis, AnalysisConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_parsing_error() {
        let err = parse_config("analysis = [").unwrap_err();
        assert!(matches!(
            err,
            crate::error::IntraError::Config(ConfigError::ParsingFailed(_))
        ));
    }

    #[test]
    fn test_missing_file_is_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_config(Some(&temp_dir.path().join("intra.toml"))).unwrap_err();
        assert!(matches!(
            err,
            crate::error::IntraError::Config(ConfigError::InvalidFile(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("intra.toml");
        fs::write(&path, "[analysis]\nmax_file_size = 2048\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.analysis.max_file_size, 2048);
        assert!(!config.analysis.ignore_patterns.is_empty());
    }
}
