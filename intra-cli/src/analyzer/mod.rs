//! # Analyzer Module
//!
//! Infers a repository's build environment from its files:
//! - Project types (ecosystems, frameworks, build tools)
//! - The runtime language version
//! - Dependencies, with each ecosystem's own separator
//! - Ports, environment variables and OS-level requirements
//!
//! A single analysis flows bundle reader → classifier → Dockerfile
//! synthesizer → [`AnalysisResult`]. Nothing is shared between analyses.

use crate::config::{Config, DockerfileConfig};
use crate::error::{AnalysisError, Result};
use crate::generator::DockerfileGenerator;
use std::path::Path;

pub mod accumulator;
pub mod bundle_reader;
pub mod classifier;
pub mod display;
pub mod ecosystems;
pub mod env_extractor;
pub mod file_map;
pub mod output;
pub mod parsers;

pub use accumulator::AnalysisAccumulator;
pub use bundle_reader::{read_bundle, BundleFormat, DelimitedTextBundle};
pub use classifier::{classify, supported_signatures};
pub use env_extractor::extract_env_vars;
pub use file_map::FileMap;
pub use output::{AnalysisResult, LanguageVersion};

/// Analyzes a repository bundle with the default Dockerfile layout.
///
/// A bundle without any file sections yields an empty result carrying the
/// fallback Dockerfile; use [`analyze_bundle_strict`] to reject it instead.
///
/// # Examples
/// ```no_run
/// use intra_cli::analyzer::analyze_bundle;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bundle = std::fs::read_to_string("repo.txt")?;
/// let result = analyze_bundle(&bundle)?;
/// println!("{:?}", result.project_types);
/// # Ok(())
/// # }
/// ```
pub fn analyze_bundle(content: &str) -> Result<AnalysisResult> {
    analyze_bundle_with(&DelimitedTextBundle, content, &DockerfileConfig::default())
}

/// Analyzes a bundle in any [`BundleFormat`] with a custom Dockerfile layout.
pub fn analyze_bundle_with(
    format: &dyn BundleFormat,
    content: &str,
    dockerfile: &DockerfileConfig,
) -> Result<AnalysisResult> {
    log::debug!("Reading bundle as {}", format.name());
    let files = format.read(content)?;
    Ok(analyze_files(&files, dockerfile))
}

/// Like [`analyze_bundle`], but a bundle with no file sections is an error.
pub fn analyze_bundle_strict(content: &str) -> Result<AnalysisResult> {
    let files = read_bundle(content)?;
    if files.is_empty() {
        return Err(AnalysisError::NoFilesParsed.into());
    }
    Ok(analyze_files(&files, &DockerfileConfig::default()))
}

/// Classifies `files` and synthesizes the Dockerfile.
pub fn analyze_files(files: &FileMap, dockerfile: &DockerfileConfig) -> AnalysisResult {
    let start_time = std::time::Instant::now();

    let acc = classify(files);
    let generated = DockerfileGenerator::new(dockerfile.clone()).generate(&acc);
    let result = AnalysisResult::from_accumulator(acc, generated);

    log::info!(
        "Analysis of {} files completed in {}ms",
        files.len(),
        start_time.elapsed().as_millis()
    );
    result
}

/// Analyzes a local checkout directly, without going through the bundler.
pub fn analyze_directory(path: &Path, config: &Config) -> Result<AnalysisResult> {
    let files = FileMap::from_directory(path, &config.analysis)?;
    Ok(analyze_files(&files, &config.generation.dockerfile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntraError;

    const SEPARATOR: &str = "================";

    fn bundle(files: &[(&str, &str)]) -> String {
        let mut out = String::from("Repository Summary\n\nRepository Files\n\n");
        for (path, content) in files {
            out.push_str(&format!("{SEPARATOR}\nFile: {path}\n{SEPARATOR}\n{content}\n\n"));
        }
        out
    }

    #[test]
    fn test_node_scenario() {
        let content = bundle(&[(
            "package.json",
            r#"{"engines":{"node":"18.0.0"},"dependencies":{"express":"4.18.2"}}"#,
        )]);
        let result = analyze_bundle(&content).unwrap();

        assert_eq!(result.project_types, vec!["Express", "Node.js"]);
        let language = result.language_version.unwrap();
        assert_eq!((language.name.as_str(), language.version.as_str()), ("Node.js", "18.0.0"));
        assert_eq!(result.dependencies, vec!["express@4.18.2"]);
        assert!(result.dockerfile.contains("FROM node:18.0.0-alpine"));
        assert!(result.dockerfile.contains(r#"CMD ["npm", "start"]"#));
    }

    #[test]
    fn test_empty_bundle_is_lenient_by_default() {
        let result = analyze_bundle("Repository Files\n").unwrap();
        assert!(result.is_empty());
        assert!(result.dockerfile.contains("FROM alpine:latest"));
    }

    #[test]
    fn test_strict_rejects_empty_bundle() {
        let err = analyze_bundle_strict("Repository Files\n").unwrap_err();
        assert!(matches!(err, IntraError::Analysis(AnalysisError::NoFilesParsed)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_missing_anchor() {
        let err = analyze_bundle("just some text").unwrap_err();
        assert!(matches!(err, IntraError::Analysis(AnalysisError::Format(_))));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_custom_dockerfile_layout() {
        let content = bundle(&[("go.mod", "module x\n\ngo 1.21\n")]);
        let config = DockerfileConfig {
            base_image_override: Some("golang:1.21-bookworm".to_string()),
            ..DockerfileConfig::default()
        };
        let result = analyze_bundle_with(&DelimitedTextBundle, &content, &config).unwrap();
        assert!(result.dockerfile.contains("FROM golang:1.21-bookworm"));
    }
}
