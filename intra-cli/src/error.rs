use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntraError {
    #[error("Repository analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Dockerfile generation failed: {0}")]
    Generation(#[from] GeneratorError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Security error: {0}")]
    Security(#[from] SecurityError),
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The bundle is structurally unreadable (e.g. the `Repository Files` anchor is missing).
    #[error("Bundle format error: {0}")]
    Format(String),

    /// The bundle was readable but contained no file sections.
    #[error("No files were parsed from the repository bundle; check the bundler output format")]
    NoFilesParsed,
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Output file already exists: {path} (use --force to overwrite)")]
    OutputExists { path: PathBuf },

    #[error("Output file creation failed: {path}")]
    OutputCreation { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Configuration parsing failed: {0}")]
    ParsingFailed(String),
}

#[derive(Error, Debug)]
pub enum SecurityError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, IntraError>;

impl IntraError {
    /// Whether the failure is a recoverable, user-facing condition rather than a hard failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, IntraError::Analysis(AnalysisError::NoFilesParsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_empty_bundle_is_recoverable() {
        assert!(IntraError::from(AnalysisError::NoFilesParsed).is_recoverable());
        assert!(!IntraError::from(AnalysisError::Format("no anchor".into())).is_recoverable());
    }

    #[test]
    fn test_serialization_failure_converts() {
        let err: IntraError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, IntraError::Json(_)));
        assert!(err.to_string().starts_with("JSON serialization error"));
    }
}
