//! Published analysis result.

use super::AnalysisAccumulator;
use serde::{Deserialize, Serialize};

/// Runtime language and version, split from `"<Language> <Version>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageVersion {
    pub name: String,
    pub version: String,
}

impl LanguageVersion {
    /// Splits at the last space, so multi-word names such as `"Node.js"` or
    /// `".NET"` keep their full name.
    pub fn parse(value: &str) -> Option<Self> {
        let (name, version) = value.trim().rsplit_once(' ')?;
        Some(Self {
            name: name.trim().to_string(),
            version: version.to_string(),
        })
    }
}

/// The result returned to callers for one analyzed repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub project_types: Vec<String>,
    pub language_version: Option<LanguageVersion>,
    pub dependencies: Vec<String>,
    pub os_requirements: Vec<String>,
    pub environment_variables: Vec<String>,
    pub ports: Vec<u16>,
    pub notes: String,
    pub dockerfile: String,
}

impl AnalysisResult {
    pub fn from_accumulator(acc: AnalysisAccumulator, dockerfile: String) -> Self {
        Self {
            project_types: acc.project_types.into_iter().collect(),
            language_version: acc.language_version.as_deref().and_then(LanguageVersion::parse),
            dependencies: acc.dependencies.into_iter().collect(),
            os_requirements: acc.os_requirements.into_iter().collect(),
            environment_variables: acc.environment_variables.into_iter().collect(),
            ports: acc.ports.into_iter().collect(),
            notes: acc.notes,
            dockerfile,
        }
    }

    /// Whether the analysis detected nothing beyond the fallback Dockerfile.
    pub fn is_empty(&self) -> bool {
        self.project_types.is_empty()
            && self.language_version.is_none()
            && self.dependencies.is_empty()
            && self.os_requirements.is_empty()
            && self.environment_variables.is_empty()
            && self.ports.is_empty()
            && self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_version_split() {
        let parsed = LanguageVersion::parse("Node.js 18.0.0").unwrap();
        assert_eq!(parsed.name, "Node.js");
        assert_eq!(parsed.version, "18.0.0");

        let parsed = LanguageVersion::parse(".NET 8.0").unwrap();
        assert_eq!(parsed.name, ".NET");

        assert!(LanguageVersion::parse("Go").is_none());
    }

    #[test]
    fn test_camel_case_json() {
        let mut acc = AnalysisAccumulator::new();
        acc.add_project_type("Go");
        acc.set_language_version("Go", Some("1.21"));
        acc.add_env_var("DB_URL");
        acc.add_port(8080);

        let result = AnalysisResult::from_accumulator(acc, "FROM golang:1.21-alpine\n".into());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["projectTypes"], serde_json::json!(["Go"]));
        assert_eq!(json["languageVersion"]["name"], "Go");
        assert_eq!(json["languageVersion"]["version"], "1.21");
        assert_eq!(json["environmentVariables"], serde_json::json!(["DB_URL"]));
        assert_eq!(json["osRequirements"], serde_json::json!([]));
        assert_eq!(json["ports"], serde_json::json!([8080]));
        assert!(json["dockerfile"].as_str().unwrap().starts_with("FROM"));
    }

    #[test]
    fn test_empty_result_has_null_language() {
        let result = AnalysisResult::from_accumulator(AnalysisAccumulator::new(), String::new());
        assert!(result.is_empty());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["languageVersion"].is_null());
    }
}
