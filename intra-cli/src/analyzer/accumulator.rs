//! In-progress findings for a single analysis request.

use std::collections::BTreeSet;

/// Language name used when only a placeholder version is known.
const LATEST: &str = "latest";

/// Mutable aggregate built during one classification pass.
///
/// Every request owns its own accumulator; nothing here is shared across
/// requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisAccumulator {
    pub project_types: BTreeSet<String>,
    /// `"<Language> <Version>"`, or `"<Language> latest"` when no concrete version was found.
    pub language_version: Option<String>,
    pub dependencies: BTreeSet<String>,
    pub os_requirements: BTreeSet<String>,
    pub environment_variables: BTreeSet<String>,
    pub ports: BTreeSet<u16>,
    /// Newline-joined observations, each line at most once.
    pub notes: String,
}

impl AnalysisAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_project_type(&mut self, label: &str) {
        self.project_types.insert(label.to_string());
    }

    pub fn has_project_type(&self, label: &str) -> bool {
        self.project_types.contains(label)
    }

    /// Records the runtime version for `language`.
    ///
    /// A concrete version is only ever stored over nothing or over a
    /// `latest` placeholder; a placeholder is only stored over nothing.
    pub fn set_language_version(&mut self, language: &str, version: Option<&str>) {
        let version = version.map(str::trim).filter(|v| !v.is_empty());
        let replaceable = match &self.language_version {
            None => true,
            Some(current) => version.is_some() && is_placeholder(current),
        };

        if replaceable {
            let value = format!("{} {}", language, version.unwrap_or(LATEST));
            log::debug!("Language version set to '{}'", value);
            self.language_version = Some(value);
        }
    }

    /// Adds `name<separator>version`, or the bare name when there is no version.
    pub fn add_dependency(&mut self, name: &str, version: Option<&str>, separator: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let entry = match version.map(str::trim).filter(|v| !v.is_empty()) {
            Some(version) => format!("{}{}{}", name, separator, version),
            None => name.to_string(),
        };
        self.dependencies.insert(entry);
    }

    pub fn add_os_requirement(&mut self, requirement: &str) {
        self.os_requirements.insert(requirement.to_string());
    }

    pub fn add_env_var(&mut self, name: &str) {
        if !name.is_empty() {
            self.environment_variables.insert(name.to_string());
        }
    }

    pub fn add_port(&mut self, port: u16) {
        self.ports.insert(port);
    }

    pub fn add_note(&mut self, note: &str) {
        let note = note.trim();
        if note.is_empty() || self.notes.lines().any(|line| line == note) {
            return;
        }
        if !self.notes.is_empty() {
            self.notes.push('\n');
        }
        self.notes.push_str(note);
    }

    /// Whether nothing at all was detected.
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

fn is_placeholder(language_version: &str) -> bool {
    language_version
        .rsplit_once(' ')
        .map_or(false, |(_, version)| version == LATEST)
}
