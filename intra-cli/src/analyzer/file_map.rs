//! Relative path → content mapping shared by every analysis stage.

use crate::common::file_utils::{
    collect_project_files, get_relative_path, read_file_safe, to_bundle_path,
    validate_project_path,
};
use crate::config::AnalysisConfig;
use crate::error::Result;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::path::Path;

/// Files of one repository, keyed by their relative path.
///
/// Ordered by path so a given set of files is always visited in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMap {
    files: BTreeMap<String, String>,
}

impl FileMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first content seen for a path wins; repeats are dropped.
    pub(crate) fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        match self.files.entry(path.into()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(content.into());
            }
            btree_map::Entry::Occupied(existing) => {
                log::debug!("Ignoring repeated section for {}", existing.key());
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Builds a file map straight from a local checkout, without going through the bundler.
    ///
    /// Only files the classifier or the environment-variable scan would look
    /// at are read. Files that are not valid UTF-8 are skipped.
    pub fn from_directory(root: &Path, config: &AnalysisConfig) -> Result<Self> {
        let root = validate_project_path(root)?;
        log::info!("Reading repository files from {}", root.display());

        let paths = collect_project_files(&root, config, |relative| {
            super::classifier::is_relevant_path(&to_bundle_path(relative))
        })?;

        let mut files = FileMap::new();
        for path in paths {
            match read_file_safe(&path, config.max_file_size) {
                Ok(content) => {
                    let relative = to_bundle_path(&get_relative_path(&root, &path));
                    files.insert(relative, content);
                }
                Err(e) => log::debug!("Skipping unreadable file {}: {}", path.display(), e),
            }
        }

        log::debug!("Loaded {} files from directory", files.len());
        Ok(files)
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for FileMap {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut files = FileMap::new();
        for (path, content) in iter {
            files.insert(path, content);
        }
        files
    }
}

impl IntoIterator for FileMap {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_iterator_and_lookup() {
        let files: FileMap = vec![("b.txt", "b"), ("a.txt", "a"), ("b.txt", "bb")]
            .into_iter()
            .collect();

        assert_eq!(files.len(), 2);
        assert_eq!(files.get("b.txt"), Some("b"));
        assert_eq!(files.paths().collect::<Vec<_>>(), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_from_directory_reads_relevant_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("cmd/server")).unwrap();
        fs::write(root.join("go.mod"), "module example.com/app\n\ngo 1.22\n").unwrap();
        fs::write(root.join("cmd/server/main.go"), "package main").unwrap();
        fs::write(root.join("README.md"), "# App").unwrap();
        fs::write(root.join("logo.png"), [0x89u8, 0x50, 0x4e, 0x47]).unwrap();

        let files = FileMap::from_directory(root, &AnalysisConfig::default()).unwrap();

        assert_eq!(
            files.paths().collect::<Vec<_>>(),
            vec!["cmd/server/main.go", "go.mod"]
        );
        assert!(files.get("go.mod").unwrap().contains("go 1.22"));
    }

    #[test]
    fn test_from_directory_rejects_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        assert!(FileMap::from_directory(&temp_dir.path().join("nope"), &AnalysisConfig::default()).is_err());
    }
}
