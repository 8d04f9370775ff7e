use crate::config::AnalysisConfig;
use crate::error::{IntraError, SecurityError};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Validates a project path and ensures it is a readable directory
pub fn validate_project_path(path: &Path) -> Result<PathBuf, IntraError> {
    let canonical = match path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            if path.exists() {
                path.to_path_buf()
            } else {
                return Err(SecurityError::InvalidPath(format!(
                    "Invalid path '{}': {}",
                    path.display(),
                    e
                ))
                .into());
            }
        }
    };

    if !canonical.is_dir() {
        return Err(SecurityError::InvalidPath("Path is not a directory".to_string()).into());
    }

    Ok(canonical)
}

/// Collects the files below `root` that pass `keep`, honoring ignore patterns and size limits
pub fn collect_project_files<F>(
    root: &Path,
    config: &AnalysisConfig,
    keep: F,
) -> Result<Vec<PathBuf>, IntraError>
where
    F: Fn(&Path) -> bool,
{
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(config.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored(e, &config.ignore_patterns, root))
    {
        let entry = entry?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if let Ok(metadata) = entry.metadata() {
            if metadata.len() > config.max_file_size as u64 {
                log::debug!("Skipping large file: {}", path.display());
                continue;
            }
        }

        if keep(&get_relative_path(root, path)) {
            files.push(path.to_path_buf());
        }
    }

    log::debug!("Collected {} relevant files", files.len());
    Ok(files)
}

/// Checks if a directory entry should be ignored
fn is_ignored(entry: &DirEntry, ignore_patterns: &[String], root: &Path) -> bool {
    let relative_path = match entry.path().strip_prefix(root) {
        Ok(rel) => rel,
        Err(_) => return false,
    };

    for component in relative_path.components() {
        if let Component::Normal(name) = component {
            if let Some(name_str) = name.to_str() {
                if ignore_patterns.iter().any(|pattern| name_str == pattern) {
                    return true;
                }

                // Hidden entries are skipped, except the env files
                if name_str.starts_with('.') && !name_str.starts_with(".env") {
                    return true;
                }
            }
        }
    }

    false
}

/// Reads file content safely with size limits
pub fn read_file_safe(path: &Path, max_size: usize) -> Result<String, IntraError> {
    let metadata = fs::metadata(path)?;

    if metadata.len() > max_size as u64 {
        return Err(
            SecurityError::InvalidPath(format!("File too large: {}", path.display())).into(),
        );
    }

    Ok(fs::read_to_string(path)?)
}

/// Gets the relative path from root to target
pub fn get_relative_path(root: &Path, target: &Path) -> PathBuf {
    target.strip_prefix(root).unwrap_or(target).to_path_buf()
}

/// Renders a relative path with forward slashes, the way bundle headers spell them
pub fn to_bundle_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
