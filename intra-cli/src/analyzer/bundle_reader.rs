//! # Bundle Reader
//!
//! Turns the repository bundler's flattened text output back into a [`FileMap`].
//!
//! The expected layout is a `Repository Files` section followed by one
//! section per file:
//!
//! ```text
//! ================
//! File: src/index.js
//! ================
//! console.log("hello");
//! ```
//!
//! A line of exactly 16 `=` characters, a `File:` line and another 16 `=`
//! line inside a file's own content is read as the start of a new file.
//! When a path appears in more than one section, only the first is kept.

use super::FileMap;
use crate::error::{AnalysisError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Heading that opens the file listing in a bundle.
pub const REPOSITORY_FILES_ANCHOR: &str = "Repository Files";

static FILE_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^={16}\r?\nFile: ([^\r\n]*)\r?\n={16}\r?$").expect("valid regex")
});

/// A bundler output layout that can be read back into files.
pub trait BundleFormat {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Splits `content` into files. Fails only when the bundle is structurally unreadable.
    fn read(&self, content: &str) -> Result<FileMap>;
}

/// The plain-text layout with `=`-delimited `File:` headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedTextBundle;

impl BundleFormat for DelimitedTextBundle {
    fn name(&self) -> &'static str {
        "delimited-text"
    }

    fn read(&self, content: &str) -> Result<FileMap> {
        let anchor = content.find(REPOSITORY_FILES_ANCHOR).ok_or_else(|| {
            AnalysisError::Format(format!(
                "the bundle has no '{}' section",
                REPOSITORY_FILES_ANCHOR
            ))
        })?;
        let body = &content[anchor + REPOSITORY_FILES_ANCHOR.len()..];

        let headers: Vec<(usize, usize, &str)> = FILE_HEADER
            .captures_iter(body)
            .filter_map(|cap| {
                let whole = cap.get(0)?;
                let path = cap.get(1)?.as_str();
                Some((whole.start(), whole.end(), path))
            })
            .collect();

        let mut files = FileMap::new();
        for (index, (_, content_start, path)) in headers.iter().enumerate() {
            let content_end = headers
                .get(index + 1)
                .map_or(body.len(), |(next_start, _, _)| *next_start);

            let path = path.trim();
            if path.is_empty() {
                log::debug!("Skipping file section without a path");
                continue;
            }

            files.insert(path, body[*content_start..content_end].trim());
        }

        if files.is_empty() {
            log::warn!("Bundle contained no file sections");
        } else {
            log::debug!("Read {} files from {} bundle", files.len(), self.name());
        }

        Ok(files)
    }
}

/// Reads a bundle in the default delimited-text layout.
pub fn read_bundle(content: &str) -> Result<FileMap> {
    DelimitedTextBundle.read(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntraError;

    const SEPARATOR: &str = "================";

    fn section(path: &str, content: &str) -> String {
        format!("{SEPARATOR}\nFile: {path}\n{SEPARATOR}\n{content}\n\n")
    }

    fn bundle(sections: &[(&str, &str)]) -> String {
        let mut out = String::from(
            "This file is a merged representation of the entire codebase.\n\n\
             ================================================================\n\
             Repository Files\n\
             ================================================================\n\n",
        );
        for (path, content) in sections {
            out.push_str(&section(path, content));
        }
        out
    }

    #[test]
    fn test_reads_file_sections() {
        let text = bundle(&[
            ("package.json", "{\"name\": \"app\"}"),
            ("src/index.js", "const x = 1;\n\nconsole.log(x);"),
        ]);

        let files = read_bundle(&text).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files.get("package.json"), Some("{\"name\": \"app\"}"));
        assert_eq!(files.get("src/index.js"), Some("const x = 1;\n\nconsole.log(x);"));
    }

    #[test]
    fn test_trims_path_and_content() {
        let text = format!(
            "Repository Files\n{SEPARATOR}\nFile:   go.mod  \n{SEPARATOR}\n\n   module x\n\n"
        );
        let files = read_bundle(&text).unwrap();
        assert_eq!(files.get("go.mod"), Some("module x"));
    }

    #[test]
    fn test_repeated_path_keeps_first_section() {
        let text = bundle(&[("go.mod", "module first"), ("go.mod", "module second")]);
        let files = read_bundle(&text).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files.get("go.mod"), Some("module first"));
    }

    #[test]
    fn test_missing_anchor_is_format_error() {
        let text = section("package.json", "{}");
        let err = read_bundle(&text).unwrap_err();
        assert!(matches!(err, IntraError::Analysis(AnalysisError::Format(_))));
    }

    #[test]
    fn test_anchor_without_sections_is_empty() {
        let files = read_bundle(&bundle(&[])).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_wider_separator_lines_are_content() {
        let content = "title\n================================\nbody";
        let files = read_bundle(&bundle(&[("notes.txt", content), ("b.txt", "b")])).unwrap();
        assert_eq!(files.get("notes.txt"), Some(content));
        assert_eq!(files.get("b.txt"), Some("b"));
    }

    #[test]
    fn test_crlf_bundle() {
        let text = bundle(&[("a.py", "print(1)")]).replace('\n', "\r\n");
        let files = read_bundle(&text).unwrap();
        assert_eq!(files.get("a.py"), Some("print(1)"));
    }
}
