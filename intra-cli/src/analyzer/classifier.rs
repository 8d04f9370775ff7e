//! Project classification over a [`FileMap`].
//!
//! Every file is visited once. Its lower-cased path is tested against the
//! ordered [`SIGNATURES`] table and the first matching signature's handler
//! folds the file into the accumulator. Independently of that, source files
//! are scanned for environment variable references.

use super::ecosystems::{apple, dart, dotnet, go, javascript, jvm, php, python, ruby, rust};
use super::env_extractor::extract_env_vars;
use super::{AnalysisAccumulator, FileMap};

/// How a signature recognizes a path. Paths are lower-cased with `/` separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    /// The last path segment equals this name.
    FileName(&'static str),
    /// The path ends with this extension, dot included.
    Extension(&'static str),
    /// Some directory segment ends with this suffix, e.g. `.xcodeproj`.
    DirectorySuffix(&'static str),
}

impl PathPattern {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::FileName(name) => file_name(path) == *name,
            PathPattern::Extension(ext) => path.ends_with(ext),
            PathPattern::DirectorySuffix(suffix) => {
                let mut segments: Vec<&str> = path.split('/').collect();
                segments.pop();
                segments.iter().any(|segment| segment.ends_with(suffix))
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            PathPattern::FileName(name) => (*name).to_string(),
            PathPattern::Extension(ext) => format!("*{}", ext),
            PathPattern::DirectorySuffix(suffix) => format!("*{}/", suffix),
        }
    }
}

pub type Handler = fn(&str, &mut AnalysisAccumulator);

/// One row of the signature table.
pub struct Signature {
    pub ecosystem: &'static str,
    pub patterns: &'static [PathPattern],
    pub handler: Handler,
}

/// Manifest signatures in priority order; the first match wins per file.
pub static SIGNATURES: &[Signature] = &[
    Signature {
        ecosystem: "Node.js",
        patterns: &[PathPattern::FileName("package.json")],
        handler: javascript::analyze_package_json,
    },
    Signature {
        ecosystem: "Python",
        patterns: &[PathPattern::FileName("requirements.txt")],
        handler: python::analyze_requirements_txt,
    },
    Signature {
        ecosystem: "Python (Pipenv)",
        patterns: &[PathPattern::FileName("pipfile")],
        handler: python::analyze_pipfile,
    },
    Signature {
        ecosystem: "Python (pyproject)",
        patterns: &[PathPattern::FileName("pyproject.toml")],
        handler: python::analyze_pyproject,
    },
    Signature {
        ecosystem: "Java (Maven)",
        patterns: &[PathPattern::FileName("pom.xml")],
        handler: jvm::analyze_pom,
    },
    Signature {
        ecosystem: "Java / Android (Gradle)",
        patterns: &[
            PathPattern::FileName("build.gradle"),
            PathPattern::FileName("build.gradle.kts"),
        ],
        handler: jvm::analyze_gradle,
    },
    Signature {
        ecosystem: "Go",
        patterns: &[PathPattern::FileName("go.mod")],
        handler: go::analyze_go_mod,
    },
    Signature {
        ecosystem: "Ruby",
        patterns: &[PathPattern::FileName("gemfile")],
        handler: ruby::analyze_gemfile,
    },
    Signature {
        ecosystem: "PHP",
        patterns: &[PathPattern::FileName("composer.json")],
        handler: php::analyze_composer_json,
    },
    Signature {
        ecosystem: ".NET",
        patterns: &[PathPattern::Extension(".csproj")],
        handler: dotnet::analyze_csproj,
    },
    Signature {
        ecosystem: "Rust",
        patterns: &[PathPattern::FileName("cargo.toml")],
        handler: rust::analyze_cargo_toml,
    },
    Signature {
        ecosystem: "Dart / Flutter",
        patterns: &[PathPattern::FileName("pubspec.yaml")],
        handler: dart::analyze_pubspec,
    },
    Signature {
        ecosystem: "Swift (SwiftPM)",
        patterns: &[PathPattern::FileName("package.swift")],
        handler: apple::analyze_package_swift,
    },
    Signature {
        ecosystem: "iOS (CocoaPods)",
        patterns: &[PathPattern::FileName("podfile")],
        handler: apple::analyze_podfile,
    },
    Signature {
        ecosystem: "iOS (Xcode)",
        patterns: &[
            PathPattern::DirectorySuffix(".xcodeproj"),
            PathPattern::DirectorySuffix(".xcworkspace"),
            PathPattern::Extension(".pbxproj"),
        ],
        handler: apple::analyze_xcode_project,
    },
    Signature {
        ecosystem: "Swift",
        patterns: &[PathPattern::Extension(".swift")],
        handler: apple::analyze_swift_source,
    },
];

/// Extensions whose content is scanned for environment variable references.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".ts", ".tsx", ".py", ".rb", ".php", ".sh", ".pl", ".go", ".rs", ".swift",
];

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/").to_lowercase()
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// First signature matching `path`, if any.
pub fn match_signature(path: &str) -> Option<&'static Signature> {
    let path = normalize_path(path);
    SIGNATURES
        .iter()
        .find(|signature| signature.patterns.iter().any(|p| p.matches(&path)))
}

pub fn is_source_file(path: &str) -> bool {
    let path = normalize_path(path);
    SOURCE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Whether classification would look at this path at all.
pub fn is_relevant_path(path: &str) -> bool {
    match_signature(path).is_some() || is_source_file(path)
}

/// Runs every file through the signature table and the environment scan.
pub fn classify(files: &FileMap) -> AnalysisAccumulator {
    let mut acc = AnalysisAccumulator::new();
    if files.is_empty() {
        log::warn!("No files to classify");
        return acc;
    }

    log::info!("Classifying {} files", files.len());
    for (path, content) in files.iter() {
        if let Some(signature) = match_signature(path) {
            log::debug!("{} matched {} signature", path, signature.ecosystem);
            (signature.handler)(content, &mut acc);
        }

        if is_source_file(path) {
            for name in extract_env_vars(content) {
                acc.add_env_var(&name);
            }
        }
    }

    log::info!(
        "Detected project types: {:?}",
        acc.project_types.iter().collect::<Vec<_>>()
    );
    acc
}

/// `(ecosystem, patterns)` rows in priority order, for listing what is recognized.
pub fn supported_signatures() -> Vec<(&'static str, Vec<String>)> {
    SIGNATURES
        .iter()
        .map(|s| (s.ecosystem, s.patterns.iter().map(PathPattern::describe).collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(entries: &[(&str, &str)]) -> FileMap {
        entries.iter().map(|(p, c)| (*p, *c)).collect()
    }

    #[test]
    fn test_signature_matching_is_case_insensitive() {
        assert_eq!(match_signature("Gemfile").map(|s| s.ecosystem), Some("Ruby"));
        assert_eq!(match_signature("api/Pipfile").map(|s| s.ecosystem), Some("Python (Pipenv)"));
        assert_eq!(match_signature("Cargo.toml").map(|s| s.ecosystem), Some("Rust"));
        assert_eq!(match_signature(r"src\App\App.csproj").map(|s| s.ecosystem), Some(".NET"));
        assert!(match_signature("README.md").is_none());
        assert!(match_signature("mypackage.json").is_none());
    }

    #[test]
    fn test_xcode_bundle_takes_precedence_over_swift_source() {
        let signature = match_signature("App.xcodeproj/project.pbxproj");
        assert_eq!(signature.map(|s| s.ecosystem), Some("iOS (Xcode)"));
        let signature = match_signature("App.xcworkspace/contents.xcworkspacedata");
        assert_eq!(signature.map(|s| s.ecosystem), Some("iOS (Xcode)"));
        let signature = match_signature("Sources/App/main.swift");
        assert_eq!(signature.map(|s| s.ecosystem), Some("Swift"));
    }

    #[test]
    fn test_relevant_paths() {
        assert!(is_relevant_path("go.mod"));
        assert!(is_relevant_path("cmd/server/main.go"));
        assert!(is_relevant_path("scripts/deploy.sh"));
        assert!(!is_relevant_path("README.md"));
        assert!(!is_relevant_path("assets/logo.png"));
    }

    #[test]
    fn test_env_vars_from_source_files_only() {
        let acc = classify(&files(&[
            ("server.js", "const url = process.env.DB_URL;"),
            ("notes.txt", "process.env.IGNORED"),
            ("app.py", "key = os.environ.get('API_KEY')"),
        ]));
        assert_eq!(
            acc.environment_variables.iter().collect::<Vec<_>>(),
            vec!["API_KEY", "DB_URL"]
        );
    }

    #[test]
    fn test_graceful_degradation() {
        let acc = classify(&files(&[
            ("package.json", "{ this is not json"),
            ("go.mod", "module x\n\ngo 1.21\n"),
        ]));
        assert!(acc.has_project_type("Go"));
        assert!(acc.has_project_type("Node.js"));
        assert_eq!(acc.language_version.as_deref(), Some("Go 1.21"));
    }

    #[test]
    fn test_empty_and_unrecognized() {
        assert!(classify(&FileMap::new()).is_empty());
        assert!(classify(&files(&[("LICENSE", "MIT")])).is_empty());
    }

    #[test]
    fn test_android_gradle_module() {
        let acc = classify(&files(&[(
            "app/build.gradle.kts",
            "plugins { id(\"com.android.library\") }",
        )]));
        assert!(acc.has_project_type("Android"));
        assert!(acc.has_project_type("Gradle"));
    }

    #[test]
    fn test_supported_signatures_listing() {
        let rows = supported_signatures();
        assert_eq!(rows.len(), SIGNATURES.len());
        assert_eq!(rows[0].0, "Node.js");
        assert!(rows.iter().any(|(_, p)| p.contains(&"*.xcodeproj/".to_string())));
    }
}
