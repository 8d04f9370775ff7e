//! `Cargo.toml` handling.

use super::{add_framework_labels, normalize_version};
use crate::analyzer::parsers::parse_toml;
use crate::analyzer::AnalysisAccumulator;
use toml::Value;

const FRAMEWORKS: &[(&str, &str)] = &[
    ("actix-web", "Actix Web"),
    ("axum", "Axum"),
    ("rocket", "Rocket"),
];

const DEPENDENCY_TABLES: &[&str] = &["dependencies", "dev-dependencies", "build-dependencies"];

pub fn analyze_cargo_toml(content: &str, acc: &mut AnalysisAccumulator) {
    acc.add_project_type("Rust");

    let Some(manifest) = parse_toml(content) else {
        acc.set_language_version("Rust", None);
        return;
    };

    let rust = manifest
        .get("package")
        .and_then(|p| p.get("rust-version"))
        .or_else(|| {
            manifest
                .get("workspace")
                .and_then(|w| w.get("package"))
                .and_then(|p| p.get("rust-version"))
        })
        .and_then(Value::as_str)
        .and_then(normalize_version);
    acc.set_language_version("Rust", rust.as_deref());

    let workspace_deps = manifest
        .get("workspace")
        .and_then(|w| w.get("dependencies"));
    let tables = DEPENDENCY_TABLES
        .iter()
        .filter_map(|name| manifest.get(*name))
        .chain(workspace_deps)
        .filter_map(Value::as_table);

    let mut names = Vec::new();
    for table in tables {
        for (name, spec) in table {
            acc.add_dependency(name, crate_version(spec), "=");
            names.push(name.as_str());
        }
    }
    add_framework_labels(acc, names, FRAMEWORKS);
}

/// `"1.0"` or `{ version = "1.0", ... }`; path and git dependencies have none.
fn crate_version(spec: &Value) -> Option<&str> {
    spec.as_str()
        .or_else(|| spec.get("version").and_then(Value::as_str))
}
