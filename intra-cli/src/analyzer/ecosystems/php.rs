//! `composer.json` handling.

use super::{add_framework_labels, normalize_version};
use crate::analyzer::parsers::parse_json;
use crate::analyzer::AnalysisAccumulator;
use serde_json::Value;

const FRAMEWORKS: &[(&str, &str)] = &[
    ("laravel/framework", "Laravel"),
    ("symfony/framework-bundle", "Symfony"),
];

pub fn analyze_composer_json(content: &str, acc: &mut AnalysisAccumulator) {
    acc.add_project_type("PHP");

    let Some(manifest) = parse_json(content) else {
        acc.set_language_version("PHP", None);
        return;
    };

    let php = manifest
        .pointer("/require/php")
        .and_then(Value::as_str)
        .and_then(normalize_version);
    acc.set_language_version("PHP", php.as_deref());

    let mut names = Vec::new();
    for section in ["require", "require-dev"] {
        let Some(packages) = manifest.get(section).and_then(Value::as_object) else {
            continue;
        };
        // Platform requirements describe the runtime, not installable packages.
        for (name, version) in packages
            .iter()
            .filter(|(name, _)| name.as_str() != "php" && !name.starts_with("ext-"))
        {
            acc.add_dependency(name, version.as_str(), ":");
            names.push(name.as_str());
        }
    }
    add_framework_labels(acc, names, FRAMEWORKS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composer_manifest() {
        let mut acc = AnalysisAccumulator::new();
        analyze_composer_json(
            r#"{
  "require": {"php": "^8.2", "ext-mbstring": "*", "laravel/framework": "^10.10"},
  "require-dev": {"phpunit/phpunit": "^10.1"}
}"#,
            &mut acc,
        );

        assert!(acc.has_project_type("Laravel"));
        assert_eq!(acc.language_version.as_deref(), Some("PHP 8.2"));
        let deps: Vec<_> = acc.dependencies.iter().map(String::as_str).collect();
        assert_eq!(deps, vec!["laravel/framework:^10.10", "phpunit/phpunit:^10.1"]);
    }

    #[test]
    fn test_invalid_manifest() {
        let mut acc = AnalysisAccumulator::new();
        analyze_composer_json("not json", &mut acc);
        assert!(acc.has_project_type("PHP"));
        assert_eq!(acc.language_version.as_deref(), Some("PHP latest"));
    }
}
