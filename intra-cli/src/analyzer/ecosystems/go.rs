//! `go.mod` handling.

use super::add_framework_labels;
use crate::analyzer::AnalysisAccumulator;

const FRAMEWORKS: &[(&str, &str)] = &[
    ("github.com/gin-gonic/gin", "Gin"),
    ("github.com/labstack/echo/v4", "Echo"),
    ("github.com/gofiber/fiber/v2", "Fiber"),
];

pub fn analyze_go_mod(content: &str, acc: &mut AnalysisAccumulator) {
    acc.add_project_type("Go");

    let mut go_version = None;
    let mut modules = Vec::new();
    let mut in_require_block = false;

    for line in content.lines() {
        let line = strip_comment(line);
        if line.is_empty() {
            continue;
        }

        if in_require_block {
            if line == ")" {
                in_require_block = false;
            } else {
                modules.extend(parse_requirement(line));
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("require") {
            let rest = rest.trim();
            if rest == "(" {
                in_require_block = true;
            } else {
                modules.extend(parse_requirement(rest));
            }
        } else if let Some(version) = line.strip_prefix("go ") {
            go_version.get_or_insert_with(|| version.trim().to_string());
        }
    }

    acc.set_language_version("Go", go_version.as_deref());
    for (module, version) in &modules {
        acc.add_dependency(module, Some(version), "@");
    }
    add_framework_labels(acc, modules.iter().map(|(m, _)| m.as_str()), FRAMEWORKS);
}

/// Drops `//` comments, including `// indirect` markers.
fn strip_comment(line: &str) -> &str {
    line.split("//").next().unwrap_or_default().trim()
}

fn parse_requirement(line: &str) -> Option<(String, String)> {
    let mut parts = line.split_whitespace();
    let module = parts.next()?;
    let version = parts.next()?;
    Some((module.to_string(), version.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_require() {
        let mut acc = AnalysisAccumulator::new();
        analyze_go_mod("module example.com/app\n\ngo 1.21\n\nrequire foo/bar v1.2.3\n", &mut acc);

        assert_eq!(acc.language_version.as_deref(), Some("Go 1.21"));
        assert!(acc.dependencies.contains("foo/bar@v1.2.3"));
        assert!(acc.has_project_type("Go"));
    }

    #[test]
    fn test_require_block() {
        let mut acc = AnalysisAccumulator::new();
        analyze_go_mod(
            r#"module example.com/api

go 1.22.1

require (
	github.com/gin-gonic/gin v1.9.1
	golang.org/x/text v0.14.0 // indirect
)
"#,
            &mut acc,
        );

        assert_eq!(acc.language_version.as_deref(), Some("Go 1.22.1"));
        assert!(acc.has_project_type("Gin"));
        let deps: Vec<_> = acc.dependencies.iter().map(String::as_str).collect();
        assert_eq!(
            deps,
            vec!["github.com/gin-gonic/gin@v1.9.1", "golang.org/x/text@v0.14.0"]
        );
    }

    #[test]
    fn test_missing_go_directive() {
        let mut acc = AnalysisAccumulator::new();
        analyze_go_mod("module example.com/tool\n", &mut acc);
        assert_eq!(acc.language_version.as_deref(), Some("Go latest"));
        assert!(acc.dependencies.is_empty());
    }
}
