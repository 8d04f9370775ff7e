//! Python manifests: `requirements.txt`, `Pipfile` and `pyproject.toml`.

use super::{add_framework_labels, normalize_version};
use crate::analyzer::parsers::parse_toml;
use crate::analyzer::AnalysisAccumulator;

const FRAMEWORKS: &[(&str, &str)] = &[
    ("flask", "Flask"),
    ("django", "Django"),
    ("fastapi", "FastAPI"),
];

/// Characters that end a package name in a requirement specifier.
const SPECIFIER_START: &[char] = &['=', '<', '>', '!', '~', '[', ';', '@', ' '];

pub fn analyze_requirements_txt(content: &str, acc: &mut AnalysisAccumulator) {
    acc.add_project_type("Python");
    acc.set_language_version("Python", None);

    let mut names = Vec::new();
    for line in content.lines() {
        let Some(requirement) = clean_requirement(line) else {
            continue;
        };
        names.push(package_name(&requirement).to_string());
        acc.add_dependency(&requirement, None, "");
    }
    add_framework_labels(acc, names.iter().map(String::as_str), FRAMEWORKS);
}

pub fn analyze_pipfile(content: &str, acc: &mut AnalysisAccumulator) {
    acc.add_project_type("Python");
    acc.add_project_type("Pipenv");

    let Some(pipfile) = parse_toml(content) else {
        acc.set_language_version("Python", None);
        return;
    };

    let python = pipfile
        .get("requires")
        .and_then(|r| r.get("python_full_version").or_else(|| r.get("python_version")))
        .and_then(toml::Value::as_str)
        .and_then(normalize_version);
    acc.set_language_version("Python", python.as_deref());

    let mut names = Vec::new();
    for section in ["packages", "dev-packages"] {
        if let Some(packages) = pipfile.get(section).and_then(toml::Value::as_table) {
            for (name, spec) in packages {
                add_pinned(acc, name, toml_spec(spec));
                names.push(name.clone());
            }
        }
    }
    add_framework_labels(acc, names.iter().map(String::as_str), FRAMEWORKS);
}

pub fn analyze_pyproject(content: &str, acc: &mut AnalysisAccumulator) {
    acc.add_project_type("Python");

    let Some(pyproject) = parse_toml(content) else {
        acc.set_language_version("Python", None);
        return;
    };

    let mut names = Vec::new();
    let mut python = None;

    if let Some(project) = pyproject.get("project") {
        python = project
            .get("requires-python")
            .and_then(toml::Value::as_str)
            .and_then(normalize_version);

        let optional = project
            .get("optional-dependencies")
            .and_then(toml::Value::as_table)
            .into_iter()
            .flat_map(|groups| groups.values());
        let lists = project.get("dependencies").into_iter().chain(optional);

        for requirement in lists
            .filter_map(toml::Value::as_array)
            .flatten()
            .filter_map(toml::Value::as_str)
            .filter_map(clean_requirement)
        {
            names.push(package_name(&requirement).to_string());
            acc.add_dependency(&requirement, None, "");
        }
    }

    if let Some(poetry) = pyproject.get("tool").and_then(|t| t.get("poetry")) {
        acc.add_project_type("Poetry");

        let groups = poetry
            .get("group")
            .and_then(toml::Value::as_table)
            .into_iter()
            .flat_map(|groups| groups.values())
            .filter_map(|group| group.get("dependencies"));
        let tables = poetry
            .get("dependencies")
            .into_iter()
            .chain(poetry.get("dev-dependencies"))
            .chain(groups)
            .filter_map(toml::Value::as_table);

        for table in tables {
            for (name, spec) in table {
                if name == "python" {
                    if python.is_none() {
                        python = spec.as_str().and_then(normalize_version);
                    }
                    continue;
                }
                add_pinned(acc, name, toml_spec(spec));
                names.push(name.clone());
            }
        }
    }

    acc.set_language_version("Python", python.as_deref());
    add_framework_labels(acc, names.iter().map(String::as_str), FRAMEWORKS);
}

/// Strips comments, options and environment markers from one requirement line.
fn clean_requirement(line: &str) -> Option<String> {
    let line = line.split(" #").next().unwrap_or_default();
    let line = line.split(';').next().unwrap_or_default().trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
        return None;
    }
    Some(line.split_whitespace().collect())
}

fn package_name(requirement: &str) -> &str {
    requirement
        .split(SPECIFIER_START)
        .next()
        .unwrap_or(requirement)
        .trim()
}

/// Version string of a Pipfile / Poetry entry, either `"1.0"` or `{ version = "1.0" }`.
fn toml_spec(spec: &toml::Value) -> Option<&str> {
    spec.as_str()
        .or_else(|| spec.get("version").and_then(toml::Value::as_str))
}

/// Records `name==version`, keeping an explicit comparator when one is given.
fn add_pinned(acc: &mut AnalysisAccumulator, name: &str, spec: Option<&str>) {
    match spec.map(str::trim) {
        None | Some("") | Some("*") => acc.add_dependency(name, None, ""),
        Some(spec) if spec.starts_with(['=', '<', '>', '!', '~']) => {
            acc.add_dependency(name, Some(spec), "")
        }
        Some(spec) => acc.add_dependency(name, Some(spec), "=="),
    }
}
