//! `package.json` handling.

use super::{add_framework_labels, normalize_version, ANDROID_SDK, IOS_SDK};
use crate::analyzer::parsers::parse_json;
use crate::analyzer::AnalysisAccumulator;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub const REACT_NATIVE_NOTE: &str = "React Native projects require Android and iOS build tools.";

const DEPENDENCY_SECTIONS: &[&str] = &[
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
];

const FRAMEWORKS: &[(&str, &str)] = &[
    ("express", "Express"),
    ("react", "React"),
    ("react-native", "React Native"),
    ("expo", "Expo"),
    ("next", "Next.js"),
    ("vue", "Vue.js"),
    ("@angular/core", "Angular"),
    ("@nestjs/core", "NestJS"),
];

static SCRIPT_PORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:--port[=\s]+|\bPORT=)(\d{1,5})\b").expect("valid regex")
});

static SCRIPT_ENV_ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z_][A-Z0-9_]*)=").expect("valid regex"));

pub fn analyze_package_json(content: &str, acc: &mut AnalysisAccumulator) {
    acc.add_project_type("Node.js");

    let Some(manifest) = parse_json(content) else {
        log::debug!("Skipping structured extraction for unparsable package.json");
        return;
    };

    let node_version = manifest
        .pointer("/engines/node")
        .and_then(Value::as_str)
        .and_then(normalize_version);
    acc.set_language_version("Node.js", node_version.as_deref());

    let mut names = Vec::new();
    for section in DEPENDENCY_SECTIONS {
        if let Some(deps) = manifest.get(*section).and_then(Value::as_object) {
            for (name, version) in deps {
                acc.add_dependency(name, version.as_str(), "@");
                names.push(name.as_str());
            }
        }
    }
    add_framework_labels(acc, names, FRAMEWORKS);

    if acc.has_project_type("React Native") {
        acc.add_os_requirement(ANDROID_SDK);
        acc.add_os_requirement(IOS_SDK);
        acc.add_note(REACT_NATIVE_NOTE);
    }

    if let Some(scripts) = manifest.get("scripts").and_then(Value::as_object) {
        for command in scripts.values().filter_map(Value::as_str) {
            scan_script(command, acc);
        }
    }
}

/// Picks ports and `NAME=` environment assignments out of an npm script.
fn scan_script(command: &str, acc: &mut AnalysisAccumulator) {
    for cap in SCRIPT_PORT.captures_iter(command) {
        if let Some(port) = cap.get(1).and_then(|m| m.as_str().parse::<u16>().ok()) {
            acc.add_port(port);
        }
    }
    for cap in SCRIPT_ENV_ASSIGNMENT.captures_iter(command) {
        if let Some(name) = cap.get(1) {
            acc.add_env_var(name.as_str());
        }
    }
}
