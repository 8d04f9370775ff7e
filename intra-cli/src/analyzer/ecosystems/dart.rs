//! `pubspec.yaml` handling for Dart packages and Flutter apps.

use super::{normalize_version, ANDROID_SDK, IOS_SDK};
use crate::analyzer::parsers::parse_yaml;
use crate::analyzer::AnalysisAccumulator;
use serde_yaml::Value;

pub const FLUTTER_NOTE: &str = "Flutter projects require Android and iOS build tools.";

pub fn analyze_pubspec(content: &str, acc: &mut AnalysisAccumulator) {
    acc.add_project_type("Dart");

    let Some(pubspec) = parse_yaml(content) else {
        acc.set_language_version("Dart", None);
        return;
    };

    let sdk = pubspec
        .get("environment")
        .and_then(|env| env.get("sdk"))
        .and_then(Value::as_str)
        .and_then(normalize_version);
    acc.set_language_version("Dart", sdk.as_deref());

    let flutter = pubspec
        .get("dependencies")
        .and_then(|deps| deps.get("flutter"))
        .is_some();
    if flutter {
        acc.add_project_type("Flutter");
        acc.add_os_requirement(ANDROID_SDK);
        acc.add_os_requirement(IOS_SDK);
        acc.add_note(FLUTTER_NOTE);
    }

    for section in ["dependencies", "dev_dependencies"] {
        let Some(packages) = pubspec.get(section).and_then(Value::as_mapping) else {
            continue;
        };
        for (name, spec) in packages {
            let Some(name) = name.as_str() else {
                continue;
            };
            acc.add_dependency(name, spec.as_str(), ":");
        }
    }
}
