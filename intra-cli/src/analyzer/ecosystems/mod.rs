//! Manifest handlers, one module per ecosystem.
//!
//! Each handler receives a matched file's content and folds what it finds
//! into the accumulator. Handlers never fail: when a manifest cannot be
//! parsed, the labels implied by the file name are still recorded.

pub mod apple;
pub mod dart;
pub mod dotnet;
pub mod go;
pub mod javascript;
pub mod jvm;
pub mod php;
pub mod python;
pub mod ruby;
pub mod rust;

use super::AnalysisAccumulator;
use once_cell::sync::Lazy;
use regex::Regex;

/// OS requirement shared by the mobile cross-platform frameworks.
pub const ANDROID_SDK: &str = "Android SDK";
/// OS requirement shared by the mobile cross-platform frameworks.
pub const IOS_SDK: &str = "iOS SDK (Xcode)";

static VERSION_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)*").expect("valid regex"));

/// Pulls the first numeric version out of a constraint such as `>=16.0.0`, `^3.0.0 <4.0.0` or `net8.0`.
pub fn normalize_version(raw: &str) -> Option<String> {
    VERSION_NUMBER
        .find(raw)
        .map(|m| m.as_str().to_string())
}

/// Adds the label of every `(dependency, label)` pair whose dependency is present.
pub fn add_framework_labels<'a, I>(acc: &mut AnalysisAccumulator, dependencies: I, table: &[(&str, &str)])
where
    I: IntoIterator<Item = &'a str>,
{
    let dependencies: Vec<String> = dependencies.into_iter().map(str::to_lowercase).collect();
    for (dependency, label) in table {
        if dependencies.iter().any(|d| d == dependency) {
            log::debug!("Detected {} from dependency '{}'", label, dependency);
            acc.add_project_type(label);
        }
    }
}
