//! Swift packages, CocoaPods and Xcode projects.

use crate::analyzer::AnalysisAccumulator;
use once_cell::sync::Lazy;
use regex::Regex;

pub const IOS_NOTE: &str = "iOS projects require macOS with Xcode to build.";
pub const MACOS: &str = "macOS";

static TOOLS_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"swift-tools-version\s*:\s*(\d+(?:\.\d+)*)").expect("valid regex")
});

static SWIFT_PACKAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\.package\(\s*url:\s*"([^"]+)"(?:\s*,\s*(?:from|exact|branch|revision)?:?\s*"([^"]+)")?"#,
    )
    .expect("valid regex")
});

static POD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*pod\s+['"]([^'"]+)['"](?:\s*,\s*['"]([^'"]+)['"])?"#)
        .expect("valid regex")
});

pub fn analyze_package_swift(content: &str, acc: &mut AnalysisAccumulator) {
    acc.add_project_type("Swift");

    let tools = TOOLS_VERSION.captures(content).map(|cap| cap[1].to_string());
    acc.set_language_version("Swift", tools.as_deref());

    for cap in SWIFT_PACKAGE.captures_iter(content) {
        acc.add_dependency(&cap[1], cap.get(2).map(|v| v.as_str()), "@");
    }
}

/// Loose `.swift` sources outside any recognized manifest.
pub fn analyze_swift_source(_content: &str, acc: &mut AnalysisAccumulator) {
    acc.add_project_type("Swift");
    acc.set_language_version("Swift", None);
}

pub fn analyze_podfile(content: &str, acc: &mut AnalysisAccumulator) {
    mark_ios(acc);
    for cap in POD.captures_iter(content) {
        acc.add_dependency(&cap[1], cap.get(2).map(|v| v.as_str()), "@");
    }
}

/// Files inside `.xcodeproj` / `.xcworkspace` bundles and `.pbxproj` files.
pub fn analyze_xcode_project(_content: &str, acc: &mut AnalysisAccumulator) {
    mark_ios(acc);
}

fn mark_ios(acc: &mut AnalysisAccumulator) {
    acc.add_project_type("iOS");
    acc.add_os_requirement(MACOS);
    acc.add_note(IOS_NOTE);
}
