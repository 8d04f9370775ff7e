//! `Gemfile` handling.

use super::{add_framework_labels, normalize_version};
use crate::analyzer::AnalysisAccumulator;
use once_cell::sync::Lazy;
use regex::Regex;

const FRAMEWORKS: &[(&str, &str)] = &[("rails", "Rails"), ("sinatra", "Sinatra")];

static RUBY_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^\s*ruby\s+['"]([^'"]+)['"]"#).expect("valid regex"));

static GEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*gem\s+['"]([^'"]+)['"](?:\s*,\s*['"]([^'"]+)['"])?"#)
        .expect("valid regex")
});

pub fn analyze_gemfile(content: &str, acc: &mut AnalysisAccumulator) {
    acc.add_project_type("Ruby");

    let ruby = RUBY_DIRECTIVE
        .captures(content)
        .and_then(|cap| normalize_version(&cap[1]));
    acc.set_language_version("Ruby", ruby.as_deref());

    let mut names = Vec::new();
    for cap in GEM.captures_iter(content) {
        let name = &cap[1];
        acc.add_dependency(name, cap.get(2).map(|v| v.as_str()), "@");
        names.push(name.to_string());
    }
    add_framework_labels(acc, names.iter().map(String::as_str), FRAMEWORKS);
}
