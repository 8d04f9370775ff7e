//! Environment variable discovery in source files.
//!
//! The patterns overlap on purpose: the bare `$NAME` form also fires on
//! shell scripts, PHP variables and template strings, and anything it finds
//! is kept. Duplicates across patterns collapse in the returned set.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

const ENV_PATTERNS: &[&str] = &[
    // JavaScript / TypeScript
    r"process\.env\.([A-Za-z_][A-Za-z0-9_]*)",
    r#"process\.env\[\s*['"`]([A-Za-z_][A-Za-z0-9_]*)['"`]\s*\]"#,
    r"import\.meta\.env\.([A-Za-z_][A-Za-z0-9_]*)",
    // Python
    r#"os\.environ\.get\(\s*['"]([A-Za-z_][A-Za-z0-9_]*)['"]"#,
    r#"os\.environ\[\s*['"]([A-Za-z_][A-Za-z0-9_]*)['"]\s*\]"#,
    r#"os\.getenv\(\s*['"]([A-Za-z_][A-Za-z0-9_]*)['"]"#,
    // PHP
    r#"\bgetenv\(\s*['"]([A-Za-z_][A-Za-z0-9_]*)['"]"#,
    r#"\$_ENV\[\s*['"]([A-Za-z_][A-Za-z0-9_]*)['"]\s*\]"#,
    // Ruby
    r#"\bENV\[\s*['"]([A-Za-z_][A-Za-z0-9_]*)['"]\s*\]"#,
    r#"\bENV\.fetch\(\s*['"]([A-Za-z_][A-Za-z0-9_]*)['"]"#,
    // Perl
    r#"\$ENV\{\s*['"]?([A-Za-z_][A-Za-z0-9_]*)['"]?\s*\}"#,
    // Go
    r#"os\.(?:Getenv|LookupEnv)\(\s*"([A-Za-z_][A-Za-z0-9_]*)""#,
    // Rust
    r#"env::var(?:_os)?\(\s*"([A-Za-z_][A-Za-z0-9_]*)""#,
    r#"env!\(\s*"([A-Za-z_][A-Za-z0-9_]*)""#,
    // Swift
    r#"ProcessInfo\.processInfo\.environment\[\s*"([A-Za-z_][A-Za-z0-9_]*)"\s*\]"#,
    // Shell style
    r"\$\{([A-Za-z_][A-Za-z0-9_]*)",
    r"\$([A-Za-z_][A-Za-z0-9_]*)",
];

static ENV_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    ENV_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid regex"))
        .collect()
});

/// Collects every environment variable name referenced in `content`.
pub fn extract_env_vars(content: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for regex in ENV_REGEXES.iter() {
        for cap in regex.captures_iter(content) {
            if let Some(name) = cap.get(1) {
                names.insert(name.as_str().to_string());
            }
        }
    }
    names
}
