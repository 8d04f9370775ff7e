//! # Display Module
//!
//! Terminal rendering of an [`AnalysisResult`]. Every view is rendered to a
//! `String` first so the CLI can print it and tests can inspect it.

use crate::analyzer::AnalysisResult;
use crate::error::Result;
use colored::*;

/// Display mode for analysis output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Pretty-printed JSON, the same shape the server returns
    Json,
    /// One line per finding category
    Summary,
    /// Boxed sections plus the full Dockerfile
    Detailed,
}

/// A titled box of `label  value` rows.
struct BoxDrawer {
    title: String,
    rows: Vec<(String, String)>,
    min_width: usize,
    max_width: usize,
}

impl BoxDrawer {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            rows: Vec::new(),
            min_width: 50,
            max_width: 110,
        }
    }

    fn add_line(&mut self, label: &str, value: &str) {
        self.rows.push((label.to_string(), value.to_string()));
    }

    fn label_width(&self) -> usize {
        self.rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0)
    }

    fn width(&self) -> usize {
        let label_width = self.label_width();
        let content = self
            .rows
            .iter()
            .map(|(_, v)| label_width + 2 + v.chars().count())
            .max()
            .unwrap_or(0);
        (content + 4)
            .max(self.title.chars().count() + 6)
            .max(self.min_width)
            .min(self.max_width)
    }

    fn draw(&self) -> String {
        let width = self.width();
        let inner = width - 4;
        let label_width = self.label_width();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        let dashes = width.saturating_sub(self.title.chars().count() + 5);
        lines.push(format!("┌─ {} {}┐", self.title.bright_cyan(), "─".repeat(dashes)));

        for (label, value) in &self.rows {
            let value = truncate(value, inner.saturating_sub(label_width + 2));
            let used = label_width + 2 + value.chars().count();
            lines.push(format!(
                "│ {:<lw$}  {}{} │",
                label.bright_white(),
                value,
                " ".repeat(inner.saturating_sub(used)),
                lw = label_width
            ));
        }

        lines.push(format!("└{}┘", "─".repeat(width - 2)));
        lines.join("\n")
    }
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let kept: String = value.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn language_label(result: &AnalysisResult) -> String {
    result
        .language_version
        .as_ref()
        .map(|lv| format!("{} {}", lv.name, lv.version))
        .unwrap_or_else(|| "unknown".to_string())
}

fn ports_label(ports: &[u16]) -> String {
    if ports.is_empty() {
        return "none".to_string();
    }
    ports.iter().map(u16::to_string).collect::<Vec<_>>().join(", ")
}

/// Renders one analysis in the requested mode.
pub fn render_analysis(result: &AnalysisResult, mode: DisplayMode) -> Result<String> {
    match mode {
        DisplayMode::Json => render_json(std::slice::from_ref(result)),
        DisplayMode::Summary => Ok(render_summary(result)),
        DisplayMode::Detailed => Ok(render_detailed(result)),
    }
}

/// A single result renders as an object, several as an array.
pub fn render_json(results: &[AnalysisResult]) -> Result<String> {
    let rendered = match results {
        [single] => serde_json::to_string_pretty(single)?,
        many => serde_json::to_string_pretty(many)?,
    };
    Ok(rendered)
}

pub fn render_summary(result: &AnalysisResult) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        "▶".bright_blue(),
        "REPOSITORY ANALYSIS SUMMARY".bright_white().bold()
    ));
    lines.push("─".repeat(50).dimmed().to_string());
    lines.push(format!(
        "{} Project types: {}",
        "│".dimmed(),
        join_or_none(&result.project_types).green()
    ));
    lines.push(format!("{} Language: {}", "│".dimmed(), language_label(result).blue()));
    lines.push(format!(
        "{} Dependencies: {}",
        "│".dimmed(),
        result.dependencies.len().to_string().yellow()
    ));
    lines.push(format!("{} Ports: {}", "│".dimmed(), ports_label(&result.ports)));
    lines.push(format!(
        "{} Environment variables: {}",
        "│".dimmed(),
        result.environment_variables.len()
    ));
    if !result.os_requirements.is_empty() {
        lines.push(format!(
            "{} OS requirements: {}",
            "│".dimmed(),
            result.os_requirements.join(", ").magenta()
        ));
    }
    lines.push("─".repeat(50).dimmed().to_string());
    lines.join("\n")
}

pub fn render_detailed(result: &AnalysisResult) -> String {
    let mut overview = BoxDrawer::new("Overview");
    overview.add_line("Project types", &join_or_none(&result.project_types));
    overview.add_line("Language", &language_label(result));
    overview.add_line("Ports", &ports_label(&result.ports));
    overview.add_line("OS requirements", &join_or_none(&result.os_requirements));

    let mut sections = vec![overview.draw()];

    if !result.dependencies.is_empty() {
        let mut deps = BoxDrawer::new(&format!("Dependencies ({})", result.dependencies.len()));
        for dependency in &result.dependencies {
            deps.add_line("•", dependency);
        }
        sections.push(deps.draw());
    }

    if !result.environment_variables.is_empty() {
        let mut env = BoxDrawer::new("Environment variables");
        for name in &result.environment_variables {
            env.add_line("•", name);
        }
        sections.push(env.draw());
    }

    if !result.notes.is_empty() {
        let mut notes = BoxDrawer::new("Notes");
        for note in result.notes.lines() {
            notes.add_line("•", note);
        }
        sections.push(notes.draw());
    }

    sections.push(format!(
        "{}\n{}",
        "Dockerfile".bright_white().bold(),
        result.dockerfile.trim_end()
    ));
    sections.join("\n\n")
}

/// Main display function that routes to the appropriate formatter
pub fn display_analysis(result: &AnalysisResult, mode: DisplayMode) -> Result<()> {
    println!("{}", render_analysis(result, mode)?);
    Ok(())
}
