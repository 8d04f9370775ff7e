//! Rule-based Dockerfile synthesis.
//!
//! The output is a pure function of the detected project types, the
//! language version, the ports, the notes and the [`DockerfileConfig`].
//! Stacks are tried in table order and the first one whose labels intersect
//! the project types decides the base image, the install step and the
//! package manager used for common utilities.

use crate::analyzer::{AnalysisAccumulator, LanguageVersion};
use crate::config::DockerfileConfig;
use std::collections::BTreeSet;
use std::fmt::Write as _;

pub const FALLBACK_IMAGE: &str = "alpine:latest";

const BOOTSTRAP_SCRIPT: &str = "/usr/local/bin/intra-env.sh";

const PLACEHOLDER_CMD: &str = r#"CMD ["sh", "-c", "echo 'No start command detected. Override CMD with the command that runs this project.' && tail -f /dev/null"]"#;

/// Package manager of a base image, used to install common utilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Apk,
    Apt,
}

impl PackageManager {
    fn install_git(self) -> &'static str {
        match self {
            PackageManager::Apk => "RUN apk add --no-cache git",
            PackageManager::Apt => {
                "RUN apt-get update && apt-get install -y --no-install-recommends git && rm -rf /var/lib/apt/lists/*"
            }
        }
    }
}

/// One row of the stack dispatch table.
pub struct Stack {
    pub name: &'static str,
    /// Language whose `languageVersion` feeds the image tag.
    pub language: &'static str,
    /// Any of these project types selects the stack.
    pub labels: &'static [&'static str],
    pub package_manager: PackageManager,
    base_image: fn(&BTreeSet<String>, Option<&str>) -> String,
    install: fn(&BTreeSet<String>) -> Vec<String>,
}

impl Stack {
    fn matches(&self, project_types: &BTreeSet<String>) -> bool {
        self.labels.iter().any(|label| project_types.contains(*label))
    }

    /// Base image for these project types and an optional `"<Language> <Version>"` string.
    pub fn base_image(&self, project_types: &BTreeSet<String>, language_version: Option<&str>) -> String {
        let version = language_version
            .and_then(LanguageVersion::parse)
            .filter(|lv| lv.name == self.language)
            .map(|lv| lv.version)
            .filter(|v| v != "latest");
        (self.base_image)(project_types, version.as_deref())
    }

    pub fn install_lines(&self, project_types: &BTreeSet<String>) -> Vec<String> {
        (self.install)(project_types)
    }
}

fn has(project_types: &BTreeSet<String>, label: &str) -> bool {
    project_types.contains(label)
}

fn tagged(repository: &str, version: Option<&str>, suffix: &str, fallback: &str) -> String {
    match version {
        Some(v) => format!("{}:{}{}", repository, v, suffix),
        None => format!("{}:{}", repository, fallback),
    }
}

fn run(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| (*l).to_string()).collect()
}

/// `1.8` style releases map to the modern `8` tag.
fn java_release(version: Option<&str>) -> &str {
    let version = version.unwrap_or("17");
    version.strip_prefix("1.").unwrap_or(version)
}

fn is_gradle_build(project_types: &BTreeSet<String>) -> bool {
    has(project_types, "Gradle") || has(project_types, "Android")
}

pub static STACKS: &[Stack] = &[
    Stack {
        name: "Node.js",
        language: "Node.js",
        labels: &["Node.js"],
        package_manager: PackageManager::Apk,
        base_image: |_, v| tagged("node", v, "-alpine", "lts-alpine"),
        install: |_| run(&["RUN npm install"]),
    },
    Stack {
        name: "Java",
        language: "Java",
        labels: &["Java", "Android", "Maven", "Gradle"],
        package_manager: PackageManager::Apt,
        base_image: |types, v| {
            let release = java_release(v);
            if is_gradle_build(types) {
                format!("gradle:jdk{}", release)
            } else {
                format!("maven:3-eclipse-temurin-{}", release)
            }
        },
        install: |types| {
            if is_gradle_build(types) {
                run(&["RUN gradle dependencies --no-daemon"])
            } else {
                run(&["RUN mvn -B dependency:go-offline"])
            }
        },
    },
    Stack {
        name: "Go",
        language: "Go",
        labels: &["Go"],
        package_manager: PackageManager::Apk,
        base_image: |_, v| tagged("golang", v, "-alpine", "alpine"),
        install: |_| run(&["RUN go mod download"]),
    },
    Stack {
        name: "Ruby",
        language: "Ruby",
        labels: &["Ruby"],
        package_manager: PackageManager::Apk,
        base_image: |_, v| tagged("ruby", v, "-alpine", "alpine"),
        install: |_| run(&["RUN bundle install"]),
    },
    Stack {
        name: "PHP",
        language: "PHP",
        labels: &["PHP"],
        package_manager: PackageManager::Apt,
        base_image: |_, v| tagged("php", v, "-cli", "cli"),
        install: |_| {
            run(&[
                "COPY --from=composer:2 /usr/bin/composer /usr/bin/composer",
                "RUN composer install --no-interaction",
            ])
        },
    },
    Stack {
        name: ".NET",
        language: ".NET",
        labels: &[".NET"],
        package_manager: PackageManager::Apt,
        base_image: |_, v| tagged("mcr.microsoft.com/dotnet/sdk", v, "", "8.0"),
        install: |_| run(&["RUN dotnet restore"]),
    },
    Stack {
        name: "Rust",
        language: "Rust",
        labels: &["Rust"],
        package_manager: PackageManager::Apt,
        base_image: |_, v| tagged("rust", v, "-slim", "slim"),
        install: |_| run(&["RUN cargo fetch"]),
    },
    Stack {
        name: "Swift",
        language: "Swift",
        labels: &["Swift", "iOS"],
        package_manager: PackageManager::Apt,
        base_image: |_, v| tagged("swift", v, "", "latest"),
        install: |_| run(&["RUN if [ -f Package.swift ]; then swift package resolve; fi"]),
    },
    Stack {
        name: "Dart",
        language: "Dart",
        labels: &["Dart", "Flutter"],
        package_manager: PackageManager::Apt,
        base_image: |types, v| {
            if has(types, "Flutter") {
                "ghcr.io/cirruslabs/flutter:stable".to_string()
            } else {
                tagged("dart", v, "", "stable")
            }
        },
        install: |types| {
            if has(types, "Flutter") {
                run(&["RUN flutter pub get"])
            } else {
                run(&["RUN dart pub get"])
            }
        },
    },
    Stack {
        name: "Python",
        language: "Python",
        labels: &["Python"],
        package_manager: PackageManager::Apt,
        base_image: |_, v| tagged("python", v, "-slim", "3-slim"),
        install: |types| {
            if has(types, "Pipenv") {
                run(&["RUN pip install --no-cache-dir pipenv && pipenv install --system"])
            } else if has(types, "Poetry") {
                run(&["RUN pip install --no-cache-dir poetry && poetry config virtualenvs.create false && poetry install --no-interaction --no-root"])
            } else {
                run(&["RUN if [ -f requirements.txt ]; then pip install --no-cache-dir -r requirements.txt; fi"])
            }
        },
    },
];

/// First stack matching the project types, if any.
pub fn select_stack(project_types: &BTreeSet<String>) -> Option<&'static Stack> {
    STACKS.iter().find(|stack| stack.matches(project_types))
}

/// Stack names in dispatch order.
pub fn stack_names() -> Vec<&'static str> {
    STACKS.iter().map(|s| s.name).collect()
}

/// Builds Dockerfiles with a fixed layout configuration.
#[derive(Debug, Clone, Default)]
pub struct DockerfileGenerator {
    config: DockerfileConfig,
}

impl DockerfileGenerator {
    pub fn new(config: DockerfileConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self, acc: &AnalysisAccumulator) -> String {
        self.synthesize(
            &acc.project_types,
            acc.language_version.as_deref(),
            &acc.ports,
            &acc.notes,
        )
    }

    pub fn synthesize(
        &self,
        project_types: &BTreeSet<String>,
        language_version: Option<&str>,
        ports: &BTreeSet<u16>,
        notes: &str,
    ) -> String {
        let stack = select_stack(project_types);
        let stack_name = stack.map_or("generic", |s| s.name);
        log::debug!("Synthesizing Dockerfile for {} stack", stack_name);

        let detected_image = stack
            .map(|s| s.base_image(project_types, language_version))
            .unwrap_or_else(|| FALLBACK_IMAGE.to_string());
        let image = self
            .config
            .base_image_override
            .clone()
            .unwrap_or(detected_image);
        let package_manager = stack.map_or(PackageManager::Apk, |s| s.package_manager);
        let workdir = self.config.workdir.trim_end_matches('/');
        let workdir = if workdir.is_empty() { "/" } else { workdir };

        let mut out = String::new();
        let _ = writeln!(out, "# Generated by intra-ctl");
        let _ = writeln!(out, "# Stack: {}", stack_name);
        let _ = writeln!(out, "FROM {}", image);
        let _ = writeln!(out);

        let _ = writeln!(out, "{}", package_manager.install_git());
        let _ = writeln!(out);

        let _ = writeln!(out, "WORKDIR {}", workdir);
        let _ = writeln!(out, "COPY . .");
        let _ = writeln!(out);

        if let Some(stack) = stack {
            for line in stack.install_lines(project_types) {
                let _ = writeln!(out, "{}", line);
            }
            let _ = writeln!(out);
        }

        if !ports.is_empty() {
            for port in ports {
                let _ = writeln!(out, "EXPOSE {}", port);
            }
            let _ = writeln!(out);
        }

        let note_lines: Vec<&str> = notes
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if !note_lines.is_empty() {
            for line in note_lines {
                let _ = writeln!(out, "# {}", line);
            }
            let _ = writeln!(out);
        }

        let env_path = format!(
            "{}/{}",
            workdir.trim_end_matches('/'),
            self.config.env_file.trim_start_matches('/')
        );
        let _ = writeln!(
            out,
            r#"RUN printf '#!/bin/sh\nenv > "%s"\nexec "$@"\n' "{}" > {} && chmod +x {}"#,
            env_path, BOOTSTRAP_SCRIPT, BOOTSTRAP_SCRIPT
        );
        let _ = writeln!(out, r#"ENTRYPOINT ["{}"]"#, BOOTSTRAP_SCRIPT);
        let _ = writeln!(out, "{}", start_command(stack, project_types));

        out
    }
}

fn start_command(stack: Option<&Stack>, project_types: &BTreeSet<String>) -> &'static str {
    match stack.map(|s| s.name) {
        Some("Node.js") if has(project_types, "Expo") => r#"CMD ["npx", "expo", "start"]"#,
        Some("Node.js") if has(project_types, "React Native") => {
            r#"CMD ["npx", "react-native", "start"]"#
        }
        Some("Node.js") => r#"CMD ["npm", "start"]"#,
        _ => PLACEHOLDER_CMD,
    }
}

/// Synthesizes a Dockerfile with the default layout.
pub fn synthesize(
    project_types: &BTreeSet<String>,
    language_version: Option<&str>,
    ports: &BTreeSet<u16>,
    notes: &str,
) -> String {
    DockerfileGenerator::default().synthesize(project_types, language_version, ports, notes)
}
