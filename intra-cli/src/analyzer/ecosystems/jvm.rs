//! Maven and Gradle builds, including Android modules.

use super::{normalize_version, ANDROID_SDK};
use crate::analyzer::parsers::parse_xml;
use crate::analyzer::AnalysisAccumulator;
use once_cell::sync::Lazy;
use regex::Regex;

pub const ANDROID_NOTE: &str = "Android projects require the Android SDK to build.";

const SPRING_BOOT_GROUP: &str = "org.springframework.boot";

/// Properties that carry the Java release, most specific first.
const JAVA_VERSION_PROPERTIES: &[&str] = &[
    "java.version",
    "maven.compiler.release",
    "maven.compiler.source",
    "maven.compiler.target",
];

static JAVA_VERSION_ENUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"JavaVersion\.VERSION_(\d+(?:_\d+)?)").expect("valid regex"));

static JAVA_TOOLCHAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"JavaLanguageVersion\.of\(\s*(\d+)\s*\)").expect("valid regex")
});

static JAVA_COMPATIBILITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:source|target)Compatibility\s*=\s*['"]?(\d+(?:\.\d+)?)"#).expect("valid regex")
});

static GRADLE_DEPENDENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?m)^\s*(?:implementation|api|compileOnly|runtimeOnly|testImplementation|testRuntimeOnly|androidTestImplementation|annotationProcessor|kapt|ksp|classpath)\s*\(?\s*['"]([^'"\s]+)['"]"#,
    )
    .expect("valid regex")
});

pub fn analyze_pom(content: &str, acc: &mut AnalysisAccumulator) {
    acc.add_project_type("Java");
    acc.add_project_type("Maven");

    let Some(project) = parse_xml(content) else {
        acc.set_language_version("Java", None);
        return;
    };

    let java = project.child("properties").and_then(|properties| {
        JAVA_VERSION_PROPERTIES
            .iter()
            .find_map(|name| properties.child_text(name))
            .and_then(normalize_version)
    });
    acc.set_language_version("Java", java.as_deref());

    let mut spring_boot = project
        .child("parent")
        .and_then(|parent| parent.child_text("artifactId"))
        .map_or(false, |artifact| artifact == "spring-boot-starter-parent");

    for dependency in project.descendants("dependency") {
        let (Some(group), Some(artifact)) = (
            dependency.child_text("groupId"),
            dependency.child_text("artifactId"),
        ) else {
            continue;
        };
        spring_boot |= group == SPRING_BOOT_GROUP;
        acc.add_dependency(
            &format!("{}:{}", group, artifact),
            dependency.child_text("version"),
            ":",
        );
    }

    if spring_boot {
        acc.add_project_type("Spring Boot");
    }
}

/// Handles both `build.gradle` and `build.gradle.kts`.
pub fn analyze_gradle(content: &str, acc: &mut AnalysisAccumulator) {
    let android = is_android_build(content);
    if android {
        acc.add_project_type("Android");
        acc.add_os_requirement(ANDROID_SDK);
        acc.add_note(ANDROID_NOTE);
    } else {
        acc.add_project_type("Java");
    }
    acc.add_project_type("Gradle");

    let java = gradle_java_version(content);
    acc.set_language_version("Java", java.as_deref());

    for cap in GRADLE_DEPENDENCY.captures_iter(content) {
        if let Some(coordinate) = cap.get(1) {
            acc.add_dependency(coordinate.as_str(), None, ":");
        }
    }

    if content.contains(SPRING_BOOT_GROUP) {
        acc.add_project_type("Spring Boot");
    }
}

fn is_android_build(content: &str) -> bool {
    content.contains("com.android.application") || content.contains("com.android.library")
}

fn gradle_java_version(content: &str) -> Option<String> {
    if let Some(cap) = JAVA_VERSION_ENUM.captures(content) {
        return Some(cap[1].replace('_', "."));
    }
    JAVA_TOOLCHAIN
        .captures(content)
        .or_else(|| JAVA_COMPATIBILITY.captures(content))
        .map(|cap| cap[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <parent>
    <groupId>org.springframework.boot</groupId>
    <artifactId>spring-boot-starter-parent</artifactId>
    <version>3.2.0</version>
  </parent>
  <properties>
    <maven.compiler.source>11</maven.compiler.source>
    <java.version>21</java.version>
  </properties>
  <dependencies>
    <dependency>
      <groupId>org.springframework.boot</groupId>
      <artifactId>spring-boot-starter-web</artifactId>
    </dependency>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>4.13.2</version>
      <scope>test</scope>
    </dependency>
  </dependencies>
</project>"#;

    #[test]
    fn test_pom() {
        let mut acc = AnalysisAccumulator::new();
        analyze_pom(POM, &mut acc);

        assert!(acc.has_project_type("Maven"));
        assert!(acc.has_project_type("Spring Boot"));
        assert_eq!(acc.language_version.as_deref(), Some("Java 21"));
        assert!(acc.dependencies.contains("junit:junit:4.13.2"));
        assert!(acc
            .dependencies
            .contains("org.springframework.boot:spring-boot-starter-web"));
    }

    #[test]
    fn test_malformed_pom() {
        let mut acc = AnalysisAccumulator::new();
        analyze_pom("<project><dependencies>", &mut acc);
        assert!(acc.has_project_type("Java"));
        assert_eq!(acc.language_version.as_deref(), Some("Java latest"));
        assert!(acc.dependencies.is_empty());
    }

    #[test]
    fn test_android_gradle() {
        let mut acc = AnalysisAccumulator::new();
        analyze_gradle(
            r#"
plugins { id 'com.android.application' }
android {
    compileOptions {
        sourceCompatibility JavaVersion.VERSION_1_8
    }
}
dependencies {
    implementation 'androidx.appcompat:appcompat:1.6.1'
    testImplementation "junit:junit:4.13.2"
}
"#,
            &mut acc,
        );

        assert!(acc.has_project_type("Android"));
        assert!(acc.has_project_type("Gradle"));
        assert!(!acc.has_project_type("Java"));
        assert!(acc.os_requirements.contains(ANDROID_SDK));
        assert_eq!(acc.language_version.as_deref(), Some("Java 1.8"));
        assert!(acc.dependencies.contains("androidx.appcompat:appcompat:1.6.1"));
        assert!(acc.dependencies.contains("junit:junit:4.13.2"));
    }

    #[test]
    fn test_kotlin_dsl_toolchain() {
        let mut acc = AnalysisAccumulator::new();
        analyze_gradle(
            r#"
plugins { id("org.springframework.boot") version "3.2.0" }
java { toolchain { languageVersion.set(JavaLanguageVersion.of(17)) } }
dependencies {
    implementation("org.springframework.boot:spring-boot-starter-web")
}
"#,
            &mut acc,
        );

        assert!(acc.has_project_type("Java"));
        assert!(acc.has_project_type("Spring Boot"));
        assert_eq!(acc.language_version.as_deref(), Some("Java 17"));
        assert!(acc
            .dependencies
            .contains("org.springframework.boot:spring-boot-starter-web"));
    }

    #[test]
    fn test_gradle_without_version() {
        let mut acc = AnalysisAccumulator::new();
        analyze_gradle("apply plugin: 'java'\n", &mut acc);
        assert_eq!(acc.language_version.as_deref(), Some("Java latest"));
    }
}
