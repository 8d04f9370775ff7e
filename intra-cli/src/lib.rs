//! # Intra repository analyzer
//!
//! Infers the build environment of an arbitrary repository and synthesizes a
//! Dockerfile for a cloud development workspace.
//!
//! ## Features
//!
//! - **Bundle Reading**: Parses the repository bundler's flattened text output
//! - **Project Classification**: Detects ecosystems, frameworks and build tools from manifests
//! - **Environment Discovery**: Finds ports, environment variables and OS requirements
//! - **Dockerfile Synthesis**: Emits a deterministic Dockerfile from the findings
//!
//! ## Example
//!
//! ```rust,no_run
//! use intra_cli::analyze_bundle;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bundle = std::fs::read_to_string("repo.txt")?;
//! let result = analyze_bundle(&bundle)?;
//! println!("{}", result.dockerfile);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod generator;

// Re-export commonly used types and functions
pub use analyzer::{
    analyze_bundle, analyze_bundle_strict, analyze_directory, analyze_files, AnalysisResult,
    FileMap,
};
pub use error::{IntraError, Result};
pub use generator::generate_dockerfile;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
