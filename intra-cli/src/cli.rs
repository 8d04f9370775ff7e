use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::analyzer::display::DisplayMode;
use crate::config::OutputFormat;

#[derive(Parser)]
#[command(name = "intra-ctl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Infer a repository's build environment and synthesize its Dockerfile")]
#[command(long_about = "Reads the flattened text bundle of a repository (or a local checkout), detects its project types, runtime version, dependencies, ports, environment variables and OS requirements, and generates a Dockerfile for a development workspace.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and results
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one or more repository bundles
    Analyze {
        /// Bundle files produced by the repository bundler
        #[arg(value_name = "BUNDLE", required = true)]
        bundles: Vec<PathBuf>,

        /// Display format for analysis results (defaults to the configured format)
        #[arg(long, value_enum)]
        display: Option<DisplayFormat>,

        /// Report an empty result instead of failing when a bundle has no file sections
        #[arg(long)]
        allow_empty: bool,
    },

    /// Generate the Dockerfile for a repository bundle
    Dockerfile {
        /// Bundle file produced by the repository bundler
        #[arg(value_name = "BUNDLE")]
        bundle: PathBuf,

        /// Write the Dockerfile here instead of printing it
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print what would be written without touching the filesystem
        #[arg(long)]
        dry_run: bool,

        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,

        /// Generate the fallback Dockerfile when the bundle has no file sections
        #[arg(long)]
        allow_empty: bool,
    },

    /// Analyze a local checkout without going through the bundler
    Scan {
        /// Path to the repository directory
        #[arg(value_name = "PROJECT_PATH", default_value = ".")]
        path: PathBuf,

        /// Display format for analysis results (defaults to the configured format)
        #[arg(long, value_enum)]
        display: Option<DisplayFormat>,
    },

    /// List recognized manifests and Dockerfile stacks
    Support,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayFormat {
    /// Pretty-printed JSON result
    Json,
    /// Brief summary only
    Summary,
    /// Boxed sections with the full Dockerfile
    Detailed,
}

impl From<DisplayFormat> for DisplayMode {
    fn from(format: DisplayFormat) -> Self {
        match format {
            DisplayFormat::Json => DisplayMode::Json,
            DisplayFormat::Summary => DisplayMode::Summary,
            DisplayFormat::Detailed => DisplayMode::Detailed,
        }
    }
}

impl From<OutputFormat> for DisplayMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => DisplayMode::Json,
            OutputFormat::Summary => DisplayMode::Summary,
            OutputFormat::Detailed => DisplayMode::Detailed,
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_accepts_many_bundles() {
        let cli = Cli::parse_from(["intra-ctl", "-vv", "analyze", "a.txt", "b.txt", "--display", "json"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Analyze { bundles, display, allow_empty } => {
                assert_eq!(bundles.len(), 2);
                assert_eq!(display, Some(DisplayFormat::Json));
                assert!(!allow_empty);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_scan_defaults_to_current_directory() {
        let cli = Cli::parse_from(["intra-ctl", "scan"]);
        match cli.command {
            Commands::Scan { path, display } => {
                assert_eq!(path, PathBuf::from("."));
                assert!(display.is_none());
            }
            _ => panic!("expected scan"),
        }
    }
}
