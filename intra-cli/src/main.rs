use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use intra_cli::{
    analyzer::{
        self,
        display::{display_analysis, render_json, DisplayMode},
        AnalysisResult,
    },
    cli::{Cli, Commands, DisplayFormat},
    config::{self, Config},
    error::AnalysisError,
    generator,
};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> intra_cli::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Analyze {
            bundles,
            display,
            allow_empty,
        } => handle_analyze(&config, bundles, display, allow_empty, cli.quiet),
        Commands::Dockerfile {
            bundle,
            output,
            dry_run,
            force,
            allow_empty,
        } => handle_dockerfile(&config, &bundle, output, dry_run, force, allow_empty),
        Commands::Scan { path, display } => handle_scan(&config, &path, display),
        Commands::Support => handle_support(),
    }
}

fn display_mode(config: &Config, display: Option<DisplayFormat>) -> DisplayMode {
    display
        .map(DisplayMode::from)
        .unwrap_or_else(|| config.output.format.into())
}

/// Reads and analyzes one bundle file with the configured Dockerfile layout.
fn analyze_bundle_file(
    config: &Config,
    path: &Path,
    allow_empty: bool,
) -> intra_cli::Result<AnalysisResult> {
    let content = fs::read_to_string(path)?;
    let files = analyzer::read_bundle(&content)?;
    if files.is_empty() && !allow_empty {
        return Err(AnalysisError::NoFilesParsed.into());
    }
    Ok(analyzer::analyze_files(&files, &config.generation.dockerfile))
}

fn progress_bar(len: usize, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::with_template("  🔍 {msg} {bar:40.cyan/blue} {pos}/{len} bundles ({percent}%)")
    {
        pb.set_style(style.progress_chars("████▉▊▋▌▍▎▏  "));
    }
    pb.set_message("Analyzing");
    pb
}

fn handle_analyze(
    config: &Config,
    bundles: Vec<PathBuf>,
    display: Option<DisplayFormat>,
    allow_empty: bool,
    quiet: bool,
) -> intra_cli::Result<()> {
    let mode = display_mode(config, display);
    let pb = progress_bar(bundles.len(), quiet || bundles.len() < 2);

    let outcomes: Vec<(PathBuf, intra_cli::Result<AnalysisResult>)> = bundles
        .into_par_iter()
        .map(|path| {
            let outcome = analyze_bundle_file(config, &path, allow_empty);
            pb.inc(1);
            (path, outcome)
        })
        .collect();
    pb.finish_and_clear();

    let mut results = Vec::new();
    let mut failures = 0usize;
    for (path, outcome) in outcomes {
        match outcome {
            Ok(result) => results.push((path, result)),
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", "✗".red(), path.display(), e);
            }
        }
    }

    if mode == DisplayMode::Json {
        let analyses: Vec<AnalysisResult> = results.into_iter().map(|(_, r)| r).collect();
        if !analyses.is_empty() {
            println!("{}", render_json(&analyses)?);
        }
    } else {
        for (path, result) in &results {
            if !quiet {
                println!("\n🔍 {}", path.display().to_string().bright_white().bold());
            }
            display_analysis(result, mode)?;
        }
    }

    if failures > 0 {
        eprintln!("{} of the bundles could not be analyzed", failures);
        process::exit(1);
    }
    Ok(())
}

fn handle_dockerfile(
    config: &Config,
    bundle: &Path,
    output: Option<PathBuf>,
    dry_run: bool,
    force: bool,
    allow_empty: bool,
) -> intra_cli::Result<()> {
    let result = analyze_bundle_file(config, bundle, allow_empty)?;

    match output {
        Some(path) if !dry_run => {
            generator::write_dockerfile(&path, &result.dockerfile, force)?;
            eprintln!("✅ Dockerfile written to {}", path.display());
        }
        Some(path) => {
            eprintln!("--- {} (dry run) ---", path.display());
            print!("{}", result.dockerfile);
        }
        None => print!("{}", result.dockerfile),
    }
    Ok(())
}

fn handle_scan(config: &Config, path: &Path, display: Option<DisplayFormat>) -> intra_cli::Result<()> {
    let result = analyzer::analyze_directory(path, config)?;
    display_analysis(&result, display_mode(config, display))
}

fn handle_support() -> intra_cli::Result<()> {
    println!("📄 Recognized manifests (first match wins):");
    let signatures = analyzer::supported_signatures();
    for (i, (ecosystem, patterns)) in signatures.iter().enumerate() {
        let branch = if i + 1 == signatures.len() { "└──" } else { "├──" };
        println!("{} {:<24} {}", branch, ecosystem, patterns.join(", ").dimmed());
    }

    println!("\n🐳 Dockerfile stacks (first match wins):");
    let stacks = generator::stack_names();
    for (i, stack) in stacks.iter().enumerate() {
        println!("├── {}. {}", i + 1, stack);
    }
    println!("└── fallback: {}", generator::FALLBACK_IMAGE);
    Ok(())
}
