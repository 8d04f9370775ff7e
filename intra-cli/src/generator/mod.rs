use crate::analyzer::AnalysisAccumulator;
use crate::config::DockerfileConfig;
use crate::error::{GeneratorError, Result};
use std::fs;
use std::path::Path;

pub mod dockerfile_gen;

pub use dockerfile_gen::{select_stack, stack_names, synthesize, DockerfileGenerator, FALLBACK_IMAGE};

/// Generate a Dockerfile from the findings of a classification pass
pub fn generate_dockerfile(acc: &AnalysisAccumulator, config: &DockerfileConfig) -> String {
    DockerfileGenerator::new(config.clone()).generate(acc)
}

/// Write a generated Dockerfile to disk, refusing to clobber an existing file unless `force` is set
pub fn write_dockerfile(path: &Path, content: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(GeneratorError::OutputExists {
            path: path.to_path_buf(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|_| GeneratorError::OutputCreation {
            path: path.to_path_buf(),
        })?;
    }

    fs::write(path, content)?;
    log::info!("Wrote Dockerfile to {}", path.display());
    Ok(())
}
