use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

/// Skeleton of a training-pipeline project, relative to the project root.
pub const TEMPLATE_FILES: &[&str] = &[
    ".github/workflows/.gitkeep",
    "src/lib.rs",
    "src/components/mod.rs",
    "src/common.rs",
    "src/configuration.rs",
    "src/pipeline.rs",
    "src/entity.rs",
    "src/constants.rs",
    "config/config.yaml",
    "params.yaml",
    "schema.yaml",
    "src/main.rs",
    "Dockerfile",
    "Cargo.toml",
    "research/research.ipynb",
    "templates/index.html",
    "src/bin/app.rs",
];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub created_dirs: Vec<PathBuf>,
    pub created_files: Vec<PathBuf>,
    pub existing_files: Vec<PathBuf>,
}

/// Materialises `entries` below `root`.
///
/// Missing directories are created with their ancestors. A file is
/// (re)created empty when it is absent or zero-length; a non-empty file is
/// left untouched. Only absent files count as created.
pub fn generate(root: &Path, entries: &[&str]) -> Result<ScaffoldReport> {
    let mut report = ScaffoldReport::default();

    for entry in entries {
        let path = root.join(entry);
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            if !dir.is_dir() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
                report.created_dirs.push(dir.to_path_buf());
            }
            info!("Creating directory {} for the file : {}", dir.display(), file_name);
        }

        let existing_len = fs::metadata(&path).ok().map(|meta| meta.len());
        match existing_len {
            Some(len) if len > 0 => {
                info!("{} already exists", file_name);
                report.existing_files.push(path);
            }
            Some(_) => {
                File::create(&path)
                    .with_context(|| format!("Failed to create file: {}", path.display()))?;
                info!("{} already exists (empty)", file_name);
                report.existing_files.push(path);
            }
            None => {
                File::create(&path)
                    .with_context(|| format!("Failed to create file: {}", path.display()))?;
                info!("Creating empty file: {}", path.display());
                report.created_files.push(path);
            }
        }
    }

    Ok(report)
}
