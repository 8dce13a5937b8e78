use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::common::{create_directories, save_json};
use crate::entity::DataIngestionConfig;

const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Serialize)]
struct IngestionManifest {
    source: String,
    file: String,
    bytes: u64,
    sha256: String,
}

pub struct DataIngestion {
    config: DataIngestionConfig,
}

impl DataIngestion {
    pub fn new(config: DataIngestionConfig) -> Self {
        Self { config }
    }

    /// Copies the source dataset into the artifacts tree and records a manifest.
    pub fn ingest(&self) -> Result<()> {
        create_directories(&[&self.config.root_dir], true)?;
        let target = &self.config.local_data_file;
        if target.exists() {
            info!("File already exists at: {}", target.display());
        } else {
            if !self.config.source_path.is_file() {
                bail!(
                    "Source dataset not found: {}",
                    self.config.source_path.display()
                );
            }
            if let Some(parent) = target.parent()
                && !parent.as_os_str().is_empty()
            {
                create_directories(&[parent], false)?;
            }
            let bytes = fs::copy(&self.config.source_path, target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    self.config.source_path.display(),
                    target.display()
                )
            })?;
            info!(
                "{} ingested from {} ({} bytes)",
                target.display(),
                self.config.source_path.display(),
                bytes
            );
        }

        let manifest = IngestionManifest {
            source: self.config.source_path.to_string_lossy().into_owned(),
            file: target.to_string_lossy().into_owned(),
            bytes: fs::metadata(target)
                .with_context(|| format!("Failed to stat {}", target.display()))?
                .len(),
            sha256: sha256_file(target)?,
        };
        save_json(self.config.root_dir.join(MANIFEST_FILE), &manifest)?;
        Ok(())
    }
}

fn sha256_file(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
