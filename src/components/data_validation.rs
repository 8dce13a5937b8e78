use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::common::create_directories;
use crate::components::dataset::Frame;
use crate::entity::DataValidationConfig;

pub struct DataValidation {
    config: DataValidationConfig,
}

impl DataValidation {
    pub fn new(config: DataValidationConfig) -> Self {
        Self { config }
    }

    /// Checks the ingested dataset against the schema and writes the verdict
    /// to the status file. A failed check is not an error here; the
    /// transformation stage refuses to run on a `false` status.
    pub fn validate_all_columns(&self) -> Result<bool> {
        create_directories(&[&self.config.root_dir], true)?;
        let frame = Frame::read_csv(&self.config.data_path)?;
        let problems = self.schema_problems(&frame);
        for problem in &problems {
            warn!("{problem}");
        }
        let status = problems.is_empty();

        if let Some(parent) = self.config.status_file.parent()
            && !parent.as_os_str().is_empty()
        {
            create_directories(&[parent], false)?;
        }
        fs::write(&self.config.status_file, format!("Validation status: {status}"))
            .with_context(|| {
                format!(
                    "Failed to write validation status: {}",
                    self.config.status_file.display()
                )
            })?;
        info!(
            "Validation status {} written to {}",
            status,
            self.config.status_file.display()
        );
        Ok(status)
    }

    fn schema_problems(&self, frame: &Frame) -> Vec<String> {
        let mut problems = Vec::new();
        for column in frame.columns() {
            if !self.config.schema.contains_key(column) {
                problems.push(format!("Column '{column}' is not declared in the schema"));
            }
        }
        for (column, column_type) in &self.config.schema {
            let Some(idx) = frame.column_index(column) else {
                problems.push(format!("Schema column '{column}' is missing from the dataset"));
                continue;
            };
            if let Some(line) = frame
                .rows()
                .iter()
                .position(|row| !row.get(idx).is_some_and(|raw| column_type.accepts(raw)))
            {
                problems.push(format!(
                    "Column '{column}' row {} does not match type {column_type:?}",
                    line + 1
                ));
            }
        }
        problems
    }
}

/// Reads a status file written by [`DataValidation::validate_all_columns`].
pub fn read_validation_status(path: &Path) -> Result<bool> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read validation status: {}", path.display()))?;
    let verdict = content
        .rsplit(':')
        .next()
        .map(str::trim)
        .unwrap_or_default();
    Ok(verdict.eq_ignore_ascii_case("true"))
}
