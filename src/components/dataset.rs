use std::path::Path;

use anyhow::{Context, Result, anyhow};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

/// A CSV table held as raw string records.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<StringRecord>,
}

impl Frame {
    pub fn new(columns: Vec<String>, rows: Vec<StringRecord>) -> Self {
        Self { columns, rows }
    }

    pub fn read_csv(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
        let columns = reader
            .headers()
            .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
            .iter()
            .map(str::to_string)
            .collect();
        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to read CSV records: {}", path.display()))?;
        Ok(Self { columns, rows })
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .from_path(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to flush CSV file: {}", path.display()))?;
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Rows at `indices`, in the given order.
    pub fn subset(&self, indices: &[usize]) -> Frame {
        Frame {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&idx| self.rows[idx].clone()).collect(),
        }
    }

    /// Numeric matrix of every column except `target`, plus the target vector.
    pub fn features_and_target(&self, target: &str) -> Result<Features> {
        let target_idx = self
            .column_index(target)
            .ok_or_else(|| anyhow!("Target column '{target}' not found in dataset"))?;
        let names: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != target_idx)
            .map(|(_, name)| name.clone())
            .collect();
        let mut rows = Vec::with_capacity(self.rows.len());
        let mut targets = Vec::with_capacity(self.rows.len());
        for (line, record) in self.rows.iter().enumerate() {
            let mut row = Vec::with_capacity(names.len());
            for (idx, raw) in record.iter().enumerate() {
                let value: f64 = raw.parse().with_context(|| {
                    format!(
                        "Row {} column '{}' is not numeric: '{}'",
                        line + 1,
                        self.columns.get(idx).map(String::as_str).unwrap_or("?"),
                        raw
                    )
                })?;
                if idx == target_idx {
                    targets.push(value);
                } else {
                    row.push(value);
                }
            }
            rows.push(row);
        }
        Ok(Features {
            names,
            rows,
            targets,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Features {
    pub names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}
