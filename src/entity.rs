use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct DataIngestionConfig {
    pub root_dir: PathBuf,
    pub source_path: PathBuf,
    pub local_data_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataValidationConfig {
    pub root_dir: PathBuf,
    pub data_path: PathBuf,
    pub status_file: PathBuf,
    #[serde(default)]
    pub schema: BTreeMap<String, ColumnType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataTransformationConfig {
    pub root_dir: PathBuf,
    pub data_path: PathBuf,
    pub status_file: PathBuf,
    #[serde(default = "default_test_size")]
    pub test_size: f64,
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelTrainerConfig {
    pub root_dir: PathBuf,
    pub train_data_path: PathBuf,
    pub test_data_path: PathBuf,
    pub model_name: String,
    #[serde(default)]
    pub target_column: String,
    #[serde(default)]
    pub params: ElasticNetParams,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelEvaluationConfig {
    pub root_dir: PathBuf,
    pub test_data_path: PathBuf,
    pub model_path: PathBuf,
    pub metric_file_name: PathBuf,
    #[serde(default)]
    pub target_column: String,
}

/// Hyperparameters read from the `ElasticNet` section of `params.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticNetParams {
    pub alpha: f64,
    pub l1_ratio: f64,
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for ElasticNetParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            l1_ratio: 0.5,
            max_iter: 1_000,
            tolerance: 1e-4,
        }
    }
}

/// Column types accepted in the `COLUMNS` section of `schema.yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int64,
    Float64,
    Object,
}

impl ColumnType {
    pub fn accepts(self, raw: &str) -> bool {
        let raw = raw.trim();
        match self {
            ColumnType::Int64 => raw.parse::<i64>().is_ok(),
            ColumnType::Float64 => raw.parse::<f64>().is_ok(),
            ColumnType::Object => true,
        }
    }
}

fn default_test_size() -> f64 {
    0.25
}

fn default_random_seed() -> u64 {
    42
}

#[cfg(test)]
mod tests {
    use super::ColumnType;

    #[test]
    fn column_type_parsing() {
        assert!(ColumnType::Int64.accepts(" 7 "));
        assert!(!ColumnType::Int64.accepts("7.5"));
        assert!(ColumnType::Float64.accepts("7"));
        assert!(!ColumnType::Float64.accepts("seven"));
        assert!(ColumnType::Object.accepts(""));
    }
}
