use serde::Serialize;

use crate::configuration::{ConfigPaths, ConfigurationManager};
use crate::error::ConfigError;
use crate::pipeline::StageKind;

#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Loads the configuration documents and builds every stage configuration
/// without touching the artifacts tree.
pub fn validate_configuration(paths: &ConfigPaths) -> ValidationReport {
    let mut report = ValidationReport::default();

    let manager = match ConfigurationManager::new(paths) {
        Ok(manager) => manager,
        Err(err) => {
            report
                .errors
                .push(format!("Failed to load configuration: {err}"));
            return report;
        }
    };

    for kind in StageKind::ALL {
        report.merge(validate_stage(kind, &manager));
    }

    report
}

fn validate_stage(kind: StageKind, manager: &ConfigurationManager) -> ValidationReport {
    let mut report = ValidationReport::default();
    let stage_error = |err: ConfigError| format!("{}: {err}", kind.label());

    match kind {
        StageKind::DataIngestion => match manager.data_ingestion_config() {
            Ok(config) => {
                if !config.source_path.is_file() && !config.local_data_file.is_file() {
                    report.warnings.push(format!(
                        "{}: source dataset {} does not exist yet",
                        kind.label(),
                        config.source_path.display()
                    ));
                }
            }
            Err(err) => report.errors.push(stage_error(err)),
        },
        StageKind::DataValidation => match manager.data_validation_config() {
            Ok(config) => {
                if config.schema.is_empty() {
                    report
                        .errors
                        .push(format!("{}: schema declares no columns", kind.label()));
                }
            }
            Err(err) => report.errors.push(stage_error(err)),
        },
        StageKind::DataTransformation => match manager.data_transformation_config() {
            Ok(config) => {
                if !(config.test_size > 0.0 && config.test_size < 1.0) {
                    report.errors.push(format!(
                        "{}: test_size must be in (0, 1), got {}",
                        kind.label(),
                        config.test_size
                    ));
                }
            }
            Err(err) => report.errors.push(stage_error(err)),
        },
        StageKind::ModelTrainer => match manager.model_trainer_config() {
            Ok(config) => {
                if let Ok(columns) = manager.schema_columns()
                    && !columns.contains(&config.target_column)
                {
                    report.warnings.push(format!(
                        "{}: target column '{}' is not declared in the schema",
                        kind.label(),
                        config.target_column
                    ));
                }
            }
            Err(err) => report.errors.push(stage_error(err)),
        },
        StageKind::ModelEvaluation => {
            if let Err(err) = manager.model_evaluation_config() {
                report.errors.push(stage_error(err));
            }
        }
    }

    report
}
