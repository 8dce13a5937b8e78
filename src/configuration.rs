use std::path::{Path, PathBuf};

use crate::common::read_yaml;
use crate::config_box::ConfigBox;
use crate::constants::{CONFIG_FILE_PATH, PARAMS_FILE_PATH, SCHEMA_FILE_PATH};
use crate::entity::{
    DataIngestionConfig, DataTransformationConfig, DataValidationConfig, ElasticNetParams,
    ModelEvaluationConfig, ModelTrainerConfig,
};
use crate::error::{CommonError, ConfigError};

/// Locations of the three YAML documents a run is configured from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub config: PathBuf,
    pub params: PathBuf,
    pub schema: PathBuf,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self {
            config: PathBuf::from(CONFIG_FILE_PATH),
            params: PathBuf::from(PARAMS_FILE_PATH),
            schema: PathBuf::from(SCHEMA_FILE_PATH),
        }
    }
}

impl ConfigPaths {
    /// Conventional layout below `root`.
    pub fn rooted(root: &Path) -> Self {
        Self {
            config: root.join(CONFIG_FILE_PATH),
            params: root.join(PARAMS_FILE_PATH),
            schema: root.join(SCHEMA_FILE_PATH),
        }
    }
}

/// Builds the per-stage configuration structs from `config.yaml`,
/// `params.yaml` and `schema.yaml`.
///
/// Builders have no filesystem side effects; each component creates its own
/// `root_dir` when it runs.
#[derive(Debug, Clone)]
pub struct ConfigurationManager {
    config: ConfigBox,
    params: ConfigBox,
    schema: ConfigBox,
}

impl ConfigurationManager {
    pub fn new(paths: &ConfigPaths) -> Result<Self, CommonError> {
        Ok(Self {
            config: read_yaml(&paths.config)?,
            params: read_yaml(&paths.params)?,
            schema: read_yaml(&paths.schema)?,
        })
    }

    pub fn from_parts(config: ConfigBox, params: ConfigBox, schema: ConfigBox) -> Self {
        Self {
            config,
            params,
            schema,
        }
    }

    pub fn data_ingestion_config(&self) -> Result<DataIngestionConfig, ConfigError> {
        self.config.section("data_ingestion")?.deserialize()
    }

    pub fn data_validation_config(&self) -> Result<DataValidationConfig, ConfigError> {
        let mut config: DataValidationConfig =
            self.config.section("data_validation")?.deserialize()?;
        config.schema = self.schema.field("COLUMNS")?;
        Ok(config)
    }

    pub fn data_transformation_config(&self) -> Result<DataTransformationConfig, ConfigError> {
        let section = self.config.section("data_transformation")?;
        let mut value = section.into_value();
        if let Some(map) = value.as_object_mut()
            && !map.contains_key("status_file")
        {
            let status_file = self.config.field::<PathBuf>("data_validation.status_file")?;
            map.insert(
                "status_file".to_string(),
                serde_json::Value::String(status_file.to_string_lossy().into_owned()),
            );
        }
        ConfigBox::from_value(value)?.deserialize()
    }

    pub fn model_trainer_config(&self) -> Result<ModelTrainerConfig, ConfigError> {
        let mut config: ModelTrainerConfig = self.config.section("model_trainer")?.deserialize()?;
        config.params = self.elastic_net_params()?;
        config.target_column = self.target_column()?;
        Ok(config)
    }

    pub fn model_evaluation_config(&self) -> Result<ModelEvaluationConfig, ConfigError> {
        let mut config: ModelEvaluationConfig =
            self.config.section("model_evaluation")?.deserialize()?;
        config.target_column = self.target_column()?;
        Ok(config)
    }

    pub fn target_column(&self) -> Result<String, ConfigError> {
        self.schema.field("TARGET_COLUMN.name")
    }

    pub fn schema_columns(&self) -> Result<Vec<String>, ConfigError> {
        Ok(self.schema.section("COLUMNS")?.keys().cloned().collect())
    }

    fn elastic_net_params(&self) -> Result<ElasticNetParams, ConfigError> {
        if self.params.contains_key("ElasticNet") {
            self.params.field("ElasticNet")
        } else {
            Ok(ElasticNetParams::default())
        }
    }
}
