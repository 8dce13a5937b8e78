//! Orchestration surface over the stage components.
//!
//! Each wrapper builds its configuration, instantiates its component and runs
//! it. Nothing is returned; outputs land on disk.

use anyhow::Result;

use crate::components::{
    DataIngestion, DataTransformation, DataValidation, ModelEvaluation, ModelTrainer,
};
use crate::configuration::{ConfigPaths, ConfigurationManager};
use crate::pipeline::{Stage, StageKind, StageRegistry};

pub fn register_defaults(registry: &mut StageRegistry) {
    registry.register(StageKind::DataIngestion.key(), |paths| {
        Ok(Box::new(DataIngestionTrainingPipeline::new(paths.clone())))
    });
    registry.register(StageKind::DataValidation.key(), |paths| {
        Ok(Box::new(DataValidationTrainingPipeline::new(paths.clone())))
    });
    registry.register(StageKind::DataTransformation.key(), |paths| {
        Ok(Box::new(DataTransformationTrainingPipeline::new(
            paths.clone(),
        )))
    });
    registry.register(StageKind::ModelTrainer.key(), |paths| {
        Ok(Box::new(ModelTrainerTrainingPipeline::new(paths.clone())))
    });
    registry.register(StageKind::ModelEvaluation.key(), |paths| {
        Ok(Box::new(ModelEvaluationTrainingPipeline::new(paths.clone())))
    });
}

pub struct DataIngestionTrainingPipeline {
    paths: ConfigPaths,
}

impl DataIngestionTrainingPipeline {
    pub fn new(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn initiate_data_ingestion(&self) -> Result<()> {
        let config = ConfigurationManager::new(&self.paths)?.data_ingestion_config()?;
        DataIngestion::new(config).ingest()
    }
}

impl Stage for DataIngestionTrainingPipeline {
    fn kind(&self) -> StageKind {
        StageKind::DataIngestion
    }

    fn run(&self) -> Result<()> {
        self.initiate_data_ingestion()
    }
}

pub struct DataValidationTrainingPipeline {
    paths: ConfigPaths,
}

impl DataValidationTrainingPipeline {
    pub fn new(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn initiate_data_validation(&self) -> Result<()> {
        let config = ConfigurationManager::new(&self.paths)?.data_validation_config()?;
        DataValidation::new(config).validate_all_columns()?;
        Ok(())
    }
}

impl Stage for DataValidationTrainingPipeline {
    fn kind(&self) -> StageKind {
        StageKind::DataValidation
    }

    fn run(&self) -> Result<()> {
        self.initiate_data_validation()
    }
}

pub struct DataTransformationTrainingPipeline {
    paths: ConfigPaths,
}

impl DataTransformationTrainingPipeline {
    pub fn new(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn initiate_data_transformation(&self) -> Result<()> {
        let config = ConfigurationManager::new(&self.paths)?.data_transformation_config()?;
        DataTransformation::new(config).train_test_split()
    }
}

impl Stage for DataTransformationTrainingPipeline {
    fn kind(&self) -> StageKind {
        StageKind::DataTransformation
    }

    fn run(&self) -> Result<()> {
        self.initiate_data_transformation()
    }
}

pub struct ModelTrainerTrainingPipeline {
    paths: ConfigPaths,
}

impl ModelTrainerTrainingPipeline {
    pub fn new(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn initiate_model_training(&self) -> Result<()> {
        let config = ConfigurationManager::new(&self.paths)?.model_trainer_config()?;
        ModelTrainer::new(config).train()
    }
}

impl Stage for ModelTrainerTrainingPipeline {
    fn kind(&self) -> StageKind {
        StageKind::ModelTrainer
    }

    fn run(&self) -> Result<()> {
        self.initiate_model_training()
    }
}

pub struct ModelEvaluationTrainingPipeline {
    paths: ConfigPaths,
}

impl ModelEvaluationTrainingPipeline {
    pub fn new(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn initiate_model_evaluation(&self) -> Result<()> {
        let config = ConfigurationManager::new(&self.paths)?.model_evaluation_config()?;
        ModelEvaluation::new(config).evaluate()?;
        Ok(())
    }
}

impl Stage for ModelEvaluationTrainingPipeline {
    fn kind(&self) -> StageKind {
        StageKind::ModelEvaluation
    }

    fn run(&self) -> Result<()> {
        self.initiate_model_evaluation()
    }
}
