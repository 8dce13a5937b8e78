use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Result, anyhow};
use tracing::{error, info};

use crate::configuration::ConfigPaths;
use crate::observability::MetricsCollector;

/// The five steps of the training workflow, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    DataIngestion,
    DataValidation,
    DataTransformation,
    ModelTrainer,
    ModelEvaluation,
}

impl StageKind {
    pub const ALL: [StageKind; 5] = [
        StageKind::DataIngestion,
        StageKind::DataValidation,
        StageKind::DataTransformation,
        StageKind::ModelTrainer,
        StageKind::ModelEvaluation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StageKind::DataIngestion => "Data Ingestion stage",
            StageKind::DataValidation => "Data Validation stage",
            StageKind::DataTransformation => "Data Transformation stage",
            StageKind::ModelTrainer => "Model Trainer stage",
            StageKind::ModelEvaluation => "Model Evaluation stage",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            StageKind::DataIngestion => "data_ingestion",
            StageKind::DataValidation => "data_validation",
            StageKind::DataTransformation => "data_transformation",
            StageKind::ModelTrainer => "model_trainer",
            StageKind::ModelEvaluation => "model_evaluation",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A pipeline step: runs to completion or fails.
///
/// Stages exchange data only through files on disk.
pub trait Stage: Send + Sync {
    fn kind(&self) -> StageKind;
    fn run(&self) -> Result<()>;
}

type StageConstructor = Arc<dyn Fn(&ConfigPaths) -> Result<Box<dyn Stage>> + Send + Sync>;

pub struct StageRegistry {
    factories: HashMap<String, StageConstructor>,
}

impl Default for StageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StageRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&ConfigPaths) -> Result<Box<dyn Stage>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(constructor));
    }

    pub fn create(&self, name: &str, paths: &ConfigPaths) -> Result<Box<dyn Stage>> {
        let factory = self.factories.get(name).ok_or_else(|| {
            anyhow!(
                "Unknown stage '{}'. Available stages: {}",
                name,
                self.known_stages().join(", ")
            )
        })?;
        factory(paths)
    }

    pub fn known_stages(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    NotStarted,
    Running(StageKind),
    Done,
    Failed(StageKind),
}

/// Runs stages in order and stops at the first failure.
pub struct TrainingPipeline {
    stages: Vec<Box<dyn Stage>>,
    state: PipelineState,
    metrics: MetricsCollector,
}

impl TrainingPipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self {
            stages,
            state: PipelineState::NotStarted,
            metrics: MetricsCollector::new(),
        }
    }

    /// The five registered stages in [`StageKind::ALL`] order.
    pub fn standard(registry: &StageRegistry, paths: &ConfigPaths) -> Result<Self> {
        let stages = StageKind::ALL
            .iter()
            .map(|kind| registry.create(kind.key(), paths))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(stages))
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn stage_kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(|stage| stage.kind()).collect()
    }

    pub fn metrics(&self) -> MetricsCollector {
        self.metrics.clone()
    }

    /// Always starts from the first stage. The first error is logged with its
    /// full chain and later stages do not run. The returned error wraps the
    /// stage's error in a "<stage label> failed" context; the stage's own
    /// error stays reachable through `root_cause` and `downcast_ref`.
    pub fn run(&mut self) -> Result<()> {
        self.metrics.reset();
        self.state = PipelineState::NotStarted;
        let total_start = Instant::now();

        for stage in &self.stages {
            let kind = stage.kind();
            self.state = PipelineState::Running(kind);
            let span = tracing::span!(tracing::Level::DEBUG, "stage", stage = kind.key());
            let _span_guard = span.enter();

            info!(">>>>>> stage {} started <<<<<<", kind.label());
            let outcome = {
                let _timer = self.metrics.start_stage(kind.key());
                stage.run()
            };

            if let Err(err) = outcome {
                self.metrics.record_failure(kind.key());
                self.metrics.record_total_duration(total_start.elapsed());
                self.state = PipelineState::Failed(kind);
                error!("{err:?}");
                return Err(err.context(format!("{} failed", kind.label())));
            }
            info!(
                ">>>>>> stage {} completed <<<<<<\n\nx==========x",
                kind.label()
            );
        }

        self.metrics.record_total_duration(total_start.elapsed());
        self.state = PipelineState::Done;
        Ok(())
    }
}
