pub mod common;
pub mod components;
pub mod config_box;
pub mod configuration;
pub mod constants;
pub mod entity;
pub mod error;
pub mod logging;
pub mod observability;
pub mod pipeline;
pub mod scaffold;
pub mod stages;
pub mod validation;

pub use config_box::ConfigBox;
pub use configuration::{ConfigPaths, ConfigurationManager};
pub use error::{CommonError, ConfigError};
pub use pipeline::{PipelineState, Stage, StageKind, StageRegistry, TrainingPipeline};
