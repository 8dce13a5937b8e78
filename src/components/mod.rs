pub mod data_ingestion;
pub mod data_transformation;
pub mod data_validation;
pub mod dataset;
pub mod elastic_net;
pub mod model_evaluation;
pub mod model_trainer;

pub use data_ingestion::DataIngestion;
pub use data_transformation::DataTransformation;
pub use data_validation::DataValidation;
pub use model_evaluation::{ModelEvaluation, RegressionMetrics};
pub use model_trainer::ModelTrainer;
