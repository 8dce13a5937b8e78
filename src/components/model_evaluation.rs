use anyhow::{Result, anyhow, bail};
use serde::Serialize;
use tracing::info;

use crate::common::{create_directories, load_bin, save_json};
use crate::components::dataset::Frame;
use crate::components::elastic_net::ElasticNetModel;
use crate::entity::ModelEvaluationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionMetrics {
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
}

impl RegressionMetrics {
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Result<Self> {
        if actual.is_empty() || actual.len() != predicted.len() {
            bail!(
                "Cannot score {} prediction(s) against {} target(s)",
                predicted.len(),
                actual.len()
            );
        }
        let n = actual.len() as f64;
        let mean = actual.iter().sum::<f64>() / n;
        let (mut squared, mut absolute, mut total) = (0.0, 0.0, 0.0);
        for (y, p) in actual.iter().zip(predicted) {
            squared += (y - p).powi(2);
            absolute += (y - p).abs();
            total += (y - mean).powi(2);
        }
        let r2 = if total == 0.0 {
            if squared == 0.0 { 1.0 } else { 0.0 }
        } else {
            1.0 - squared / total
        };
        Ok(Self {
            rmse: (squared / n).sqrt(),
            mae: absolute / n,
            r2,
        })
    }
}

pub struct ModelEvaluation {
    config: ModelEvaluationConfig,
}

impl ModelEvaluation {
    pub fn new(config: ModelEvaluationConfig) -> Self {
        Self { config }
    }

    /// Scores the persisted model on the test split and writes the metrics as JSON.
    pub fn evaluate(&self) -> Result<RegressionMetrics> {
        create_directories(&[&self.config.root_dir], true)?;
        let model: ElasticNetModel = load_bin(&self.config.model_path)?;
        let test = Frame::read_csv(&self.config.test_data_path)?
            .features_and_target(&self.config.target_column)?;

        // Align test columns to the order the model was trained with.
        let order = model
            .feature_names
            .iter()
            .map(|name| {
                test.names
                    .iter()
                    .position(|candidate| candidate == name)
                    .ok_or_else(|| anyhow!("Feature '{name}' missing from test data"))
            })
            .collect::<Result<Vec<_>>>()?;
        let rows: Vec<Vec<f64>> = test
            .rows
            .iter()
            .map(|row| order.iter().map(|&idx| row[idx]).collect())
            .collect();

        let predictions = model.predict(&rows);
        let metrics = RegressionMetrics::compute(&test.targets, &predictions)?;
        info!(
            "rmse={:.4} mae={:.4} r2={:.4}",
            metrics.rmse, metrics.mae, metrics.r2
        );
        save_json(&self.config.metric_file_name, &metrics)?;
        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::RegressionMetrics;

    #[test]
    fn perfect_predictions() {
        let metrics = RegressionMetrics::compute(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(metrics, RegressionMetrics { rmse: 0.0, mae: 0.0, r2: 1.0 });
    }

    #[test]
    fn known_errors() {
        let metrics = RegressionMetrics::compute(&[0.0, 2.0], &[1.0, 1.0]).unwrap();
        assert_eq!(metrics.rmse, 1.0);
        assert_eq!(metrics.mae, 1.0);
        assert_eq!(metrics.r2, 0.0);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        assert!(RegressionMetrics::compute(&[1.0], &[]).is_err());
    }
}
