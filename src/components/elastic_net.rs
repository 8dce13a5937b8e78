//! ElasticNet linear regression fitted by cyclic coordinate descent.
//!
//! Minimises
//! `1 / (2n) * ||y - Xw - b||^2 + alpha * l1_ratio * ||w||_1
//!  + 0.5 * alpha * (1 - l1_ratio) * ||w||^2`
//! with an unpenalised intercept obtained by centring the data.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::entity::ElasticNetParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticNetModel {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub params: ElasticNetParams,
    pub iterations: usize,
}

impl ElasticNetModel {
    pub fn fit(
        feature_names: Vec<String>,
        rows: &[Vec<f64>],
        targets: &[f64],
        params: &ElasticNetParams,
    ) -> Result<Self> {
        if rows.is_empty() {
            bail!("Cannot fit a model on an empty training set");
        }
        if rows.len() != targets.len() {
            bail!(
                "Feature rows ({}) and targets ({}) differ in length",
                rows.len(),
                targets.len()
            );
        }
        if !(params.alpha.is_finite() && params.alpha >= 0.0)
            || !(0.0..=1.0).contains(&params.l1_ratio)
        {
            bail!(
                "Invalid ElasticNet parameters: alpha={} l1_ratio={}",
                params.alpha,
                params.l1_ratio
            );
        }
        let width = feature_names.len();
        if let Some(row) = rows.iter().find(|row| row.len() != width) {
            bail!("Expected {} features per row, found {}", width, row.len());
        }

        let n = rows.len() as f64;
        let feature_means: Vec<f64> = (0..width)
            .map(|j| rows.iter().map(|row| row[j]).sum::<f64>() / n)
            .collect();
        let target_mean = targets.iter().sum::<f64>() / n;

        let centred: Vec<Vec<f64>> = rows
            .iter()
            .map(|row| row.iter().zip(&feature_means).map(|(x, m)| x - m).collect())
            .collect();
        let mut residual: Vec<f64> = targets.iter().map(|y| y - target_mean).collect();
        let column_norms: Vec<f64> = (0..width)
            .map(|j| centred.iter().map(|row| row[j] * row[j]).sum::<f64>() / n)
            .collect();

        let l1 = params.alpha * params.l1_ratio;
        let l2 = params.alpha * (1.0 - params.l1_ratio);
        let mut weights = vec![0.0; width];
        let mut iterations = 0;

        for _ in 0..params.max_iter {
            iterations += 1;
            let mut max_change = 0.0f64;
            for j in 0..width {
                if column_norms[j] == 0.0 {
                    continue;
                }
                let old = weights[j];
                let rho = centred
                    .iter()
                    .zip(&residual)
                    .map(|(row, r)| row[j] * (r + row[j] * old))
                    .sum::<f64>()
                    / n;
                let new = soft_threshold(rho, l1) / (column_norms[j] + l2);
                let delta = new - old;
                if delta != 0.0 {
                    for (row, r) in centred.iter().zip(residual.iter_mut()) {
                        *r -= row[j] * delta;
                    }
                    weights[j] = new;
                }
                max_change = max_change.max(delta.abs());
            }
            if max_change <= params.tolerance {
                break;
            }
        }

        let intercept = target_mean
            - weights
                .iter()
                .zip(&feature_means)
                .map(|(w, m)| w * m)
                .sum::<f64>();

        Ok(Self {
            feature_names,
            coefficients: weights,
            intercept,
            params: params.clone(),
            iterations,
        })
    }

    pub fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }

    pub fn predict(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}

fn soft_threshold(value: f64, threshold: f64) -> f64 {
    if value > threshold {
        value - threshold
    } else if value < -threshold {
        value + threshold
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        let rows: Vec<Vec<f64>> = (0..40)
            .map(|i| vec![i as f64 / 4.0, ((i * 7) % 5) as f64])
            .collect();
        let targets = rows.iter().map(|r| 3.0 * r[0] - 2.0 * r[1] + 5.0).collect();
        (rows, targets)
    }

    #[test]
    fn recovers_noiseless_linear_relation() {
        let (rows, targets) = linear_data();
        let params = ElasticNetParams {
            alpha: 1e-8,
            l1_ratio: 0.5,
            max_iter: 10_000,
            tolerance: 1e-12,
        };
        let model =
            ElasticNetModel::fit(vec!["a".into(), "b".into()], &rows, &targets, &params).unwrap();
        assert!((model.coefficients[0] - 3.0).abs() < 1e-3, "{model:?}");
        assert!((model.coefficients[1] + 2.0).abs() < 1e-3, "{model:?}");
        assert!((model.intercept - 5.0).abs() < 1e-3, "{model:?}");
        assert!((model.predict_row(&[2.0, 1.0]) - 9.0).abs() < 1e-2);
    }

    #[test]
    fn heavy_l1_penalty_zeroes_weights() {
        let (rows, targets) = linear_data();
        let params = ElasticNetParams {
            alpha: 1e6,
            l1_ratio: 1.0,
            ..ElasticNetParams::default()
        };
        let model =
            ElasticNetModel::fit(vec!["a".into(), "b".into()], &rows, &targets, &params).unwrap();
        assert!(model.coefficients.iter().all(|w| *w == 0.0));
        let mean = targets.iter().sum::<f64>() / targets.len() as f64;
        assert!((model.intercept - mean).abs() < 1e-9);
    }

    #[test]
    fn rejects_nan_and_infinite_penalties() {
        let (rows, targets) = linear_data();
        let names = || vec!["a".to_string(), "b".to_string()];
        for alpha in [f64::NAN, f64::INFINITY, -0.5] {
            let params = ElasticNetParams {
                alpha,
                ..ElasticNetParams::default()
            };
            let err = ElasticNetModel::fit(names(), &rows, &targets, &params).unwrap_err();
            assert!(err.to_string().contains("Invalid ElasticNet parameters"), "{err}");
        }
        let params = ElasticNetParams {
            l1_ratio: f64::NAN,
            ..ElasticNetParams::default()
        };
        assert!(ElasticNetModel::fit(names(), &rows, &targets, &params).is_err());
    }

    #[test]
    fn rejects_ragged_rows() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        let err = ElasticNetModel::fit(
            vec!["a".into(), "b".into()],
            &rows,
            &[1.0, 2.0],
            &ElasticNetParams::default(),
        );
        assert!(err.is_err());
    }
}
