use anyhow::Result;
use tracing::info;

use crate::common::{create_directories, save_bin};
use crate::components::dataset::Frame;
use crate::components::elastic_net::ElasticNetModel;
use crate::entity::ModelTrainerConfig;

pub struct ModelTrainer {
    config: ModelTrainerConfig,
}

impl ModelTrainer {
    pub fn new(config: ModelTrainerConfig) -> Self {
        Self { config }
    }

    pub fn train(&self) -> Result<()> {
        create_directories(&[&self.config.root_dir], true)?;
        let train = Frame::read_csv(&self.config.train_data_path)?
            .features_and_target(&self.config.target_column)?;

        let model = ElasticNetModel::fit(
            train.names,
            &train.rows,
            &train.targets,
            &self.config.params,
        )?;
        info!(
            "ElasticNet fitted on {} rows in {} iteration(s) (alpha={}, l1_ratio={})",
            train.rows.len(),
            model.iterations,
            self.config.params.alpha,
            self.config.params.l1_ratio
        );

        save_bin(self.config.root_dir.join(&self.config.model_name), &model)?;
        Ok(())
    }
}
