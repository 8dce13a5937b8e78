use anyhow::{Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::info;

use crate::common::create_directories;
use crate::components::data_validation::read_validation_status;
use crate::components::dataset::Frame;
use crate::entity::DataTransformationConfig;

pub const TRAIN_FILE: &str = "train.csv";
pub const TEST_FILE: &str = "test.csv";

pub struct DataTransformation {
    config: DataTransformationConfig,
}

impl DataTransformation {
    pub fn new(config: DataTransformationConfig) -> Self {
        Self { config }
    }

    /// Shuffles the validated dataset with a fixed seed and writes the
    /// train and test splits into `root_dir`.
    pub fn train_test_split(&self) -> Result<()> {
        if !read_validation_status(&self.config.status_file)? {
            bail!(
                "Data schema is not valid (see {})",
                self.config.status_file.display()
            );
        }
        if !(self.config.test_size > 0.0 && self.config.test_size < 1.0) {
            bail!(
                "test_size must be in (0, 1), got {}",
                self.config.test_size
            );
        }

        create_directories(&[&self.config.root_dir], true)?;
        let frame = Frame::read_csv(&self.config.data_path)?;
        if frame.len() < 2 {
            bail!(
                "Dataset {} needs at least two rows to split, found {}",
                self.config.data_path.display(),
                frame.len()
            );
        }

        let (train_idx, test_idx) =
            split_indices(frame.len(), self.config.test_size, self.config.random_seed);
        let train = frame.subset(&train_idx);
        let test = frame.subset(&test_idx);
        train.write_csv(&self.config.root_dir.join(TRAIN_FILE))?;
        test.write_csv(&self.config.root_dir.join(TEST_FILE))?;

        info!("Split data into training and test sets");
        info!("train shape: ({}, {})", train.len(), train.columns().len());
        info!("test shape: ({}, {})", test.len(), test.columns().len());
        Ok(())
    }
}

/// Seeded shuffle of `0..len`. The test share is rounded up and both sides
/// keep at least one row.
pub fn split_indices(len: usize, test_size: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..len).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let test_len = ((len as f64) * test_size).ceil() as usize;
    let test_len = test_len.clamp(1, len.saturating_sub(1));
    let train = indices.split_off(test_len);
    (train, indices)
}
