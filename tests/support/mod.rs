#![allow(dead_code)]

use std::fs;
use std::path::Path;

use datascience::configuration::ConfigPaths;

/// Writes `config/config.yaml`, `params.yaml`, `schema.yaml` and a source CSV
/// under `root`. Artifact paths inside the config are prefixed with `base`,
/// so an empty `base` yields paths relative to the process working directory.
pub fn write_project(root: &Path, base: &Path, extra_column: bool) -> ConfigPaths {
    let p = |rel: &str| base.join(rel).display().to_string();
    fs::create_dir_all(root.join("config")).unwrap();
    fs::create_dir_all(root.join("data")).unwrap();

    let config = format!(
        "artifacts_root: '{artifacts}'

data_ingestion:
  root_dir: '{ingest_root}'
  source_path: '{source}'
  local_data_file: '{data}'

data_validation:
  root_dir: '{validation_root}'
  data_path: '{data}'
  status_file: '{status}'

data_transformation:
  root_dir: '{transform_root}'
  data_path: '{data}'
  test_size: 0.25
  random_seed: 42

model_trainer:
  root_dir: '{trainer_root}'
  train_data_path: '{train}'
  test_data_path: '{test}'
  model_name: model.bin

model_evaluation:
  root_dir: '{evaluation_root}'
  test_data_path: '{test}'
  model_path: '{model}'
  metric_file_name: '{metrics}'
",
        artifacts = p("artifacts"),
        ingest_root = p("artifacts/data_ingestion"),
        source = p("data/source.csv"),
        data = p("artifacts/data_ingestion/data.csv"),
        validation_root = p("artifacts/data_validation"),
        status = p("artifacts/data_validation/status.txt"),
        transform_root = p("artifacts/data_transformation"),
        trainer_root = p("artifacts/model_trainer"),
        train = p("artifacts/data_transformation/train.csv"),
        test = p("artifacts/data_transformation/test.csv"),
        evaluation_root = p("artifacts/model_evaluation"),
        model = p("artifacts/model_trainer/model.bin"),
        metrics = p("artifacts/model_evaluation/metrics.json"),
    );
    fs::write(root.join("config/config.yaml"), config).unwrap();

    fs::write(
        root.join("params.yaml"),
        "ElasticNet:\n  alpha: 0.0001\n  l1_ratio: 0.1\n  max_iter: 5000\n  tolerance: 0.000001\n",
    )
    .unwrap();
    fs::write(
        root.join("schema.yaml"),
        "COLUMNS:\n  x1: float64\n  x2: int64\n  y: float64\n\nTARGET_COLUMN:\n  name: y\n",
    )
    .unwrap();

    let mut csv = String::from(if extra_column { "x1,x2,y,z\n" } else { "x1,x2,y\n" });
    for i in 0..40 {
        let x1 = i as f64 * 0.5;
        let x2 = (i * 3) % 7;
        let y = 2.0 * x1 + 3.0 * x2 as f64 + 1.0;
        if extra_column {
            csv.push_str(&format!("{x1},{x2},{y},{i}\n"));
        } else {
            csv.push_str(&format!("{x1},{x2},{y}\n"));
        }
    }
    fs::write(root.join("data/source.csv"), csv).unwrap();

    ConfigPaths::rooted(root)
}
