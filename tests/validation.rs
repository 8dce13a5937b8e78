mod support;

use std::fs;

use datascience::configuration::ConfigPaths;
use datascience::validation::validate_configuration;
use tempfile::tempdir;

#[test]
fn complete_project_passes() {
    let temp = tempdir().unwrap();
    let paths = support::write_project(temp.path(), temp.path(), false);

    let report = validate_configuration(&paths);

    assert!(report.is_ok(), "unexpected errors: {:?}", report.errors);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    assert!(!temp.path().join("artifacts").exists());
}

#[test]
fn missing_config_file_is_reported() {
    let temp = tempdir().unwrap();
    let report = validate_configuration(&ConfigPaths::rooted(temp.path()));
    assert!(!report.is_ok());
    assert!(report.errors[0].contains("Failed to load configuration"));
}

#[test]
fn missing_sections_and_sources_are_reported() {
    let temp = tempdir().unwrap();
    let paths = support::write_project(temp.path(), temp.path(), false);
    fs::remove_file(temp.path().join("data/source.csv")).unwrap();
    fs::write(
        &paths.schema,
        "COLUMNS:\n  x1: float64\n  y: float64\nTARGET_COLUMN:\n  name: label\n",
    )
    .unwrap();
    let config = fs::read_to_string(&paths.config).unwrap();
    let trimmed = config
        .split("model_evaluation:")
        .next()
        .unwrap()
        .to_string();
    fs::write(&paths.config, trimmed).unwrap();

    let report = validate_configuration(&paths);

    assert_eq!(report.errors.len(), 1, "{:?}", report.errors);
    assert!(report.errors[0].starts_with("Model Evaluation stage"));
    assert_eq!(report.warnings.len(), 2, "{:?}", report.warnings);
    assert!(report.warnings.iter().any(|w| w.contains("does not exist yet")));
    assert!(report.warnings.iter().any(|w| w.contains("'label'")));
}

#[test]
fn shipped_configuration_is_valid() {
    let report = validate_configuration(&ConfigPaths::default());
    assert!(
        report.is_ok(),
        "shipped configuration should pass: {:?}",
        report.errors
    );
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
}
