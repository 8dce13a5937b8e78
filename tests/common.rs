use std::collections::BTreeMap;
use std::fs;

use datascience::common::{create_directories, load_bin, load_json, read_yaml, save_bin, save_json};
use datascience::error::{CommonError, ConfigError};
use serde_json::{Value, json};
use tempfile::tempdir;

#[test]
fn read_yaml_exposes_nested_values_both_ways() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("config.yaml");
    let source =
        "model:\n  name: elasticnet\n  params:\n    alpha: 0.2\n    layers: [1, 2]\nseed: 7\n";
    fs::write(&path, source).unwrap();

    let config = read_yaml(&path).unwrap();
    let direct: Value = serde_yaml::from_str(source).unwrap();
    assert_eq!(config, direct);

    assert_eq!(config["model"]["params"]["alpha"], json!(0.2));
    let model = config.section("model").unwrap();
    assert_eq!(model.field::<String>("name").unwrap(), "elasticnet");
    assert_eq!(
        model.section("params").unwrap().field::<Vec<u32>>("layers").unwrap(),
        vec![1, 2]
    );
    assert_eq!(config.lookup("model.params.alpha"), Some(&json!(0.2)));
    assert_eq!(config.field::<u64>("seed").unwrap(), 7);
}

#[test]
fn read_yaml_rejects_empty_files() {
    let temp = tempdir().unwrap();
    for (name, content) in [("empty.yaml", ""), ("blank.yaml", "\n   \n"), ("null.yaml", "~\n")] {
        let path = temp.path().join(name);
        fs::write(&path, content).unwrap();
        let err = read_yaml(&path).unwrap_err();
        assert!(
            matches!(err, CommonError::Config(ConfigError::Empty { .. })),
            "{name}: {err}"
        );
    }
}

#[test]
fn read_yaml_propagates_io_and_parse_failures() {
    let temp = tempdir().unwrap();
    let missing = read_yaml(temp.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(missing, CommonError::Io { .. }));

    let path = temp.path().join("broken.yaml");
    fs::write(&path, "key: [unterminated\n").unwrap();
    assert!(matches!(read_yaml(&path).unwrap_err(), CommonError::Yaml { .. }));

    let path = temp.path().join("list.yaml");
    fs::write(&path, "- a\n- b\n").unwrap();
    assert!(matches!(
        read_yaml(&path).unwrap_err(),
        CommonError::Config(ConfigError::NotAMapping { .. })
    ));
}

#[test]
fn read_yaml_rejects_non_finite_numbers_by_key() {
    let temp = tempdir().unwrap();
    let cases = [
        ("nan.yaml", "tolerance: .nan\nbig: 1\n", "tolerance"),
        ("inf.yaml", "tolerance: 0.1\nbig: .inf\n", "big"),
        ("nested.yaml", "model:\n  params:\n    alpha: -.inf\n", "model.params.alpha"),
    ];
    for (name, content, expected) in cases {
        let path = temp.path().join(name);
        fs::write(&path, content).unwrap();
        match read_yaml(&path).unwrap_err() {
            CommonError::Config(ConfigError::NonFiniteNumber { key, value }) => {
                assert_eq!(key, expected, "{name}");
                assert!(!value.is_finite(), "{name}");
            }
            other => panic!("{name}: unexpected error {other}"),
        }
    }
}

#[test]
fn create_directories_is_idempotent() {
    let temp = tempdir().unwrap();
    let dirs = [
        temp.path().join("artifacts/data_ingestion"),
        temp.path().join("artifacts/model_trainer"),
    ];

    let first = create_directories(&dirs, true).unwrap();
    assert_eq!(first, dirs.to_vec());
    assert!(dirs.iter().all(|dir| dir.is_dir()));

    let second = create_directories(&dirs, true).unwrap();
    assert!(second.is_empty());
}

#[test]
fn json_round_trip() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("metrics.json");
    let data = json!({"rmse": 0.5, "scores": [1, 2, 3], "nested": {"ok": true}});

    save_json(&path, &data).unwrap();
    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\n    \""), "expected four-space indentation: {raw}");

    let loaded = load_json(&path).unwrap();
    assert_eq!(loaded, data);
    assert_eq!(loaded.lookup("nested.ok"), Some(&json!(true)));
}

#[test]
fn json_overwrites_existing_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("out.json");
    save_json(&path, &json!({"a": 1, "b": 2})).unwrap();
    save_json(&path, &json!({"c": 3})).unwrap();
    assert_eq!(load_json(&path).unwrap(), json!({"c": 3}));
}

#[test]
fn binary_round_trip() {
    let temp = tempdir().unwrap();

    let empty: BTreeMap<String, f64> = BTreeMap::new();
    let path = temp.path().join("empty.bin");
    save_bin(&path, &empty).unwrap();
    assert_eq!(load_bin::<BTreeMap<String, f64>>(&path).unwrap(), empty);

    let mut nested: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    nested
        .entry("weights".into())
        .or_default()
        .insert("x1".into(), 2.0);
    nested
        .entry("bias".into())
        .or_default()
        .insert("value".into(), -0.5);
    let path = temp.path().join("nested.bin");
    save_bin(&path, &nested).unwrap();
    assert_eq!(
        load_bin::<BTreeMap<String, BTreeMap<String, f64>>>(&path).unwrap(),
        nested
    );

    let numbers: Vec<f64> = (0..1000).map(|i| i as f64 * 0.25).collect();
    let path = temp.path().join("numbers.bin");
    save_bin(&path, &numbers).unwrap();
    assert_eq!(load_bin::<Vec<f64>>(&path).unwrap(), numbers);
}

#[test]
fn load_bin_reports_corrupt_payloads() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("corrupt.bin");
    fs::write(&path, [0xff, 0xff]).unwrap();
    assert!(matches!(
        load_bin::<Vec<f64>>(&path).unwrap_err(),
        CommonError::Binary { .. }
    ));
}
