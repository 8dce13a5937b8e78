use std::fs;

use datascience::scaffold::{TEMPLATE_FILES, generate};
use tempfile::tempdir;

#[test]
fn second_run_creates_nothing() {
    let temp = tempdir().unwrap();
    let root = temp.path();

    let first = generate(root, TEMPLATE_FILES).unwrap();
    assert_eq!(first.created_files.len(), TEMPLATE_FILES.len());
    assert!(first.existing_files.is_empty());
    for entry in TEMPLATE_FILES {
        let path = root.join(entry);
        assert!(path.is_file(), "{} missing", path.display());
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }
    assert!(root.join(".github/workflows").is_dir());
    assert!(root.join("src/components").is_dir());

    let second = generate(root, TEMPLATE_FILES).unwrap();
    assert!(second.created_dirs.is_empty());
    assert!(second.created_files.is_empty());
    assert_eq!(second.existing_files.len(), TEMPLATE_FILES.len());
}

#[test]
fn non_empty_files_are_left_untouched() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("config")).unwrap();
    fs::write(root.join("config/config.yaml"), "artifacts_root: artifacts\n").unwrap();

    let report = generate(root, &["config/config.yaml", "params.yaml"]).unwrap();

    assert_eq!(report.created_files, vec![root.join("params.yaml")]);
    assert_eq!(report.existing_files, vec![root.join("config/config.yaml")]);
    assert!(report.created_dirs.is_empty());
    assert_eq!(
        fs::read_to_string(root.join("config/config.yaml")).unwrap(),
        "artifacts_root: artifacts\n"
    );
}
