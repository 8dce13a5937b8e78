use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::config_box::ConfigBox;
use crate::error::{CommonError, ConfigError};

/// Reads a YAML document into a [`ConfigBox`].
///
/// An empty file (or one that parses to `null`) is reported as
/// [`ConfigError::Empty`] rather than an empty mapping.
pub fn read_yaml(path: impl AsRef<Path>) -> Result<ConfigBox, CommonError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CommonError::io(path, source))?;
    if content.trim().is_empty() {
        return Err(ConfigError::Empty {
            path: path.to_path_buf(),
        }
        .into());
    }
    let value: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|source| CommonError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    if value.is_null() {
        return Err(ConfigError::Empty {
            path: path.to_path_buf(),
        }
        .into());
    }
    let config = ConfigBox::from_yaml(value)?;
    info!("yaml file: {} loaded successfully", path.display());
    Ok(config)
}

/// Creates every directory in `paths` along with missing ancestors.
///
/// Returns the directories that did not exist before the call.
pub fn create_directories<P: AsRef<Path>>(
    paths: &[P],
    verbose: bool,
) -> Result<Vec<PathBuf>, CommonError> {
    let mut created = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            continue;
        }
        fs::create_dir_all(path).map_err(|source| CommonError::io(path, source))?;
        if verbose {
            info!("created directory at: {}", path.display());
        }
        created.push(path.to_path_buf());
    }
    Ok(created)
}

pub fn save_json<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    data: &T,
) -> Result<(), CommonError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| CommonError::io(path, source))?;
    let mut writer = BufWriter::new(file);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    data.serialize(&mut serializer)
        .map_err(|source| CommonError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    writer
        .flush()
        .map_err(|source| CommonError::io(path, source))?;
    info!("json file saved at: {}", path.display());
    Ok(())
}

pub fn load_json(path: impl AsRef<Path>) -> Result<ConfigBox, CommonError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CommonError::io(path, source))?;
    let value: Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CommonError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let content = ConfigBox::from_value(value)?;
    info!("json file loaded successfully from: {}", path.display());
    Ok(content)
}

/// Persists `data` with bincode. Self-describing values such as
/// `serde_json::Value` cannot be restored from this encoding.
pub fn save_bin<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    data: &T,
) -> Result<(), CommonError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| CommonError::io(path, source))?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, data).map_err(|source| CommonError::Binary {
        path: path.to_path_buf(),
        source,
    })?;
    writer
        .flush()
        .map_err(|source| CommonError::io(path, source))?;
    info!("binary file saved at: {}", path.display());
    Ok(())
}

pub fn load_bin<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, CommonError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CommonError::io(path, source))?;
    let data = bincode::deserialize_from(BufReader::new(file)).map_err(|source| {
        CommonError::Binary {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!("binary file loaded from: {}", path.display());
    Ok(data)
}
