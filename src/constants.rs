pub const CONFIG_FILE_PATH: &str = "config/config.yaml";
pub const PARAMS_FILE_PATH: &str = "params.yaml";
pub const SCHEMA_FILE_PATH: &str = "schema.yaml";

pub const LOG_DIR: &str = "logs";
pub const LOG_FILE_NAME: &str = "logging.log";
