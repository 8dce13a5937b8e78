//! Process-wide logger.
//!
//! One `tracing` subscriber is installed per process. Records go to stdout and,
//! for the pipeline binary, to an append-mode log file, both rendered as
//! `[timestamp: LEVEL: module: message]`.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use once_cell::sync::OnceCell;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, prelude::*};

use crate::constants::{LOG_DIR, LOG_FILE_NAME};

static ACTIVE_LOG_FILE: OnceCell<PathBuf> = OnceCell::new();

#[derive(Debug, Clone)]
pub struct LogSettings {
    pub directory: PathBuf,
    pub file_name: String,
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(LOG_DIR),
            file_name: LOG_FILE_NAME.to_string(),
            level: "info".to_string(),
        }
    }
}

impl LogSettings {
    pub fn in_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogHandle {
    log_file: PathBuf,
}

impl LogHandle {
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

/// Installs the file + stdout subscriber. Later calls return a handle to the
/// log file chosen by the first call.
pub fn init(settings: &LogSettings) -> Result<LogHandle> {
    let log_file = ACTIVE_LOG_FILE.get_or_try_init(|| install(settings))?;
    Ok(LogHandle {
        log_file: log_file.clone(),
    })
}

/// Stdout-only variant for the scaffolding binary.
pub fn init_console(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(RecordFormat)
                .with_writer(io::stdout),
        )
        .try_init()
        .map_err(|err| anyhow!(err.to_string()))
}

fn install(settings: &LogSettings) -> Result<PathBuf> {
    fs::create_dir_all(&settings.directory).with_context(|| {
        format!(
            "Failed to create log directory: {}",
            settings.directory.display()
        )
    })?;
    let path = settings.directory.join(&settings.file_name);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(RecordFormat)
                .with_writer(io::stdout),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(RecordFormat)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|err| anyhow!(err.to_string()))?;

    Ok(path)
}

struct RecordFormat;

impl<S, N> FormatEvent<S, N> for RecordFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let module = metadata
            .module_path()
            .and_then(|path| path.rsplit("::").next())
            .unwrap_or_else(|| metadata.target());
        write!(
            writer,
            "[{}: {}: {}: ",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            metadata.level(),
            module
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer, "]")
    }
}
