//! Application logging.
//!
//! [`Logger`] keeps an in-memory buffer shown by the logs dialog and, when
//! file logging is enabled, mirrors every entry to
//! `<data dir>/panelist/panelist.log`. Library modules log through the `log`
//! macros; [`init_logging`] routes those records into the buffer and, when
//! enabled, the same file.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
    file_writer: Option<Arc<Mutex<BufWriter<File>>>>,
    enabled: bool,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            file_writer: None,
            enabled: false,
        }
    }

    /// Create a logger, opening the log file when `enabled`.
    pub fn from_config(enabled: bool) -> Result<Self> {
        let mut logger = Self::new();
        if enabled {
            let path = Self::get_log_file_path()?;
            let file = open_log_file(&path)?;
            logger.file_writer = Some(Arc::new(Mutex::new(BufWriter::new(file))));
            logger.enabled = true;
        }
        Ok(logger)
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let formatted_message = self.push(message);

        if let Some(writer) = &self.file_writer {
            if let Ok(mut writer) = writer.lock() {
                let _ = writeln!(writer, "{}", formatted_message);
                let _ = writer.flush();
            }
        }
    }

    /// Timestamp `message` and add it to the buffer only.
    fn push(&self, message: String) -> String {
        let formatted_message = format!("[{}] {}", Utc::now().format("%H:%M:%S%.3f"), message);
        if let Ok(mut logs) = self.logs.lock() {
            logs.push(formatted_message.clone());
        }
        formatted_message
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            let mut sorted_logs = logs.clone();
            sorted_logs.reverse();
            sorted_logs
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn has_file_writer(&self) -> bool {
        self.file_writer.is_some()
    }

    pub fn file_writer(&self) -> Option<Arc<Mutex<BufWriter<File>>>> {
        self.file_writer.clone()
    }

    /// Path of the log file: `<data dir>/panelist/panelist.log`
    pub fn get_log_file_path() -> Result<PathBuf> {
        let dir = dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
            .context("Could not determine data directory")?;
        Ok(dir.join("panelist").join("panelist.log"))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

fn open_log_file(path: &PathBuf) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

/// Route `log` records into `logger`'s buffer and, with `to_file`, the log file.
///
/// Returns the log file path when file logging was set up. Only call this
/// once per process; `log` accepts a single global logger.
pub fn init_logging(logger: &Logger, to_file: bool) -> Result<Option<PathBuf>> {
    let buffer = logger.clone();
    let memory = fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("{:<5} {}", record.level(), message)))
        .chain(fern::Output::call(move |record| {
            buffer.push(record.args().to_string());
        }));

    let mut dispatch = fern::Dispatch::new()
        .level(log::LevelFilter::Info)
        .level_for("reqwest", log::LevelFilter::Warn)
        .level_for("hyper", log::LevelFilter::Warn)
        .chain(memory);

    let path = if to_file {
        let path = Logger::get_log_file_path()?;
        let file = open_log_file(&path)?;
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{}] {:<5} {}: {}",
                        Utc::now().format("%H:%M:%S%.3f"),
                        record.level(),
                        record.target(),
                        message
                    ))
                })
                .chain(file),
        );
        Some(path)
    } else {
        None
    };

    dispatch.apply().context("Failed to install logger")?;
    Ok(path)
}
