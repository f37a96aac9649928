//! # Logger
//!
//! Installs the process-wide `tracing` subscriber used by the host and every
//! service module: compact console output, an optional non-blocking rolling
//! file (plain or JSON lines) and `RUST_LOG`-style filtering.
//!
//! ## Example
//!
//! ```rust
//! # use mosaic_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder("mosaic-server")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct FileOutput {
    path: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

/// A builder for the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    level: LevelFilter,
    env_filter: Option<String>,
    file: Option<FileOutput>,
}

impl LoggerBuilder {
    /// Minimum level emitted when neither `RUST_LOG` nor [`Self::env_filter`] says otherwise.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Programmatic filter directives (e.g. `mosaic_kernel=debug,hyper=info`).
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Writes logs into `path`, rotated daily by default.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(FileOutput {
            path: path.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        });
        self
    }

    /// No effect unless [`Self::path`] was set.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.rotation = rotation;
        }
        self
    }

    /// No effect unless [`Self::path`] was set.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn max_files(mut self, max: usize) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.max_files = max;
        }
        self
    }

    /// Emits file output as JSON lines. No effect unless [`Self::path`] was set.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn json(mut self, enabled: bool) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.json = enabled;
        }
        self
    }

    /// Installs the subscriber.
    ///
    /// The returned [`Logger`] owns the file worker guard and must be kept alive
    /// until shutdown so buffered lines are flushed.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`,
    ///   a malformed filter or no enabled output.
    /// * [`LoggerError::Appender`] when the log directory cannot be used.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let env_filter = self.build_env_filter()?;

        let mut layers = Vec::new();
        if self.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = if let Some(file) = self.file {
            fs::create_dir_all(&file.path).map_err(|e| LoggerError::Internal {
                message: e.to_string().into(),
                context: Some(format!("Failed to create path: {}", file.path.display()).into()),
            })?;

            let appender = RollingFileAppender::builder()
                .rotation(file.rotation)
                .filename_prefix(&self.name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(file.max_files)
                .build(&file.path)
                .context("Building rolling file appender")?;

            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = layer().with_writer(writer).with_ansi(false);
            layers.push(if file.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging output enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }
        if self.file.as_ref().is_some_and(|f| f.max_files == 0) {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }
        Ok(())
    }

    fn build_env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.env_filter {
            None => Ok(builder.from_env_lossy()),
            Some(filter) => builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            }),
        }
    }
}

/// Handle to the installed logging system; holds the file worker guard.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder. `name` prefixes rolling log files (`mosaic-server.2026-10-18.log`).
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            console: true,
            level: LevelFilter::INFO,
            env_filter: None,
            file: None,
        }
    }

    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}
