//! Tracing subscriber setup
//!
//! Every crate in the workspace logs through `tracing`; this module installs a
//! global subscriber that shows those events on stdout, in a log file, or both.
//!
//! ## Example
//!
//! ```rust,ignore
//! use unistream::telemetry::{init_subscriber, OutputFormat, SubscriberConfig};
//!
//! let config = SubscriberConfig::builder()
//!     .log_level(tracing::Level::DEBUG)
//!     .output_format(OutputFormat::Json)
//!     .build();
//! let _guard = init_subscriber(config)?;
//! ```

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use unistream_spec::NormalizerError;

/// Crates whose events pass the level filter.
const LOG_TARGETS: [&str; 5] = [
    "unistream",
    "unistream_core",
    "unistream_spec",
    "unistream_protocol_gemini",
    "unistream_protocol_openai",
];

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format
    Json,
    /// Compact JSON format
    JsonCompact,
}

impl std::str::FromStr for OutputFormat {
    type Err = NormalizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-compact" => Ok(Self::JsonCompact),
            _ => Err(NormalizerError::ConfigurationError(format!(
                "Invalid log format: {s}. Valid options: text, json, json-compact"
            ))),
        }
    }
}

/// Configuration for the tracing subscriber
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub log_level: tracing::Level,
    pub output_format: OutputFormat,
    /// Write events to stdout.
    pub enable_console: bool,
    /// Also append events to this file (never rotated, no ANSI colors).
    pub log_file: Option<PathBuf>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
            enable_console: true,
            log_file: None,
        }
    }
}

impl SubscriberConfig {
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }

    /// Text output at `DEBUG`, useful to watch block and pairing decisions.
    pub fn debug() -> Self {
        Self {
            log_level: tracing::Level::DEBUG,
            ..Self::default()
        }
    }

    /// JSON lines at `WARN` into `log_file`, nothing on stdout.
    pub fn production(log_file: PathBuf) -> Self {
        Self {
            log_level: tracing::Level::WARN,
            output_format: OutputFormat::Json,
            enable_console: false,
            log_file: Some(log_file),
        }
    }
}

/// Builder for [`SubscriberConfig`]
#[derive(Debug, Default)]
pub struct SubscriberConfigBuilder {
    log_level: Option<tracing::Level>,
    output_format: Option<OutputFormat>,
    enable_console: Option<bool>,
    log_file: Option<PathBuf>,
}

impl SubscriberConfigBuilder {
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the log level from a string such as `"warn"`.
    pub fn log_level_str(mut self, level: &str) -> Result<Self, NormalizerError> {
        let parsed = level.parse::<tracing::Level>().map_err(|_| {
            NormalizerError::ConfigurationError(format!(
                "Invalid log level: {level}. Valid options: trace, debug, info, warn, error"
            ))
        })?;
        self.log_level = Some(parsed);
        Ok(self)
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn enable_console(mut self, enable: bool) -> Self {
        self.enable_console = Some(enable);
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn build(self) -> SubscriberConfig {
        SubscriberConfig {
            log_level: self.log_level.unwrap_or(tracing::Level::INFO),
            output_format: self.output_format.unwrap_or_default(),
            enable_console: self.enable_console.unwrap_or(true),
            log_file: self.log_file,
        }
    }
}

/// `EnvFilter` directives for the workspace crates at `level`.
pub fn filter_directives(level: tracing::Level) -> String {
    let level = level.as_str().to_lowercase();
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn file_writer(
    path: &Path,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard), NormalizerError> {
    let file_name = path.file_name().ok_or_else(|| {
        NormalizerError::ConfigurationError(format!(
            "log file path has no file name: {}",
            path.display()
        ))
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| {
        NormalizerError::ConfigurationError(format!(
            "cannot create log directory {}: {e}",
            dir.display()
        ))
    })?;
    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

/// Install the global subscriber.
///
/// Returns the file writer's guard when `log_file` is set; keep it alive for
/// as long as events should reach the file, since dropping it flushes and
/// stops the background writer.
///
/// Calling this when a global subscriber already exists is not an error and
/// returns `Ok(None)`.
pub fn init_subscriber(config: SubscriberConfig) -> Result<Option<WorkerGuard>, NormalizerError> {
    let filter = filter_directives(config.log_level);

    let (file, guard) = match &config.log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };
    let ansi = config.enable_console && file.is_none();
    let writer = match (config.enable_console, file) {
        (true, Some(file)) => BoxMakeWriter::new(std::io::stdout.and(file)),
        (false, Some(file)) => BoxMakeWriter::new(file),
        (true, None) => BoxMakeWriter::new(std::io::stdout),
        (false, None) => BoxMakeWriter::new(std::io::sink),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true);

    let init_result = match config.output_format {
        OutputFormat::Json => builder
            .with_thread_ids(true)
            .with_thread_names(true)
            .json()
            .try_init(),
        OutputFormat::JsonCompact => builder
            .with_thread_ids(true)
            .with_thread_names(true)
            .json()
            .flatten_event(true)
            .try_init(),
        OutputFormat::Text => builder.try_init(),
    };

    match init_result {
        Ok(()) => Ok(guard),
        Err(e) => {
            let error_msg = e.to_string();
            if error_msg.contains("global default trace dispatcher has already been set") {
                Ok(None)
            } else {
                Err(NormalizerError::ConfigurationError(format!(
                    "Failed to initialize tracing: {e}"
                )))
            }
        }
    }
}

/// Install the default subscriber (text on stdout at `INFO`).
pub fn init_default() -> Result<Option<WorkerGuard>, NormalizerError> {
    init_subscriber(SubscriberConfig::default())
}

/// Install a subscriber configured from environment variables:
///
/// - `UNISTREAM_LOG_LEVEL`: trace, debug, info, warn, error
/// - `UNISTREAM_LOG_FORMAT`: text, json, json-compact
/// - `UNISTREAM_LOG_FILE`: log file path
pub fn init_from_env() -> Result<Option<WorkerGuard>, NormalizerError> {
    init_subscriber(config_from_env()?)
}

fn config_from_env() -> Result<SubscriberConfig, NormalizerError> {
    let mut builder = SubscriberConfig::builder();
    if let Ok(level) = std::env::var("UNISTREAM_LOG_LEVEL") {
        builder = builder.log_level_str(&level)?;
    }
    if let Ok(format) = std::env::var("UNISTREAM_LOG_FORMAT") {
        builder = builder.output_format(format.parse()?);
    }
    if let Ok(file_path) = std::env::var("UNISTREAM_LOG_FILE") {
        builder = builder.log_file(file_path);
    }
    Ok(builder.build())
}
