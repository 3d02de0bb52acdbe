//! Logging setup for taal services.
//!
//! Console and daily rolling file output on top of `tracing-subscriber`, with
//! an optional background thread that prunes old log files. `log` records
//! emitted by the other crates are routed through the same subscriber.

use log::error;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const DEFAULT_LOG_DIR: &str = "./logs";
const DEFAULT_FILE_PREFIX: &str = "taal.log";
const DEFAULT_LEVEL: &str = "info";
const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// The `logger:` section of the service configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    /// Filter directives, e.g. `info` or `info,taal_axum=debug`.
    pub level: String,
    pub console: bool,
    pub file: bool,
    pub dir: PathBuf,
    pub file_prefix: String,
    pub time_format: String,
    /// Rolled files to keep; unset keeps everything.
    pub max_files: Option<u16>,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            console: true,
            file: false,
            dir: PathBuf::from(DEFAULT_LOG_DIR),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            max_files: None,
        }
    }
}

/// Logger builder.
pub struct LoggerConfig {
    settings: LoggerSettings,
    cleanup_interval: Duration,
}

impl LoggerConfig {
    pub fn from_settings(settings: LoggerSettings) -> Self {
        Self {
            settings,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }

    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// `RUST_LOG` wins over the configured level; bad directives fall back to `info`.
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.settings.level))
            .unwrap_or_else(|e| {
                eprintln!("invalid log level {:?}: {}", self.settings.level, e);
                EnvFilter::new(DEFAULT_LEVEL)
            })
    }

    /// Install the global subscriber and start the cleanup thread if configured.
    ///
    /// Keep the returned guard alive for the lifetime of the process, dropping
    /// it flushes and stops the file writer. A second call leaves the first
    /// subscriber in place.
    pub fn init(self) -> Option<WorkerGuard> {
        let time_format = self.settings.time_format.clone();
        let console_layer = self.build_console_layer(&time_format);
        let (file_layer, guard) = self.build_file_layer(&time_format);

        if let Err(e) = Registry::default()
            .with(self.env_filter())
            .with(console_layer)
            .with(file_layer)
            .try_init()
        {
            eprintln!("logger already initialized: {}", e);
        }

        self.spawn_cleanup_task_if_needed();

        guard
    }

    fn build_console_layer<S>(&self, time_format: &str) -> Option<impl Layer<S>>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        self.settings.console.then(|| {
            fmt::layer()
                .with_timer(ChronoLocal::new(time_format.to_string()))
                .with_writer(std::io::stdout)
        })
    }

    fn build_file_layer<S>(&self, time_format: &str) -> (Option<impl Layer<S>>, Option<WorkerGuard>)
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        if !self.settings.file {
            return (None, None);
        }

        let file_appender =
            tracing_appender::rolling::daily(&self.settings.dir, &self.settings.file_prefix);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let layer = fmt::layer()
            .with_timer(ChronoLocal::new(time_format.to_string()))
            .with_ansi(false)
            .with_writer(non_blocking);

        (Some(layer), Some(guard))
    }

    fn spawn_cleanup_task_if_needed(&self) {
        let (Some(max_files), true) = (self.settings.max_files, self.settings.file) else {
            return;
        };

        let log_dir = self.settings.dir.clone();
        let file_prefix = self.settings.file_prefix.clone();
        let interval = self.cleanup_interval;

        std::thread::spawn(move || {
            loop {
                cleanup_old_logs(&log_dir, &file_prefix, usize::from(max_files));
                std::thread::sleep(interval);
            }
        });
    }
}

/// Keep the newest `max_files` files starting with `file_prefix`.
///
/// Relies on the date suffix sorting lexically (`taal.log.2026-10-01`).
fn cleanup_old_logs(log_dir: &Path, file_prefix: &str, max_files: usize) {
    if !log_dir.exists() {
        return;
    }

    let read_dir = match std::fs::read_dir(log_dir) {
        Ok(dir) => dir,
        Err(e) => {
            error!("Failed to read log directory {}: {}", log_dir.display(), e);
            return;
        }
    };

    let mut log_files: Vec<_> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let file_name = entry.file_name().into_string().ok()?;
            file_name
                .starts_with(file_prefix)
                .then(|| (entry.path(), file_name))
        })
        .collect();

    log_files.sort_by(|a, b| b.1.cmp(&a.1));

    for (path, _) in log_files.iter().skip(max_files) {
        if let Err(e) = std::fs::remove_file(path) {
            error!("Failed to remove old log file {}: {}", path.display(), e);
        }
    }
}
