//! Tracing setup: stderr always, plus an optional append-only log file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::ConfigError;

/// Millisecond-precision local timestamps on every line.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; hold it until exit.
/// An unopenable log file is a configuration error, reported before any
/// subscriber is installed.
pub fn init(log_file: Option<&Path>) -> Result<Option<WorkerGuard>, ConfigError> {
    let appender = log_file.map(open_log_file).transpose()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_target(false);

    let (file_layer, guard) = match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Open (or create) the log file for appending, never rotating it.
fn open_log_file(path: &Path) -> Result<RollingFileAppender, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: "REMINDER_LOG_FILE".into(),
        message,
    };
    let (dir, name) = split_log_path(path)
        .ok_or_else(|| invalid(format!("{} has no file name", path.display())))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy())
        .build(dir)
        .map_err(|e| invalid(format!("cannot open {}: {e}", path.display())))
}

/// Split a log file path into its directory (current dir if none) and file name.
fn split_log_path(path: &Path) -> Option<(&Path, &std::ffi::OsStr)> {
    let name = path.file_name()?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    Some((dir, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_file_name_logs_to_current_dir() {
        let (dir, name) = split_log_path(Path::new("log.txt")).unwrap();
        assert_eq!(dir, Path::new("."));
        assert_eq!(name, "log.txt");
    }

    #[test]
    fn nested_path_keeps_directory() {
        let (dir, name) = split_log_path(Path::new("/var/log/reminder/run.log")).unwrap();
        assert_eq!(dir, Path::new("/var/log/reminder"));
        assert_eq!(name, "run.log");
    }

    #[test]
    fn path_without_file_name_is_skipped() {
        assert!(split_log_path(Path::new("/")).is_none());
    }

    #[test]
    fn log_file_under_regular_file_is_config_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().join("sub").join("run.log");

        let err = open_log_file(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "REMINDER_LOG_FILE"
        ));
    }

    #[test]
    fn log_file_is_created_in_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");

        open_log_file(&path).unwrap();
        assert!(path.is_file());
    }
}
