// HyPy - Hydra Chain RPC Toolkit
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Logging configuration for HyPy components
//!
//! Provides centralized logging setup with:
//! - Console output on stderr, so stdout stays reserved for command output
//! - Optional file logging, either to a given path or rolled daily in the temp dir
//! - Environment variable support (`RUST_LOG` overrides the level from the CLI)

use eyre::{eyre, Result};
use std::{
    env, fs,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
    sync::Once,
};
use tracing::{level_filters::LevelFilter, Level};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Where, besides the console, log records are written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileLogging {
    /// Console only
    #[default]
    Disabled,
    /// Daily rolling file under `<temp>/hypy-logs/<component>/`
    TempDir,
    /// Append to this file
    Path(PathBuf),
}

impl From<Option<PathBuf>> for FileLogging {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Disabled, Self::Path)
    }
}

/// Initialize logging for a HyPy component
///
/// This function sets up:
/// - A console layer on stderr, colored when stderr is a terminal
/// - An optional file layer without colors
/// - `level` as the default, unless `RUST_LOG` is set
///
/// The returned guard flushes the file writer when dropped; keep it alive for
/// the lifetime of the program. It is `None` when file logging is disabled.
///
/// # Examples
/// ```rust,no_run
/// use hypy_utils::logging::{self, FileLogging};
/// use tracing::level_filters::LevelFilter;
///
/// let _guard = logging::init_logging("hy", LevelFilter::WARN, FileLogging::Disabled).unwrap();
/// tracing::warn!("Visible with the default verbosity");
/// ```
pub fn init_logging(
    component_name: &str,
    level: LevelFilter,
    file: FileLogging,
) -> Result<Option<WorkerGuard>> {
    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(level >= LevelFilter::DEBUG)
        .compact()
        .with_filter(filter_for_console(level)?);

    let (file_layer, guard) = match file_target(component_name, file)? {
        Some((dir, file_name, daily)) => {
            let appender = if daily {
                rolling::daily(&dir, &file_name)
            } else {
                rolling::never(&dir, &file_name)
            };
            let (writer, guard) = non_blocking(appender);

            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_filter(filter_for_file(level));

            (Some(layer), Some((guard, dir.join(file_name))))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| eyre!("Failed to initialize tracing subscriber: {e}"))?;

    let guard = guard.map(|(guard, path)| {
        tracing::debug!(component = component_name, log_file = %path.display(), "File logging enabled");
        guard
    });

    log_environment_info(component_name);

    Ok(guard)
}

/// Resolve the directory, file name and rotation of the file layer
fn file_target(component_name: &str, file: FileLogging) -> Result<Option<(PathBuf, String, bool)>> {
    match file {
        FileLogging::Disabled => Ok(None),
        FileLogging::TempDir => {
            let dir = create_log_directory(component_name)?;
            Ok(Some((dir, format!("{component_name}.log"), true)))
        }
        FileLogging::Path(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| eyre!("Log file path has no file name: {}", path.display()))?
                .to_string_lossy()
                .into_owned();
            let dir = match path.parent() {
                Some(parent) if parent != Path::new("") => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            fs::create_dir_all(&dir)?;
            Ok(Some((dir, file_name, false)))
        }
    }
}

/// Create log directory in system temp folder
fn create_log_directory(component_name: &str) -> Result<PathBuf> {
    let log_dir = env::temp_dir().join("hypy-logs").join(component_name);

    fs::create_dir_all(&log_dir)?;

    Ok(log_dir)
}

/// Console filter: `RUST_LOG` or `level`, with HTTP internals kept quiet
fn filter_for_console(level: LevelFilter) -> Result<EnvFilter> {
    Ok(EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
        .add_directive("hyper=warn".parse()?)
        .add_directive("hyper_util=warn".parse()?)
        .add_directive("reqwest=warn".parse()?))
}

/// File filter: `RUST_LOG` or `level`
fn filter_for_file(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder().with_default_directive(level.into()).from_env_lossy()
}

/// Log useful environment information
fn log_environment_info(component_name: &str) {
    let rust_log = env::var("RUST_LOG").unwrap_or_default();
    let args: Vec<String> = env::args().collect();

    tracing::debug!(
        component = component_name,
        rust_log = %rust_log,
        args = ?args,
        "Environment information"
    );
}

/// Initialize simple logging (console only, compact, captured by the test harness)
///
/// # Arguments
/// * `level` - The default log level to use when `RUST_LOG` is unset
pub fn init_simple_logging(level: Level) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for_file(LevelFilter::from_level(level)))
        .with_test_writer()
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| eyre!("Failed to initialize simple logging: {e}"))?;

    Ok(())
}

// Global test logging initialization - ensures logging is only set up once across all tests
static TEST_LOGGING_INIT: Once = Once::new();

/// Safe logging initialization for tests - can be called multiple times without crashing
///
/// Defaults to INFO but respects `RUST_LOG`.
///
/// # Usage
/// ```rust
/// use hypy_utils::logging;
///
/// logging::ensure_test_logging(None);
/// tracing::info!("This will work safely in any test!");
/// ```
pub fn ensure_test_logging(default_level: Option<Level>) {
    TEST_LOGGING_INIT.call_once(|| {
        // A subscriber may already be installed by another harness; that is fine.
        let _ = init_simple_logging(default_level.unwrap_or(Level::INFO));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, error, info, warn};

    #[test]
    fn test_logging_functions_work() {
        ensure_test_logging(None);

        info!("Test info message");
        warn!("Test warning message");
        debug!("Test debug message");
        error!("Test error message");
    }

    #[test]
    fn test_log_directory_creation() {
        let log_dir = create_log_directory("test-component").unwrap();

        assert!(log_dir.exists());
        assert!(log_dir.to_string_lossy().contains("hypy-logs"));
        assert!(log_dir.ends_with("test-component"));
    }

    #[test]
    fn test_file_target() {
        assert_eq!(file_target("hy", FileLogging::Disabled).unwrap(), None);

        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("hy.log");
        let (dir, name, daily) = file_target("hy", FileLogging::Path(path)).unwrap().unwrap();
        assert_eq!(dir, temp.path().join("nested"));
        assert_eq!(name, "hy.log");
        assert!(!daily);
        assert!(dir.is_dir());

        let (_, name, daily) = file_target("hy", FileLogging::TempDir).unwrap().unwrap();
        assert_eq!(name, "hy.log");
        assert!(daily);
    }

    #[test]
    fn test_environment_filters() {
        let console_filter = filter_for_console(LevelFilter::WARN).unwrap();
        assert!(console_filter.to_string().contains("reqwest=warn"));
        assert!(!filter_for_file(LevelFilter::DEBUG).to_string().is_empty());
    }

    #[test]
    fn test_logging_initialization_safety() {
        ensure_test_logging(None);

        // A second global subscriber is refused without panicking.
        let result = init_logging("test-hy", LevelFilter::INFO, FileLogging::Disabled);
        assert!(result.is_err());

        info!("Test logging after init attempts");
    }

    #[test]
    fn test_file_logging_from_option() {
        assert_eq!(FileLogging::from(None), FileLogging::Disabled);
        assert_eq!(
            FileLogging::from(Some(PathBuf::from("hy.log"))),
            FileLogging::Path(PathBuf::from("hy.log"))
        );
    }
}
