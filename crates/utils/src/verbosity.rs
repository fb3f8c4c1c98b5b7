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

//! Verbosity model shared by all `hy` apps
//!
//! The level comes from `--log NAME` when it names a level, otherwise from the
//! number of `-v` flags: none shows errors only, then warnings, info and debug.

use std::{fmt, str::FromStr};
use tracing::level_filters::LevelFilter;

/// Levels selected by repeating `-v`, capped at the last entry
pub const LEVELS: [LevelFilter; 4] =
    [LevelFilter::ERROR, LevelFilter::WARN, LevelFilter::INFO, LevelFilter::DEBUG];

/// Value of the `--log` flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Defer to the `-v` count
    #[default]
    NotSet,
    /// Errors only
    Error,
    /// Warnings and errors
    Warning,
    /// Informational messages
    Info,
    /// Debug output
    Debug,
    /// Everything, including request and response bodies
    Trace,
}

impl LogLevel {
    /// The filter this level names, `None` for [`LogLevel::NotSet`]
    pub fn filter(self) -> Option<LevelFilter> {
        match self {
            Self::NotSet => None,
            Self::Error => Some(LevelFilter::ERROR),
            Self::Warning => Some(LevelFilter::WARN),
            Self::Info => Some(LevelFilter::INFO),
            Self::Debug => Some(LevelFilter::DEBUG),
            Self::Trace => Some(LevelFilter::TRACE),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "notset" => Ok(Self::NotSet),
            "error" | "critical" | "fatal" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(format!(
                "unknown log level '{other}' (expected error, warning, info, debug, trace or notset)"
            )),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotSet => "notset",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        })
    }
}

/// Effective verbosity of one `hy` invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verbosity {
    level: LevelFilter,
}

impl Default for Verbosity {
    fn default() -> Self {
        Self::from_count(0)
    }
}

impl Verbosity {
    /// Level for `verbose` repetitions of `-v`
    pub fn from_count(verbose: u8) -> Self {
        let index = usize::from(verbose).min(LEVELS.len() - 1);
        Self { level: LEVELS[index] }
    }

    /// Combine `--log` and the `-v` count; an explicit level wins
    pub fn resolve(verbose: u8, log: LogLevel) -> Self {
        match log.filter() {
            Some(level) => Self { level },
            None => Self::from_count(verbose),
        }
    }

    /// Fixed level
    pub fn with_level(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Maximum level that gets logged
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Whether messages at `level` are shown
    pub fn shows(&self, level: LevelFilter) -> bool {
        level <= self.level
    }

    /// Whether failures should surface with their full error chain
    /// instead of the short one-line report
    pub fn reraise(&self) -> bool {
        self.shows(LevelFilter::INFO)
    }
}
