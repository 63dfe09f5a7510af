// ShrinkWrap - Compression Advisor and Transform Simulator
// Copyright (C) 2025 ShrinkWrap Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Logging configuration: output format, level and destination.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Level names accepted by [`LogConfig::with_level`] shortcuts
pub const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Errors that can occur during logging setup
#[derive(Error, Debug)]
pub enum LogError {
    /// Unknown output format name
    #[error("Unknown log format: {0}. Expected one of: pretty, compact, json")]
    InvalidFormat(String),

    /// Filter directive could not be parsed
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Directive as given
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber is already installed
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Output format for logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human-readable output
    Pretty,
    /// Single-line output
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LogError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Standard error
    Stderr,
    /// Standard output
    Stdout,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output format
    pub format: LogFormat,
    /// Filter directive (e.g. `info`, `shrinkwrap_core=debug`).
    /// `None` falls back to `RUST_LOG`, then `warn`.
    pub level: Option<String>,
    /// ANSI colors (ignored for JSON)
    pub use_color: bool,
    /// Timestamps on each line
    pub use_timestamps: bool,
    /// Module targets on each line
    pub include_targets: bool,
    /// Destination
    pub output: LogOutput,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Compact,
            level: None,
            use_color: true,
            use_timestamps: true,
            include_targets: false,
            output: LogOutput::Stderr,
        }
    }
}

impl LogConfig {
    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration derived from CLI verbosity flags.
    ///
    /// `--quiet` wins over `--verbose`; neither leaves the level unset.
    pub fn for_verbosity(verbose: bool, quiet: bool) -> Self {
        let config = Self::default();
        if quiet {
            config.with_level("error")
        } else if verbose {
            config.with_level("debug").with_targets(true)
        } else {
            config
        }
    }

    /// Set the output format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the filter directive
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Set the filter directive only if none is set yet
    pub fn with_default_level(mut self, level: impl Into<String>) -> Self {
        if self.level.is_none() {
            self.level = Some(level.into());
        }
        self
    }

    /// Enable or disable colors
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Enable or disable timestamps
    pub fn with_timestamps(mut self, use_timestamps: bool) -> Self {
        self.use_timestamps = use_timestamps;
        self
    }

    /// Enable or disable module targets
    pub fn with_targets(mut self, include_targets: bool) -> Self {
        self.include_targets = include_targets;
        self
    }

    /// Set the destination
    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Filter directive in effect: configured, else `RUST_LOG`, else `warn`
    pub fn effective_level(&self) -> String {
        self.level
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "warn".to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing_is_case_insensitive() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("COMPACT".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("Json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn format_serde_uses_lowercase() {
        let json = serde_json::to_string(&LogFormat::Json).unwrap();
        assert_eq!(json, "\"json\"");
    }

    #[test]
    fn builder_sets_fields() {
        let config = LogConfig::new()
            .with_format(LogFormat::Json)
            .with_level("debug")
            .with_color(false)
            .with_timestamps(false)
            .with_output(LogOutput::Stdout);

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level.as_deref(), Some("debug"));
        assert!(!config.use_color);
        assert!(!config.use_timestamps);
        assert_eq!(config.output, LogOutput::Stdout);
    }

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(LogConfig::for_verbosity(true, true).level.as_deref(), Some("error"));
        assert_eq!(LogConfig::for_verbosity(true, false).level.as_deref(), Some("debug"));
        assert_eq!(LogConfig::for_verbosity(false, false).level, None);
    }

    #[test]
    fn default_level_does_not_override() {
        let config = LogConfig::new().with_level("trace").with_default_level("info");
        assert_eq!(config.effective_level(), "trace");

        let config = LogConfig::new().with_default_level("info");
        assert_eq!(config.effective_level(), "info");
    }
}
