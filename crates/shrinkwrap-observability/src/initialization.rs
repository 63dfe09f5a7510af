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

//! Global subscriber installation.

use crate::config::{LogConfig, LogError, LogFormat, LogOutput};
use std::io;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync + 'static>;

/// Install a subscriber with the given format and level
///
/// # Errors
///
/// Returns [`LogError`] if the level does not parse or a subscriber is
/// already installed.
pub fn init_tracing(format: LogFormat, level: Option<&str>) -> Result<(), LogError> {
    let mut config = LogConfig::new().with_format(format);
    if let Some(level) = level {
        config = config.with_level(level);
    }
    init_tracing_with_config(config)
}

/// Install a subscriber built from `config`
///
/// # Errors
///
/// Returns [`LogError`] if the level does not parse or a subscriber is
/// already installed.
pub fn init_tracing_with_config(config: LogConfig) -> Result<(), LogError> {
    let env_filter = build_env_filter(&config)?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(build_layer(&config))
        .try_init()
        .map_err(|e| LogError::AlreadyInitialized(e.to_string()))
}

fn build_layer(config: &LogConfig) -> BoxedLayer {
    let base = fmt::layer()
        .with_writer(get_writer(config.output))
        .with_target(config.include_targets);

    match (config.format, config.use_timestamps) {
        (LogFormat::Pretty, true) => base
            .pretty()
            .with_ansi(config.use_color)
            .with_span_events(FmtSpan::ACTIVE)
            .boxed(),
        (LogFormat::Pretty, false) => base
            .pretty()
            .without_time()
            .with_ansi(config.use_color)
            .with_span_events(FmtSpan::ACTIVE)
            .boxed(),
        (LogFormat::Compact, true) => base
            .compact()
            .with_ansi(config.use_color)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        (LogFormat::Compact, false) => base
            .compact()
            .without_time()
            .with_ansi(config.use_color)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        (LogFormat::Json, true) => base
            .json()
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        (LogFormat::Json, false) => base
            .json()
            .without_time()
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
    }
}

fn get_writer(output: LogOutput) -> fn() -> Box<dyn io::Write + Send> {
    match output {
        LogOutput::Stderr => || Box::new(io::stderr()),
        LogOutput::Stdout => || Box::new(io::stdout()),
    }
}

fn build_env_filter(config: &LogConfig) -> Result<EnvFilter, LogError> {
    let filter = config.effective_level();

    EnvFilter::try_new(&filter).map_err(|e| LogError::InvalidFilter {
        filter: filter.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // Installing the global subscriber is covered in tests/init_test.rs,
    // which runs in its own process.

    #[test]
    fn filter_accepts_levels_and_directives() {
        for level in crate::LEVELS {
            assert!(build_env_filter(&LogConfig::new().with_level(level)).is_ok());
        }
        assert!(build_env_filter(&LogConfig::new().with_level("shrinkwrap_core=debug,warn")).is_ok());
    }

    #[test]
    fn filter_rejects_garbage() {
        let err = build_env_filter(&LogConfig::new().with_level("shrinkwrap_core=loud")).unwrap_err();
        assert!(matches!(err, LogError::InvalidFilter { .. }));
    }
}
