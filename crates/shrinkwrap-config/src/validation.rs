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

//! Configuration validation

use crate::error::{ConfigError, ConfigResult};
use crate::schema::*;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];

/// Validator for configuration settings
pub trait Validator {
    /// Check the settings
    ///
    /// # Errors
    ///
    /// Returns the first offending field
    fn validate(&self) -> ConfigResult<()>;
}

impl Validator for Config {
    fn validate(&self) -> ConfigResult<()> {
        self.app.validate()?;
        self.advisor.validate()?;
        self.simulator.validate()?;
        self.mail.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}

impl Validator for AppConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.name.is_empty() {
            return Err(ConfigError::MissingRequired("app.name".to_string()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("app.output_dir".to_string()));
        }
        Ok(())
    }
}

impl Validator for AdvisorConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::invalid_value(
                "advisor.timeout_ms",
                "timeout must be greater than zero",
            ));
        }
        if let Some(endpoint) = &self.endpoint {
            if !is_http_url(endpoint) {
                return Err(ConfigError::invalid_value(
                    "advisor.endpoint",
                    format!("must be an http(s) URL, got {}", endpoint),
                ));
            }
        }
        Ok(())
    }
}

impl Validator for SimulatorConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !self.expansion_cap.is_finite() || self.expansion_cap < 1.0 {
            return Err(ConfigError::invalid_value(
                "simulator.expansion_cap",
                format!("must be at least 1.0, got {}", self.expansion_cap),
            ));
        }
        Ok(())
    }
}

impl Validator for MailConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_attachment_bytes == 0 {
            return Err(ConfigError::invalid_value(
                "mail.max_attachment_bytes",
                "limit must be greater than zero",
            ));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::invalid_value(
                "mail.timeout_ms",
                "timeout must be greater than zero",
            ));
        }
        if let Some(url) = &self.relay_url {
            if !is_http_url(url) {
                return Err(ConfigError::invalid_value(
                    "mail.relay_url",
                    format!("must be an http(s) URL, got {}", url),
                ));
            }
        }
        if let Some(from) = &self.from {
            if !is_plausible_address(from) {
                return Err(ConfigError::invalid_value(
                    "mail.from",
                    format!("not a valid email address: {}", from),
                ));
            }
        }
        Ok(())
    }
}

impl Validator for ObservabilityConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(level) = &self.log_level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(ConfigError::invalid_value(
                    "observability.log_level",
                    format!("must be one of: {}", LOG_LEVELS.join(", ")),
                ));
            }
        }
        if !LOG_FORMATS.contains(&self.log_format.to_lowercase().as_str()) {
            return Err(ConfigError::invalid_value(
                "observability.log_format",
                format!("must be one of: {}", LOG_FORMATS.join(", ")),
            ));
        }
        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty())
}

fn is_plausible_address(address: &str) -> bool {
    match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !address.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
