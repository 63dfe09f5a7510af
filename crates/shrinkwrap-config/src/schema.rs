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

//! Configuration schema with per-section defaults

use serde::{Deserialize, Serialize};
use shrinkwrap_core::{SimulatorSettings, DEFAULT_EXPANSION_CAP};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,

    /// Suggestion service
    pub advisor: AdvisorConfig,

    /// Transform simulation
    pub simulator: SimulatorConfig,

    /// Outbound mail
    pub mail: MailConfig,

    /// Logging
    pub observability: ObservabilityConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Directory processed files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            name: default_app_name(),
            output_dir: default_output_dir(),
        }
    }
}

/// Suggestion service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvisorConfig {
    /// Suggestion endpoint; unset means offline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Request timeout in milliseconds
    #[serde(default = "default_advisor_timeout_ms")]
    pub timeout_ms: u64,
}

impl AdvisorConfig {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            endpoint: None,
            timeout_ms: default_advisor_timeout_ms(),
        }
    }
}

/// Transform simulation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulatorConfig {
    /// Fixed delay per run in milliseconds
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Upper bound of the random extra delay in milliseconds
    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,

    /// Decompression multiplier ceiling
    #[serde(default = "default_expansion_cap")]
    pub expansion_cap: f64,
}

impl SimulatorConfig {
    /// Simulator settings for these values
    pub fn settings(&self) -> SimulatorSettings {
        SimulatorSettings {
            latency: Duration::from_millis(self.latency_ms),
            jitter: Duration::from_millis(self.jitter_ms),
            expansion_cap: self.expansion_cap,
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            latency_ms: default_latency_ms(),
            jitter_ms: default_jitter_ms(),
            expansion_cap: default_expansion_cap(),
        }
    }
}

/// Outbound mail settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MailConfig {
    /// Mail relay URL; unset means mail is not configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay_url: Option<String>,

    /// Sender address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Largest attachment accepted, in bytes
    #[serde(default = "default_max_attachment_bytes")]
    pub max_attachment_bytes: u64,

    /// Relay request timeout in milliseconds
    #[serde(default = "default_relay_timeout_ms")]
    pub timeout_ms: u64,
}

impl MailConfig {
    /// Relay URL and sender, when both are set
    pub fn relay(&self) -> Option<(&str, &str)> {
        match (&self.relay_url, &self.from) {
            (Some(url), Some(from)) => Some((url.as_str(), from.as_str())),
            _ => None,
        }
    }

    /// Relay request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        MailConfig {
            relay_url: None,
            from: None,
            max_attachment_bytes: default_max_attachment_bytes(),
            timeout_ms: default_relay_timeout_ms(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservabilityConfig {
    /// Level or filter directive; unset defers to `RUST_LOG`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Output format (pretty, compact, json)
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        ObservabilityConfig {
            log_level: None,
            log_format: default_log_format(),
        }
    }
}

fn default_app_name() -> String {
    "shrinkwrap".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_advisor_timeout_ms() -> u64 {
    10_000
}

fn default_latency_ms() -> u64 {
    1500
}

fn default_jitter_ms() -> u64 {
    500
}

fn default_expansion_cap() -> f64 {
    DEFAULT_EXPANSION_CAP
}

fn default_max_attachment_bytes() -> u64 {
    20 * 1024 * 1024
}

fn default_relay_timeout_ms() -> u64 {
    30_000
}

fn default_log_format() -> String {
    "compact".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_simulator_defaults() {
        let config = Config::default();
        assert_eq!(config.simulator.settings(), SimulatorSettings::default());
        assert_eq!(config.advisor.endpoint, None);
        assert_eq!(config.mail.max_attachment_bytes, 20_971_520);
        assert!(config.mail.relay().is_none());
    }

    #[test]
    fn relay_needs_url_and_sender() {
        let mut mail = MailConfig {
            relay_url: Some("http://relay.local/send".to_string()),
            ..MailConfig::default()
        };
        assert!(mail.relay().is_none());

        mail.from = Some("noreply@shrinkwrap.dev".to_string());
        assert_eq!(
            mail.relay(),
            Some(("http://relay.local/send", "noreply@shrinkwrap.dev"))
        );
    }
}
