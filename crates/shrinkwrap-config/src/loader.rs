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

//! Configuration loading
//!
//! Reads TOML, YAML or JSON by file extension, then applies `SHRINKWRAP_*`
//! environment overrides. Validation runs after both steps unless disabled.

use crate::error::{ConfigError, ConfigResult};
use crate::schema::Config;
use crate::validation::Validator;
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, info};

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` for unknown extensions, `InvalidPath` when there
    /// is none.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::InvalidPath(path.to_path_buf())),
        }
    }

    /// Get format name as string
    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Json => "JSON",
        }
    }
}

/// Configuration loader
#[derive(Debug)]
pub struct ConfigLoader {
    validate: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        ConfigLoader { validate: true }
    }

    /// Create a loader without validation
    pub fn without_validation() -> Self {
        ConfigLoader { validate: false }
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, unreadable, malformed or invalid.
    pub async fn load_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<Config> {
        let path = path.as_ref();
        debug!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).await?;

        info!(
            "Loaded {} configuration file: {}",
            format.name(),
            path.display()
        );

        self.load_from_string(&content, format)
    }

    /// Load configuration from a string
    ///
    /// # Errors
    ///
    /// Fails if the content does not parse or does not validate.
    pub fn load_from_string(&self, content: &str, format: ConfigFormat) -> ConfigResult<Config> {
        let config: Config = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };

        debug!("Configuration loaded from {}", format.name());

        if self.validate {
            config.validate()?;
            debug!("Configuration validated successfully");
        }

        Ok(config)
    }

    /// Load configuration with environment variable overrides
    ///
    /// # Errors
    ///
    /// Same as [`ConfigLoader::load_file`], plus malformed overrides.
    pub async fn load_with_overrides<P: AsRef<Path>>(&self, path: P) -> ConfigResult<Config> {
        let mut config = self.load_file(path).await?;
        self.apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for running without a file
    ///
    /// # Errors
    ///
    /// Fails on malformed overrides.
    pub fn load_defaults(&self) -> ConfigResult<Config> {
        let mut config = Config::default();
        self.apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Apply `SHRINKWRAP_*` environment variable overrides
    ///
    /// # Errors
    ///
    /// Fails if a numeric variable does not parse, or if the result does not
    /// validate.
    pub fn apply_env_overrides(&self, config: &mut Config) -> ConfigResult<()> {
        self.apply_overrides_with(config, |name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::apply_env_overrides`].
    pub fn apply_overrides_with<F>(&self, config: &mut Config, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Advisor
        if let Some(value) = lookup("SHRINKWRAP_ADVISOR_ENDPOINT") {
            config.advisor.endpoint = non_empty(&value);
        }
        if let Some(value) = lookup("SHRINKWRAP_ADVISOR_TIMEOUT_MS") {
            config.advisor.timeout_ms = parse_number("SHRINKWRAP_ADVISOR_TIMEOUT_MS", &value)?;
        }

        // Simulator
        if let Some(value) = lookup("SHRINKWRAP_SIMULATOR_LATENCY_MS") {
            config.simulator.latency_ms = parse_number("SHRINKWRAP_SIMULATOR_LATENCY_MS", &value)?;
        }
        if let Some(value) = lookup("SHRINKWRAP_SIMULATOR_JITTER_MS") {
            config.simulator.jitter_ms = parse_number("SHRINKWRAP_SIMULATOR_JITTER_MS", &value)?;
        }

        // Mail
        if let Some(value) = lookup("SHRINKWRAP_MAIL_RELAY_URL") {
            config.mail.relay_url = non_empty(&value);
        }
        if let Some(value) = lookup("SHRINKWRAP_MAIL_FROM") {
            config.mail.from = non_empty(&value);
        }

        // Observability
        if let Some(value) = lookup("SHRINKWRAP_LOG_LEVEL") {
            config.observability.log_level = non_empty(&value);
        }
        if let Some(value) = lookup("SHRINKWRAP_LOG_FORMAT") {
            config.observability.log_format = value;
        }

        if self.validate {
            config.validate()?;
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_number<T: FromStr>(variable: &str, value: &str) -> ConfigResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::env_var_parsing_error(variable, value, "expected non-negative integer"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path("config.toml").unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path("config.yaml").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("config.yml").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("config.json").unwrap(), ConfigFormat::Json);
    }

    #[test]
    fn test_format_detection_error() {
        assert!(matches!(
            ConfigFormat::from_path("config.xml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            ConfigFormat::from_path("config"),
            Err(ConfigError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_parse_toml() {
        let loader = ConfigLoader::new();
        let toml = r#"
        [advisor]
        endpoint = "http://localhost:3000/suggest"
        timeout_ms = 2500

        [simulator]
        latency_ms = 0
        jitter_ms = 0
        "#;
        let config = loader.load_from_string(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.advisor.endpoint.as_deref(), Some("http://localhost:3000/suggest"));
        assert_eq!(config.advisor.timeout_ms, 2500);
        assert_eq!(config.simulator.latency_ms, 0);
        assert_eq!(config.mail.max_attachment_bytes, 20 * 1024 * 1024);
    }

    #[test]
    fn test_parse_yaml() {
        let loader = ConfigLoader::new();
        let yaml = "mail:\n  relay_url: https://relay.example.com/send\n  from: noreply@example.com\nobservability:\n  log_format: json";
        let config = loader.load_from_string(yaml, ConfigFormat::Yaml).unwrap();
        assert!(config.mail.relay().is_some());
        assert_eq!(config.observability.log_format, "json");
    }

    #[test]
    fn test_parse_json() {
        let loader = ConfigLoader::new();
        let json = r#"{"simulator": {"expansion_cap": 3.0}}"#;
        let config = loader.load_from_string(json, ConfigFormat::Json).unwrap();
        assert_eq!(config.simulator.expansion_cap, 3.0);
        assert_eq!(config.simulator.latency_ms, 1500);
    }

    #[test]
    fn validation_can_be_skipped() {
        let json = r#"{"simulator": {"expansion_cap": 0.1}}"#;
        assert!(ConfigLoader::new().load_from_string(json, ConfigFormat::Json).is_err());
        assert!(ConfigLoader::without_validation()
            .load_from_string(json, ConfigFormat::Json)
            .is_ok());
    }

    #[test]
    fn overrides_apply() {
        let env = vars(&[
            ("SHRINKWRAP_ADVISOR_ENDPOINT", "https://suggest.example.com"),
            ("SHRINKWRAP_SIMULATOR_LATENCY_MS", "0"),
            ("SHRINKWRAP_SIMULATOR_JITTER_MS", " 0 "),
            ("SHRINKWRAP_LOG_LEVEL", "debug"),
        ]);
        let mut config = Config::default();
        ConfigLoader::new()
            .apply_overrides_with(&mut config, |k| env.get(k).cloned())
            .unwrap();

        assert_eq!(config.advisor.endpoint.as_deref(), Some("https://suggest.example.com"));
        assert_eq!(config.simulator.latency_ms, 0);
        assert_eq!(config.simulator.jitter_ms, 0);
        assert_eq!(config.observability.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn empty_override_unsets() {
        let env = vars(&[("SHRINKWRAP_ADVISOR_ENDPOINT", "")]);
        let mut config = Config::default();
        config.advisor.endpoint = Some("http://a.b".to_string());
        ConfigLoader::new()
            .apply_overrides_with(&mut config, |k| env.get(k).cloned())
            .unwrap();
        assert_eq!(config.advisor.endpoint, None);
    }

    #[test]
    fn bad_number_override_reports_variable() {
        let env = vars(&[("SHRINKWRAP_ADVISOR_TIMEOUT_MS", "soon")]);
        let mut config = Config::default();
        let err = ConfigLoader::new()
            .apply_overrides_with(&mut config, |k| env.get(k).cloned())
            .unwrap_err();
        assert!(err.to_string().contains("SHRINKWRAP_ADVISOR_TIMEOUT_MS=soon"));
    }

    #[test]
    fn invalid_override_fails_validation() {
        let env = vars(&[("SHRINKWRAP_LOG_FORMAT", "xml")]);
        let mut config = Config::default();
        let err = ConfigLoader::new()
            .apply_overrides_with(&mut config, |k| env.get(k).cloned())
            .unwrap_err();
        assert!(err.is_validation());
    }
}
