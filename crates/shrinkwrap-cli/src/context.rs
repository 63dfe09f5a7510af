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

//! Wiring from configuration to the library crates

use anyhow::{Context, Result};
use shrinkwrap_advisor::{AlgorithmAdvisor, HttpSuggestionBackend};
use shrinkwrap_config::{Config, ConfigLoader};
use shrinkwrap_core::TransformSimulator;
use shrinkwrap_delivery::{HttpRelayTransport, MailDispatcher};
use shrinkwrap_session::Session;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Loaded configuration plus global flags
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub quiet: bool,
}

impl AppContext {
    pub fn new(config: Config, quiet: bool) -> Self {
        AppContext { config, quiet }
    }

    /// Load configuration from `path`, or defaults when none is given.
    /// `SHRINKWRAP_*` variables apply in both cases.
    pub async fn load_config(path: Option<&Path>) -> Result<Config> {
        let loader = ConfigLoader::new();
        match path {
            Some(path) => loader
                .load_with_overrides(path)
                .await
                .with_context(|| format!("Failed to load configuration from {}", path.display())),
            None => loader
                .load_defaults()
                .context("Invalid configuration in environment"),
        }
    }

    /// Advisor for the configured endpoint, offline without one
    pub fn advisor(&self) -> Result<AlgorithmAdvisor> {
        match &self.config.advisor.endpoint {
            Some(endpoint) => {
                let backend = HttpSuggestionBackend::new(endpoint.as_str(), self.config.advisor.timeout())
                    .context("Failed to build suggestion client")?;
                debug!(endpoint = %endpoint, "Using HTTP suggestion backend");
                Ok(AlgorithmAdvisor::new(Arc::new(backend)))
            }
            None => {
                debug!("No suggestion endpoint configured; running offline");
                Ok(AlgorithmAdvisor::offline())
            }
        }
    }

    pub fn simulator(&self) -> TransformSimulator {
        TransformSimulator::new(self.config.simulator.settings())
    }

    /// Mail dispatcher for the configured relay, unconfigured without one
    pub fn dispatcher(&self) -> Result<MailDispatcher> {
        let dispatcher = match self.config.mail.relay() {
            Some((url, from)) => {
                let transport = HttpRelayTransport::new(url, self.config.mail.timeout())
                    .context("Failed to build mail relay client")?;
                MailDispatcher::new(Arc::new(transport), from)
            }
            None => MailDispatcher::unconfigured(),
        };
        Ok(dispatcher.with_max_attachment_bytes(self.config.mail.max_attachment_bytes))
    }

    pub fn session(&self) -> Result<Session> {
        Ok(Session::new(self.advisor()?, self.simulator()))
    }

    /// Where processed files go: `out` if given, else the configured directory
    pub fn output_dir(&self, out: Option<&Path>) -> PathBuf {
        out.map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.app.output_dir.clone())
    }
}
