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

//! HTTP mail relay transport

use crate::message::MailMessage;
use crate::MailTransport;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Transport that POSTs composed messages as JSON to a mail relay
#[derive(Debug, Clone)]
pub struct HttpRelayTransport {
    relay_url: String,
    client: reqwest::Client,
}

impl HttpRelayTransport {
    /// Create a transport for `relay_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(relay_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build mail relay HTTP client")?;

        Ok(Self {
            relay_url: relay_url.into(),
            client,
        })
    }
}

#[async_trait]
impl MailTransport for HttpRelayTransport {
    async fn send(&self, message: &MailMessage) -> Result<()> {
        tracing::debug!("POST {} to={}", self.relay_url, message.to);

        let response = self
            .client
            .post(&self.relay_url)
            .json(message)
            .send()
            .await
            .context("Could not connect to the email server")?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            if detail.trim().is_empty() {
                anyhow::bail!("Mail relay rejected the message with status: {}", status);
            }
            anyhow::bail!("Mail relay rejected the message with status {}: {}", status, detail.trim());
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "http-relay"
    }
}
