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

//! HTTP suggestion backend
//!
//! POSTs `{"fileType": ...}` to the configured endpoint and expects
//! `{"suggestedAlgorithm": ..., "reason"?: ...}` back. No retries.

use crate::error::AdvisorError;
use crate::types::{SuggestionOutcome, SuggestionRequest, SuggestionResponse};
use crate::SuggestionBackend;
use anyhow::{Context, Result};
use async_trait::async_trait;
use shrinkwrap_core::CoarseType;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Suggestion backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpSuggestionBackend {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpSuggestionBackend {
    /// Create a backend for `endpoint` with the given request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build suggestion HTTP client")?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SuggestionBackend for HttpSuggestionBackend {
    async fn suggest(&self, file_type: CoarseType) -> Result<SuggestionOutcome> {
        tracing::debug!("POST {} fileType={}", self.endpoint, file_type);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&SuggestionRequest { file_type })
            .send()
            .await
            .map_err(|e| AdvisorError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Status(status.as_u16()).into());
        }

        let body = response
            .json::<SuggestionResponse>()
            .await
            .map_err(|e| AdvisorError::MalformedResponse(e.to_string()))?;

        if body.suggested_algorithm.trim().is_empty() {
            return Err(AdvisorError::MalformedResponse("empty suggestedAlgorithm".into()).into());
        }

        Ok(body.into())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
