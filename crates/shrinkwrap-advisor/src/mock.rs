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

//! In-memory mock suggestion backend for testing
//!
//! # Examples
//!
//! ```rust,no_run
//! use shrinkwrap_advisor::{SuggestionBackend, SuggestionOutcome, mock::MockSuggestionBackend};
//! use shrinkwrap_core::CoarseType;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = MockSuggestionBackend::replying(SuggestionOutcome::named("DEFLATE"));
//!
//!     let outcome = backend.suggest(CoarseType::Text).await?;
//!     assert_eq!(outcome.suggested_algorithm_name, "DEFLATE");
//!     assert_eq!(backend.calls().await, vec![CoarseType::Text]);
//!
//!     Ok(())
//! }
//! ```

use crate::error::AdvisorError;
use crate::types::SuggestionOutcome;
use crate::SuggestionBackend;
use async_trait::async_trait;
use shrinkwrap_core::CoarseType;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Clone)]
enum Script {
    Reply(SuggestionOutcome),
    Fail(String),
}

/// Scripted suggestion backend
///
/// Clones share the recorded call log.
#[derive(Clone)]
pub struct MockSuggestionBackend {
    script: Script,
    delay: Duration,
    calls: Arc<RwLock<Vec<CoarseType>>>,
}

impl MockSuggestionBackend {
    /// Backend that always answers with `outcome`
    pub fn replying(outcome: SuggestionOutcome) -> Self {
        Self::with_script(Script::Reply(outcome))
    }

    /// Backend that always fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_script(Script::Fail(message.into()))
    }

    fn with_script(script: Script) -> Self {
        MockSuggestionBackend {
            script,
            delay: Duration::ZERO,
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Wait `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// File types requested so far, in order
    pub async fn calls(&self) -> Vec<CoarseType> {
        self.calls.read().await.clone()
    }

    /// Number of requests received
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

impl fmt::Debug for MockSuggestionBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match &self.script {
            Script::Reply(_) => "reply",
            Script::Fail(_) => "fail",
        };
        f.debug_struct("MockSuggestionBackend")
            .field("mode", &mode)
            .field("delay", &self.delay)
            .finish()
    }
}

#[async_trait]
impl SuggestionBackend for MockSuggestionBackend {
    async fn suggest(&self, file_type: CoarseType) -> anyhow::Result<SuggestionOutcome> {
        self.calls.write().await.push(file_type);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.script {
            Script::Reply(outcome) => Ok(outcome.clone()),
            Script::Fail(message) => Err(AdvisorError::Transport(message.clone()).into()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_across_clones() {
        let backend = MockSuggestionBackend::replying(SuggestionOutcome::named("RLE"));
        let clone = backend.clone();

        backend.suggest(CoarseType::Image).await.unwrap();
        clone.suggest(CoarseType::Pdf).await.unwrap();

        assert_eq!(backend.calls().await, vec![CoarseType::Image, CoarseType::Pdf]);
        assert_eq!(clone.call_count().await, 2);
    }

    #[tokio::test]
    async fn failing_backend_reports_transport_error() {
        let backend = MockSuggestionBackend::failing("connection refused");
        let err = backend.suggest(CoarseType::Text).await.unwrap_err();
        let typed = AdvisorError::from_backend(err);
        assert!(typed.is_transport());
        assert!(typed.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn delay_is_applied() {
        let backend = MockSuggestionBackend::replying(SuggestionOutcome::named("LZ77"))
            .with_delay(Duration::from_millis(30));
        let started = std::time::Instant::now();
        backend.suggest(CoarseType::Text).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
