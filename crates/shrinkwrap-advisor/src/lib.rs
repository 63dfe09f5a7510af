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

//! Algorithm advisory for ShrinkWrap
//!
//! The advisor asks an external suggestion backend which algorithm suits a
//! coarse file type, and falls back to a fixed local rule when the backend
//! fails. Remote and fallback answers both go through the same pure
//! [`mapping::map_to_key`] function before they touch any selection.
//!
//! # Architecture
//!
//! The [`SuggestionBackend`] trait is the seam to the remote capability:
//! - [`http::HttpSuggestionBackend`]: JSON over HTTP via `reqwest`
//! - [`OfflineBackend`]: always fails, so every request uses the fallback
//! - [`mock::MockSuggestionBackend`]: scripted answers for tests
//!
//! # Examples
//!
//! ```no_run
//! use shrinkwrap_advisor::{AlgorithmAdvisor, mock::MockSuggestionBackend};
//! use shrinkwrap_core::{AlgorithmKey, CoarseType};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let advisor = AlgorithmAdvisor::new(Arc::new(MockSuggestionBackend::failing("offline")));
//!
//!     let advice = advisor.suggest(CoarseType::Pdf).await;
//!     assert!(advice.is_fallback());
//!     assert_eq!(advice.algorithm, Some(AlgorithmKey::PdfOptimization));
//! }
//! ```

pub mod advisor;
pub mod error;
pub mod http;
pub mod mapping;
pub mod mock;
pub mod types;

use async_trait::async_trait;
use shrinkwrap_core::CoarseType;
use std::fmt::Debug;

pub use advisor::{fallback_for, Advice, AdviceSource, AlgorithmAdvisor};
pub use error::{AdvisorError, AdvisorResult};
pub use http::HttpSuggestionBackend;
pub use mapping::{map_to_key, resolve};
pub use types::{SuggestionOutcome, SuggestionRequest, SuggestionResponse};

/// Remote capability that recommends an algorithm for a coarse file type
///
/// Implementations report every failure (transport, timeout, malformed
/// answer) as an `Err`; the advisor never retries and applies its fallback
/// rule instead.
#[async_trait]
pub trait SuggestionBackend: Send + Sync + Debug {
    /// Ask for a recommendation
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot produce a usable answer
    async fn suggest(&self, file_type: CoarseType) -> anyhow::Result<SuggestionOutcome>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

/// Backend used when no suggestion endpoint is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineBackend;

#[async_trait]
impl SuggestionBackend for OfflineBackend {
    async fn suggest(&self, _file_type: CoarseType) -> anyhow::Result<SuggestionOutcome> {
        Err(AdvisorError::Unavailable("no suggestion endpoint configured".to_string()).into())
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_backend_always_fails() {
        let result = OfflineBackend.suggest(CoarseType::Text).await;
        assert!(result.is_err());
        assert_eq!(OfflineBackend.name(), "offline");
    }
}
