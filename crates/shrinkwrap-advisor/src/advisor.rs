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

//! Advisor front end with local fallback

use crate::error::AdvisorError;
use crate::mapping::map_to_key;
use crate::types::SuggestionOutcome;
use crate::{OfflineBackend, SuggestionBackend};
use shrinkwrap_core::{AlgorithmKey, CoarseType};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Where an [`Advice`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceSource {
    /// The backend answered
    Remote,
    /// The backend failed and the local rule was applied
    Fallback,
}

/// Result of one advisory round
#[derive(Debug)]
pub struct Advice {
    /// Suggestion as returned (or the fallback name)
    pub outcome: SuggestionOutcome,
    /// Origin of the suggestion
    pub source: AdviceSource,
    /// Catalog key the suggestion maps to, if any
    pub algorithm: Option<AlgorithmKey>,
    /// Backend failure that triggered the fallback
    pub failure: Option<AdvisorError>,
}

impl Advice {
    /// Check if the fallback rule produced this advice
    pub fn is_fallback(&self) -> bool {
        self.source == AdviceSource::Fallback
    }

    /// Key to select, keeping `current` when the name did not map
    pub fn resolve(&self, current: AlgorithmKey) -> AlgorithmKey {
        self.algorithm.unwrap_or(current)
    }
}

/// Local recommendation used when the backend fails
pub fn fallback_for(file_type: CoarseType) -> SuggestionOutcome {
    let name = match file_type {
        CoarseType::Text => "DEFLATE",
        CoarseType::Image => "Run-Length Encoding",
        CoarseType::Pdf => "PDF Optimization",
        CoarseType::Binary => "Huffman Coding",
    };
    SuggestionOutcome::named(name)
}

/// Asks a [`SuggestionBackend`] for a recommendation and never fails
#[derive(Debug, Clone)]
pub struct AlgorithmAdvisor {
    backend: Arc<dyn SuggestionBackend>,
}

impl AlgorithmAdvisor {
    /// Create an advisor over the given backend
    pub fn new(backend: Arc<dyn SuggestionBackend>) -> Self {
        AlgorithmAdvisor { backend }
    }

    /// Advisor that always uses the fallback rule
    pub fn offline() -> Self {
        Self::new(Arc::new(OfflineBackend))
    }

    /// Name of the backend in use
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Get a recommendation for a coarse file type.
    ///
    /// Backend failures are logged as warnings and replaced by
    /// [`fallback_for`]; the failure is kept on the returned [`Advice`].
    #[instrument(skip(self), fields(backend = self.backend.name()))]
    pub async fn suggest(&self, file_type: CoarseType) -> Advice {
        match self.backend.suggest(file_type).await {
            Ok(outcome) => {
                let algorithm = map_to_key(&outcome.suggested_algorithm_name);
                debug!(
                    suggested = %outcome.suggested_algorithm_name,
                    mapped = ?algorithm,
                    "Received suggestion"
                );
                Advice {
                    outcome,
                    source: AdviceSource::Remote,
                    algorithm,
                    failure: None,
                }
            }
            Err(e) => {
                let failure = AdvisorError::from_backend(e);
                warn!(error = %failure, "Suggestion failed, using fallback");
                let outcome = fallback_for(file_type);
                let algorithm = map_to_key(&outcome.suggested_algorithm_name);
                Advice {
                    outcome,
                    source: AdviceSource::Fallback,
                    algorithm,
                    failure: Some(failure),
                }
            }
        }
    }
}

impl Default for AlgorithmAdvisor {
    fn default() -> Self {
        Self::offline()
    }
}
