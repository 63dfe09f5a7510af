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

//! Suggestion wire types

use serde::{Deserialize, Serialize};
use shrinkwrap_core::CoarseType;

/// Request body sent to the suggestion backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    /// Coarse type of the selected file
    pub file_type: CoarseType,
}

/// Response body returned by the suggestion backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    /// Free-text algorithm name
    pub suggested_algorithm: String,
    /// Optional explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A recommendation, remote or local
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionOutcome {
    /// Free-text algorithm name as suggested
    pub suggested_algorithm_name: String,
    /// Optional explanation
    pub rationale: Option<String>,
}

impl SuggestionOutcome {
    /// Outcome without a rationale
    pub fn named(name: impl Into<String>) -> Self {
        SuggestionOutcome {
            suggested_algorithm_name: name.into(),
            rationale: None,
        }
    }

    /// Attach a rationale
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }
}

impl From<SuggestionResponse> for SuggestionOutcome {
    fn from(response: SuggestionResponse) -> Self {
        SuggestionOutcome {
            suggested_algorithm_name: response.suggested_algorithm,
            rationale: response.reason,
        }
    }
}
