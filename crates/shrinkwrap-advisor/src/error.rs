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

//! Advisor error types

use thiserror::Error;

/// Result type alias for advisor operations
pub type AdvisorResult<T> = Result<T, AdvisorError>;

/// Reasons a suggestion request did not produce a usable answer
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// No backend is available to answer
    #[error("suggestion backend unavailable: {0}")]
    Unavailable(String),

    /// Request could not be sent or timed out
    #[error("suggestion request failed: {0}")]
    Transport(String),

    /// Backend answered with a non-success status
    #[error("suggestion backend returned status {0}")]
    Status(u16),

    /// Backend answer could not be understood
    #[error("malformed suggestion response: {0}")]
    MalformedResponse(String),

    /// Any other backend failure
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdvisorError {
    /// Convert an opaque backend failure, keeping typed errors intact
    pub fn from_backend(err: anyhow::Error) -> Self {
        match err.downcast::<AdvisorError>() {
            Ok(typed) => typed,
            Err(other) => AdvisorError::Other(other),
        }
    }

    /// Check if the failure happened before an answer arrived
    pub fn is_transport(&self) -> bool {
        matches!(self, AdvisorError::Transport(_) | AdvisorError::Unavailable(_))
    }
}
