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

//! Session error types

use crate::notice::Notice;
use shrinkwrap_core::{Direction, ShrinkError};
use thiserror::Error;

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors raised by session operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// An operation needs a selected file
    #[error("no file selected")]
    NoFileSelected(Option<Direction>),

    /// The requested direction is not enabled for the current file
    #[error("{0} is not available for this file")]
    DirectionDisabled(Direction),

    /// Event not accepted in the current state
    #[error("cannot {event} while {state}")]
    InvalidTransition {
        /// Current state name
        state: &'static str,
        /// Rejected event name
        event: &'static str,
    },

    /// Response belongs to a file that is no longer selected
    #[error("response for a previous selection was discarded")]
    Stale,

    /// No processed output to deliver
    #[error("no processed file available")]
    NoResult,

    /// The selected file could not be read
    #[error("failed to read file: {0}")]
    Read(#[source] ShrinkError),

    /// The transform failed
    #[error("{direction} failed: {source}")]
    Transform {
        /// Direction of the failed run
        direction: Direction,
        /// Underlying failure
        #[source]
        source: ShrinkError,
    },
}

impl SessionError {
    /// Check if this error only reports a discarded late response
    pub fn is_stale(&self) -> bool {
        matches!(self, SessionError::Stale)
    }

    /// User-facing notice for this error, if any.
    ///
    /// Stale responses are dropped silently.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            SessionError::Stale => None,
            SessionError::NoFileSelected(direction) => Some(Notice::no_file_selected(*direction)),
            SessionError::Read(_) => Some(Notice::file_read_error()),
            SessionError::Transform { source, .. } if source.is_read_error() => {
                Some(Notice::file_read_error())
            }
            SessionError::Transform { direction, .. } => Some(Notice::processing_error(*direction)),
            SessionError::NoResult => Some(Notice::no_result()),
            SessionError::DirectionDisabled(_) | SessionError::InvalidTransition { .. } => {
                Some(Notice::rejected(self.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeLevel;

    #[test]
    fn stale_has_no_notice() {
        assert!(SessionError::Stale.notice().is_none());
    }

    #[test]
    fn read_failures_map_to_file_read_error() {
        let err = SessionError::Transform {
            direction: Direction::Compress,
            source: ShrinkError::read_error("gone"),
        };
        assert_eq!(err.notice().map(|n| n.title), Some("File Read Error".to_string()));
    }

    #[test]
    fn format_failures_map_to_processing_error() {
        let err = SessionError::Transform {
            direction: Direction::Decompress,
            source: ShrinkError::format_error("bad marker"),
        };
        let notice = err.notice().map(|n| (n.level, n.title));
        assert_eq!(notice, Some((NoticeLevel::Error, "Processing Error".to_string())));
    }
}
