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

//! Core error types

use thiserror::Error;

/// Result type alias for core operations
pub type ShrinkResult<T> = Result<T, ShrinkError>;

/// Errors raised by the transform pipeline
#[derive(Error, Debug)]
pub enum ShrinkError {
    /// The file payload could not be loaded
    #[error("read error: {0}")]
    ReadError(String),

    /// The payload does not have the expected structure
    #[error("format error: {0}")]
    FormatError(String),

    /// Token does not name a catalog algorithm
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShrinkError {
    /// Create a read error
    pub fn read_error<S: Into<String>>(msg: S) -> Self {
        ShrinkError::ReadError(msg.into())
    }

    /// Create a format error
    pub fn format_error<S: Into<String>>(msg: S) -> Self {
        ShrinkError::FormatError(msg.into())
    }

    /// Create an unknown algorithm error
    pub fn unknown_algorithm<S: Into<String>>(token: S) -> Self {
        ShrinkError::UnknownAlgorithm(token.into())
    }

    /// Check if this is a read failure (including raw I/O failures)
    pub fn is_read_error(&self) -> bool {
        matches!(self, ShrinkError::ReadError(_) | ShrinkError::Io(_))
    }

    /// Check if this is a format error
    pub fn is_format_error(&self) -> bool {
        matches!(self, ShrinkError::FormatError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_creation() {
        let err = ShrinkError::read_error("permission denied");
        assert!(err.is_read_error());
        assert_eq!(err.to_string(), "read error: permission denied");
    }

    #[test]
    fn test_format_error_creation() {
        let err = ShrinkError::format_error("not a data URL");
        assert!(err.is_format_error());
        assert!(!err.is_read_error());
        assert_eq!(err.to_string(), "format error: not a data URL");
    }

    #[test]
    fn test_io_error_counts_as_read_error() {
        let io_err = std::io::Error::other("disk gone");
        let err = ShrinkError::from(io_err);
        assert!(err.is_read_error());
    }
}
