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

//! User-facing notifications

use serde::Serialize;
use shrinkwrap_core::{AlgorithmKey, Direction};
use shrinkwrap_delivery::{DeliveryError, DeliveryResult};
use std::fmt;

/// Severity of a [`Notice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Informational
    Info,
    /// Recovered problem
    Warning,
    /// Failed operation
    Error,
}

/// Short message for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Title line
    pub title: String,
    /// Details
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, title: &str, message: impl Into<String>) -> Self {
        Notice {
            level,
            title: title.to_string(),
            message: message.into(),
        }
    }

    /// An artifact was selected and its algorithm recognized
    pub fn artifact_detected(algorithm: AlgorithmKey) -> Self {
        Self::new(
            NoticeLevel::Info,
            "Compressed File Detected",
            format!(
                "Algorithm \"{}\" detected. Ready for decompression.",
                algorithm.display_name()
            ),
        )
    }

    /// The suggestion backend failed and the fallback was used
    pub fn suggestion_failed() -> Self {
        Self::new(
            NoticeLevel::Warning,
            "AI Suggestion Failed",
            "Using a fallback suggestion based on your file type.",
        )
    }

    /// An operation was requested without a file
    pub fn no_file_selected(direction: Option<Direction>) -> Self {
        let message = match direction {
            Some(direction) => format!("Please upload a file to {}.", direction),
            None => "Please upload a file first.".to_string(),
        };
        Self::new(NoticeLevel::Error, "No File Selected", message)
    }

    /// The transform failed
    pub fn processing_error(direction: Direction) -> Self {
        Self::new(
            NoticeLevel::Error,
            "Processing Error",
            format!(
                "An unexpected error occurred during file {}. Please try again.",
                direction
            ),
        )
    }

    /// The file contents could not be read
    pub fn file_read_error() -> Self {
        Self::new(
            NoticeLevel::Error,
            "File Read Error",
            "Could not read the contents of the uploaded file.",
        )
    }

    /// Delivery was requested before any successful run
    pub fn no_result() -> Self {
        Self::new(
            NoticeLevel::Error,
            "Email Error",
            "No processed file content available to send.",
        )
    }

    /// A request the current state does not allow
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, "Action Unavailable", message)
    }

    /// A run completed
    pub fn processed(direction: Direction, output_name: &str) -> Self {
        let verb = match direction {
            Direction::Compress => "compressed",
            Direction::Decompress => "decompressed",
        };
        Self::new(
            NoticeLevel::Info,
            "Processing Complete",
            format!("File {} as {}.", verb, output_name),
        )
    }

    /// Notice for the outcome of a mail dispatch
    pub fn from_delivery(outcome: &DeliveryResult<String>, max_attachment_bytes: u64) -> Self {
        match outcome {
            Ok(confirmation) => Self::new(NoticeLevel::Info, "Email Sent!", confirmation.clone()),
            Err(DeliveryError::AttachmentTooLarge { .. }) => Self::new(
                NoticeLevel::Error,
                "File Too Large",
                format!(
                    "The processed file is larger than {}MB and cannot be sent via email.",
                    max_attachment_bytes / (1024 * 1024)
                ),
            ),
            Err(DeliveryError::InvalidRecipient(_)) => Self::new(
                NoticeLevel::Error,
                "Email Failed to Send",
                "Please enter a valid email address.",
            ),
            Err(e) => Self::new(NoticeLevel::Error, "Email Failed to Send", e.to_string()),
        }
    }

    /// Check if this notice reports a failure
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_notice_names_algorithm() {
        let notice = Notice::artifact_detected(AlgorithmKey::Deflate);
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.message, "Algorithm \"DEFLATE\" detected. Ready for decompression.");
    }

    #[test]
    fn no_file_message_names_direction() {
        let notice = Notice::no_file_selected(Some(Direction::Compress));
        assert_eq!(notice.to_string(), "No File Selected: Please upload a file to compression.");
    }

    #[test]
    fn processed_notice_names_output() {
        let notice = Notice::processed(Direction::Decompress, "report.pdf");
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.to_string(), "Processing Complete: File decompressed as report.pdf.");
    }

    #[test]
    fn delivery_outcomes() {
        let sent = Notice::from_delivery(&Ok("Email sent successfully to a@b.co.".into()), 20 << 20);
        assert_eq!(sent.title, "Email Sent!");
        assert!(!sent.is_error());

        let too_large = Notice::from_delivery(
            &Err(DeliveryError::AttachmentTooLarge { size: 30 << 20, limit: 20 << 20 }),
            20 << 20,
        );
        assert_eq!(too_large.title, "File Too Large");
        assert!(too_large.message.contains("20MB"));

        let failed = Notice::from_delivery(&Err(DeliveryError::NotConfigured), 20 << 20);
        assert_eq!(failed.title, "Email Failed to Send");
        assert!(failed.message.starts_with("Server is not configured"));
    }
}
