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

//! Delivery error types

use thiserror::Error;

/// Result type alias for delivery operations
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Errors that can occur while handing an artifact to the user
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// Recipient address is not a well-formed email address
    #[error("invalid recipient address: {0}")]
    InvalidRecipient(String),

    /// Attachment exceeds the mail size ceiling
    #[error("attachment of {size} bytes exceeds the {limit} byte limit")]
    AttachmentTooLarge {
        /// Estimated attachment size
        size: u64,
        /// Configured ceiling
        limit: u64,
    },

    /// No mail transport or sender address is configured
    #[error("Server is not configured for sending emails. Please contact support.")]
    NotConfigured,

    /// Transport rejected the message; message kept verbatim
    #[error("{0}")]
    TransportFailure(String),

    /// Download target is not usable
    #[error("invalid download target: {0}")]
    InvalidTarget(String),

    /// I/O error while writing a download
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeliveryError {
    /// Create an invalid recipient error
    pub fn invalid_recipient<S: Into<String>>(address: S) -> Self {
        DeliveryError::InvalidRecipient(address.into())
    }

    /// Create a transport failure error
    pub fn transport_failure<S: Into<String>>(msg: S) -> Self {
        DeliveryError::TransportFailure(msg.into())
    }

    /// Check if the attachment was rejected for its size
    pub fn is_too_large(&self) -> bool {
        matches!(self, DeliveryError::AttachmentTooLarge { .. })
    }

    /// Check if the transport itself failed
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, DeliveryError::TransportFailure(_))
    }
}
