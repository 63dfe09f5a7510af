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

//! Mail dispatch with local checks
//!
//! Checks run in a fixed order and stop at the first failure:
//! recipient address, attachment size, configuration, then the transport.

use crate::error::{DeliveryError, DeliveryResult};
use crate::message::{is_valid_address, MailMessage, MailRequest};
use crate::MailTransport;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Default attachment ceiling (20 MiB)
pub const MAX_ATTACHMENT_BYTES: u64 = 20 * 1024 * 1024;

/// Validates mail requests and hands them to a transport
#[derive(Debug, Clone)]
pub struct MailDispatcher {
    transport: Option<Arc<dyn MailTransport>>,
    from_address: Option<String>,
    max_attachment_bytes: u64,
}

impl MailDispatcher {
    /// Dispatcher with a transport and sender address
    pub fn new(transport: Arc<dyn MailTransport>, from_address: impl Into<String>) -> Self {
        MailDispatcher {
            transport: Some(transport),
            from_address: Some(from_address.into()),
            max_attachment_bytes: MAX_ATTACHMENT_BYTES,
        }
    }

    /// Dispatcher that reports every send as not configured
    pub fn unconfigured() -> Self {
        MailDispatcher {
            transport: None,
            from_address: None,
            max_attachment_bytes: MAX_ATTACHMENT_BYTES,
        }
    }

    /// Override the attachment ceiling
    pub fn with_max_attachment_bytes(mut self, limit: u64) -> Self {
        self.max_attachment_bytes = limit;
        self
    }

    /// Attachment ceiling in bytes
    pub fn max_attachment_bytes(&self) -> u64 {
        self.max_attachment_bytes
    }

    /// Check if a transport and sender address are present
    pub fn is_configured(&self) -> bool {
        self.transport.is_some() && self.from_address.is_some()
    }

    /// Send the processed file.
    ///
    /// Returns the user-facing success message.
    ///
    /// # Errors
    ///
    /// - [`DeliveryError::InvalidRecipient`] for a malformed address
    /// - [`DeliveryError::AttachmentTooLarge`] above the ceiling, before any
    ///   transport call
    /// - [`DeliveryError::NotConfigured`] without transport or sender
    /// - [`DeliveryError::TransportFailure`] with the transport's message
    #[instrument(skip(self, request), fields(to = %request.recipient, file = %request.file_name))]
    pub async fn dispatch(&self, request: &MailRequest) -> DeliveryResult<String> {
        if !is_valid_address(&request.recipient) {
            return Err(DeliveryError::invalid_recipient(&request.recipient));
        }

        let size = request.estimated_attachment_size();
        if size > self.max_attachment_bytes {
            warn!(size, limit = self.max_attachment_bytes, "Attachment too large");
            return Err(DeliveryError::AttachmentTooLarge {
                size,
                limit: self.max_attachment_bytes,
            });
        }

        let (Some(transport), Some(from)) = (&self.transport, &self.from_address) else {
            warn!("Mail transport is not configured");
            return Err(DeliveryError::NotConfigured);
        };

        let message = MailMessage::compose(from, request);
        transport.send(&message).await.map_err(|e| {
            warn!(transport = transport.name(), error = %e, "Mail transport failed");
            DeliveryError::transport_failure(e.to_string())
        })?;

        info!(transport = transport.name(), "Email sent");
        Ok(format!("Email sent successfully to {}.", request.recipient))
    }
}
