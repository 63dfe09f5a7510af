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

//! Delivery of processed artifacts
//!
//! Two ways out: [`write_download`] puts the bytes on disk, and
//! [`MailDispatcher`] mails them through a [`MailTransport`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use shrinkwrap_core::DataUrl;
//! use shrinkwrap_delivery::{MailDispatcher, MailRequest, mock::MockTransport};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let transport = MockTransport::new();
//!     let dispatcher = MailDispatcher::new(Arc::new(transport.clone()), "noreply@example.com");
//!
//!     let payload = DataUrl::from_bytes("text/plain", b"hello");
//!     let request = MailRequest::new("user@example.com", "hello.txt.lz77.shrnk", payload);
//!     let confirmation = dispatcher.dispatch(&request).await?;
//!
//!     assert_eq!(confirmation, "Email sent successfully to user@example.com.");
//!     assert_eq!(transport.len().await, 1);
//!     Ok(())
//! }
//! ```

pub mod dispatcher;
pub mod download;
pub mod error;
pub mod message;
pub mod mock;
pub mod relay;

use async_trait::async_trait;
use std::fmt::Debug;

pub use dispatcher::{MailDispatcher, MAX_ATTACHMENT_BYTES};
pub use download::write_download;
pub use error::{DeliveryError, DeliveryResult};
pub use message::{is_valid_address, Attachment, MailMessage, MailRequest};
pub use relay::HttpRelayTransport;

/// Outbound mail transport
///
/// Failures are reported as `Err` with a message suitable for the user;
/// the dispatcher passes it on unchanged.
#[async_trait]
pub trait MailTransport: Send + Sync + Debug {
    /// Deliver a composed message
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be delivered
    async fn send(&self, message: &MailMessage) -> anyhow::Result<()>;

    /// Short transport name for logs
    fn name(&self) -> &'static str;
}
