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

//! In-memory mock mail transport for testing
//!
//! Records every message it is asked to send. Clones share the outbox.

use crate::message::MailMessage;
use crate::MailTransport;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Recording mail transport
#[derive(Clone, Default)]
pub struct MockTransport {
    outbox: Arc<RwLock<Vec<MailMessage>>>,
    failure: Option<String>,
}

impl MockTransport {
    /// Transport that accepts every message
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport that rejects every message with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        MockTransport {
            outbox: Arc::new(RwLock::new(Vec::new())),
            failure: Some(message.into()),
        }
    }

    /// Messages sent so far
    pub async fn sent(&self) -> Vec<MailMessage> {
        self.outbox.read().await.clone()
    }

    /// Number of send attempts
    pub async fn len(&self) -> usize {
        self.outbox.read().await.len()
    }

    /// Check if nothing was sent
    pub async fn is_empty(&self) -> bool {
        self.outbox.read().await.is_empty()
    }
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTransport")
            .field("failing", &self.failure.is_some())
            .finish()
    }
}

#[async_trait]
impl MailTransport for MockTransport {
    async fn send(&self, message: &MailMessage) -> anyhow::Result<()> {
        self.outbox.write().await.push(message.clone());
        match &self.failure {
            Some(reason) => anyhow::bail!("{}", reason),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
