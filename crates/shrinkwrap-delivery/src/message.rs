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

//! Mail request and message types

use serde::Serialize;
use shrinkwrap_core::DataUrl;

/// What the caller wants mailed
#[derive(Debug, Clone)]
pub struct MailRequest {
    /// Recipient address
    pub recipient: String,
    /// Attachment file name
    pub file_name: String,
    /// Processed payload
    pub content: DataUrl,
}

impl MailRequest {
    /// Build a request
    pub fn new(recipient: impl Into<String>, file_name: impl Into<String>, content: DataUrl) -> Self {
        MailRequest {
            recipient: recipient.into(),
            file_name: file_name.into(),
            content,
        }
    }

    /// Attachment size estimated from the payload text: `len * 3 / 4`
    pub fn estimated_attachment_size(&self) -> u64 {
        self.content.text_len() as u64 * 3 / 4
    }
}

/// Attachment as handed to a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// File name shown to the recipient
    pub filename: String,
    /// MIME type from the payload header
    pub content_type: String,
    /// Base64 content
    pub content: String,
}

/// Fully composed outbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    /// Sender, `ShrinkWrap <address>`
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html: String,
    /// Attached files
    pub attachments: Vec<Attachment>,
}

impl MailMessage {
    /// Compose the message for a request
    pub fn compose(from_address: &str, request: &MailRequest) -> Self {
        MailMessage {
            from: format!("ShrinkWrap <{}>", from_address),
            to: request.recipient.clone(),
            subject: format!("Your processed file: {}", request.file_name),
            html: render_body(&request.file_name),
            attachments: vec![Attachment {
                filename: request.file_name.clone(),
                content_type: request.content.mime().to_string(),
                content: request.content.body().to_string(),
            }],
        }
    }
}

fn render_body(file_name: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head><meta charset=\"utf-8\"><title>Your Processed File from ShrinkWrap</title></head>\n",
            "<body style=\"font-family: 'IBM Plex Mono', monospace;\">\n",
            "<h1>ShrinkWrap</h1>\n",
            "<p>Hello,</p>\n",
            "<p>Thank you for using ShrinkWrap! Your processed file, <strong>{}</strong>, ",
            "is attached to this email.</p>\n",
            "<p>Best regards,<br/>The ShrinkWrap Team</p>\n",
            "</body>\n",
            "</html>\n"
        ),
        escape_html(file_name)
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Loose email address check: one `@`, non-empty local part, dotted domain,
/// no whitespace.
pub fn is_valid_address(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
