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

//! Terminal output helpers
//!
//! Consistent, colored status lines for every ShrinkWrap command. Status
//! goes to stdout; errors go to stderr.
//!
//! ```text
//! ✅ Saved photo.png.rle.shrnk
//! ⚠️  AI Suggestion Failed: Using a fallback suggestion based on your file type.
//!   Algorithm: Run-Length Encoding
//! ```

use console::style;
use shrinkwrap_session::{Notice, NoticeLevel};

/// Print a success message with green checkmark emoji.
pub fn success(msg: &str) {
    println!("{} {}", style("✅").green().bold(), msg);
}

/// Print an error message to stderr with red X emoji.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("❌").red().bold(), msg);
}

/// Print an informational message with cyan info emoji.
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ️").cyan(), msg);
}

/// Print a warning message with yellow warning emoji.
pub fn warning(msg: &str) {
    println!("{} {}", style("⚠️").yellow(), msg);
}

/// Print a detail line with key-value formatting.
///
/// The key is displayed in regular text, and the value is highlighted in cyan.
pub fn detail(key: &str, value: &str) {
    println!("  {}: {}", key, style(value).cyan());
}

/// Print a header message.
pub fn header(msg: &str) {
    println!("{} {}", style("📦").green().bold(), msg);
}

/// Print a session notice at its level
pub fn notice(notice: &Notice) {
    let line = format!("{}: {}", style(&notice.title).bold(), notice.message);
    match notice.level {
        NoticeLevel::Info => info(&line),
        NoticeLevel::Warning => warning(&line),
        NoticeLevel::Error => error(&line),
    }
}
