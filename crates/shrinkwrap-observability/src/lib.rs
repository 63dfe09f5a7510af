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

//! Structured logging for ShrinkWrap.
//!
//! ```ignore
//! use shrinkwrap_observability::{init_tracing, LogFormat};
//!
//! fn main() {
//!     init_tracing(LogFormat::Compact, Some("debug")).unwrap();
//!     tracing::info!("Application started");
//! }
//! ```

pub mod config;
pub mod initialization;

pub use config::{LogConfig, LogError, LogFormat, LogOutput, LEVELS};
pub use initialization::{init_tracing, init_tracing_with_config};
