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

//! Per-file session orchestration for ShrinkWrap
//!
//! A [`Session`] drives one selected file through classification, algorithm
//! advice, an optional override, and a simulated transform. Its state is a
//! single [`SessionState`] value updated only through
//! [`SessionState::apply`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use shrinkwrap_advisor::AlgorithmAdvisor;
//! use shrinkwrap_core::{Direction, FileRecord, SimulatorSettings, TransformSimulator};
//! use shrinkwrap_session::Session;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut session = Session::new(
//!         AlgorithmAdvisor::offline(),
//!         TransformSimulator::new(SimulatorSettings::instant()),
//!     );
//!
//!     session.select(FileRecord::new("photo.png", vec![0u8; 1_000]))?;
//!     session.suggest().await?;
//!
//!     let completed = session.run(Direction::Compress).await?;
//!     assert_eq!(completed.output_name, "photo.png.rle.shrnk");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod notice;
pub mod session;
pub mod state;

pub use error::{SessionError, SessionResult};
pub use notice::{Notice, NoticeLevel};
pub use session::{RunTicket, Selection, Session, SuggestionTicket, DEFAULT_ALGORITHM};
pub use state::{Completed, Event, FileId, FileKind, SessionState, Settlement};
