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

//! Command modules for the ShrinkWrap CLI

pub mod algorithms;
pub mod inspect;
pub mod process;
pub mod suggest;

pub use algorithms::AlgorithmsCmd;
pub use inspect::InspectCmd;
pub use process::{CompressCmd, DecompressCmd};
pub use suggest::SuggestCmd;

use anyhow::{Context, Result};
use std::path::Path;

/// Final path component as UTF-8, used for classification
pub(crate) fn file_name_of(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Not a file name: {}", path.display()))
}
