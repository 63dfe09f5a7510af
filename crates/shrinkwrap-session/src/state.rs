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

//! Session state machine
//!
//! ```text
//! Empty ─Select─▶ Classified ─SuggestionStarted─▶ Suggesting ─SuggestionSettled─▶ Ready
//!                     │                                                          ▲   │
//!                     └──────────────────────Arm─────────────────────────────────┘   │
//!                                                                              RunStarted
//!                                                                                    ▼
//!               Settled(Success | Failed) ◀──RunSucceeded / RunFailed── Processing
//! ```
//!
//! `Clear` and `Select` are accepted in every state. [`SessionState::apply`]
//! is a pure function; the driver in [`crate::session`] owns the current value.

use crate::error::{SessionError, SessionResult};
use shrinkwrap_core::{AlgorithmKey, Direction, OperationResult, TransformOutput};
use std::fmt;

/// Identity of one file selection.
///
/// Every selection gets a fresh id, so two selections of the same name are
/// still distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u64);

impl FileId {
    /// Id of the first selection
    pub fn first() -> Self {
        FileId(1)
    }

    /// Id of the selection after this one
    pub fn next(self) -> Self {
        FileId(self.0 + 1)
    }

    /// Raw generation number
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a selected file was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Previously produced artifact; only decompression is enabled
    Artifact,
    /// Any other file; only compression is enabled
    Plain,
}

impl FileKind {
    /// The one direction this kind enables
    pub fn enabled_direction(self) -> Direction {
        match self {
            FileKind::Artifact => Direction::Decompress,
            FileKind::Plain => Direction::Compress,
        }
    }

    /// Check if `direction` is enabled for this kind
    pub fn allows(self, direction: Direction) -> bool {
        self.enabled_direction() == direction
    }
}

/// A successful run
#[derive(Debug, Clone)]
pub struct Completed {
    /// Metrics
    pub result: OperationResult,
    /// Transformed payload
    pub output: TransformOutput,
    /// Name for the output artifact
    pub output_name: String,
}

/// How a run ended
#[derive(Debug, Clone)]
pub enum Settlement {
    /// The run produced a result
    Success(Box<Completed>),
    /// The run failed; no result is kept
    Failed,
}

/// State of the active session
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// No file selected
    #[default]
    Empty,
    /// File selected and classified
    Classified {
        /// Selection identity
        file: FileId,
        /// Classification
        kind: FileKind,
        /// Current algorithm
        algorithm: AlgorithmKey,
    },
    /// Waiting for an algorithm suggestion (plain files only)
    Suggesting {
        /// Selection identity
        file: FileId,
        /// Current algorithm
        algorithm: AlgorithmKey,
    },
    /// One direction is enabled
    Ready {
        /// Selection identity
        file: FileId,
        /// Classification
        kind: FileKind,
        /// Current algorithm
        algorithm: AlgorithmKey,
    },
    /// A transform is running
    Processing {
        /// Selection identity
        file: FileId,
        /// Classification
        kind: FileKind,
        /// Algorithm in use
        algorithm: AlgorithmKey,
        /// Direction in use
        direction: Direction,
    },
    /// The last run finished
    Settled {
        /// Selection identity
        file: FileId,
        /// Classification
        kind: FileKind,
        /// Algorithm used
        algorithm: AlgorithmKey,
        /// Direction used
        direction: Direction,
        /// Outcome
        settlement: Settlement,
    },
}

/// Inputs to the state machine
#[derive(Debug, Clone)]
pub enum Event {
    /// A new file was selected
    Select {
        /// Fresh selection identity
        file: FileId,
        /// Classification
        kind: FileKind,
        /// Initial algorithm
        algorithm: AlgorithmKey,
    },
    /// Skip the suggestion and enable the direction
    Arm,
    /// A suggestion request was sent
    SuggestionStarted,
    /// A suggestion (remote or fallback) arrived
    SuggestionSettled {
        /// Selection the request was made for
        file: FileId,
        /// Mapped key; `None` keeps the current algorithm
        algorithm: Option<AlgorithmKey>,
    },
    /// The user picked an algorithm
    Override(AlgorithmKey),
    /// A run was requested
    RunStarted(Direction),
    /// A run finished
    RunSucceeded {
        /// Selection the run was started for
        file: FileId,
        /// Output
        completed: Box<Completed>,
    },
    /// A run failed
    RunFailed {
        /// Selection the run was started for
        file: FileId,
    },
    /// The selection was cleared
    Clear,
}

impl Event {
    /// Short name for logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Event::Select { .. } => "select",
            Event::Arm => "arm",
            Event::SuggestionStarted => "start suggestion",
            Event::SuggestionSettled { .. } => "settle suggestion",
            Event::Override(_) => "override algorithm",
            Event::RunStarted(_) => "start run",
            Event::RunSucceeded { .. } => "complete run",
            Event::RunFailed { .. } => "fail run",
            Event::Clear => "clear",
        }
    }
}

impl SessionState {
    /// Short name for logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Empty => "empty",
            SessionState::Classified { .. } => "classified",
            SessionState::Suggesting { .. } => "suggesting",
            SessionState::Ready { .. } => "ready",
            SessionState::Processing { .. } => "processing",
            SessionState::Settled { .. } => "settled",
        }
    }

    /// Identity of the selected file
    pub fn file(&self) -> Option<FileId> {
        match self {
            SessionState::Empty => None,
            SessionState::Classified { file, .. }
            | SessionState::Suggesting { file, .. }
            | SessionState::Ready { file, .. }
            | SessionState::Processing { file, .. }
            | SessionState::Settled { file, .. } => Some(*file),
        }
    }

    /// Classification of the selected file
    pub fn kind(&self) -> Option<FileKind> {
        match self {
            SessionState::Empty => None,
            SessionState::Suggesting { .. } => Some(FileKind::Plain),
            SessionState::Classified { kind, .. }
            | SessionState::Ready { kind, .. }
            | SessionState::Processing { kind, .. }
            | SessionState::Settled { kind, .. } => Some(*kind),
        }
    }

    /// Current algorithm
    pub fn algorithm(&self) -> Option<AlgorithmKey> {
        match self {
            SessionState::Empty => None,
            SessionState::Classified { algorithm, .. }
            | SessionState::Suggesting { algorithm, .. }
            | SessionState::Ready { algorithm, .. }
            | SessionState::Processing { algorithm, .. }
            | SessionState::Settled { algorithm, .. } => Some(*algorithm),
        }
    }

    /// Direction a run may be started in right now
    pub fn enabled_direction(&self) -> Option<Direction> {
        match self {
            SessionState::Ready { kind, .. } | SessionState::Settled { kind, .. } => {
                Some(kind.enabled_direction())
            }
            _ => None,
        }
    }

    /// Output of the last successful run, if it is still live
    pub fn completed(&self) -> Option<&Completed> {
        match self {
            SessionState::Settled {
                settlement: Settlement::Success(completed),
                ..
            } => Some(completed),
            _ => None,
        }
    }

    /// Metrics of the last successful run, if still live
    pub fn result(&self) -> Option<&OperationResult> {
        self.completed().map(|completed| &completed.result)
    }

    /// Check if a suggestion or run is outstanding
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            SessionState::Suggesting { .. } | SessionState::Processing { .. }
        )
    }

    /// Compute the state that follows `event`.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Stale`] for responses that belong to another
    ///   selection or arrive when nothing is outstanding
    /// - [`SessionError::NoFileSelected`] for runs without a file
    /// - [`SessionError::DirectionDisabled`] for the wrong direction
    /// - [`SessionError::InvalidTransition`] for anything else not accepted
    pub fn apply(&self, event: Event) -> SessionResult<SessionState> {
        use SessionState::*;

        match (self, event) {
            (_, Event::Clear) => Ok(Empty),

            (_, Event::Select { file, kind, algorithm }) => Ok(Classified { file, kind, algorithm }),

            (Classified { file, kind, algorithm }, Event::Arm) => Ok(Ready {
                file: *file,
                kind: *kind,
                algorithm: *algorithm,
            }),

            (
                Classified {
                    file,
                    kind: FileKind::Plain,
                    algorithm,
                },
                Event::SuggestionStarted,
            ) => Ok(Suggesting {
                file: *file,
                algorithm: *algorithm,
            }),

            (Suggesting { file, algorithm }, Event::SuggestionSettled { file: answered, algorithm: mapped })
                if *file == answered =>
            {
                Ok(Ready {
                    file: *file,
                    kind: FileKind::Plain,
                    algorithm: mapped.unwrap_or(*algorithm),
                })
            }

            (_, Event::SuggestionSettled { .. }) => Err(SessionError::Stale),

            (Classified { file, kind, .. }, Event::Override(algorithm)) => Ok(Classified {
                file: *file,
                kind: *kind,
                algorithm,
            }),

            (Suggesting { file, .. }, Event::Override(algorithm)) => Ok(Suggesting {
                file: *file,
                algorithm,
            }),

            (Ready { file, kind, .. }, Event::Override(algorithm)) => Ok(Ready {
                file: *file,
                kind: *kind,
                algorithm,
            }),

            (Settled { algorithm: current, .. }, Event::Override(algorithm)) if *current == algorithm => {
                Ok(self.clone())
            }

            // a different algorithm invalidates the shown result
            (Settled { file, kind, .. }, Event::Override(algorithm)) => Ok(Ready {
                file: *file,
                kind: *kind,
                algorithm,
            }),

            (Empty, Event::RunStarted(direction)) => Err(SessionError::NoFileSelected(Some(direction))),

            (
                Ready { file, kind, algorithm } | Settled { file, kind, algorithm, .. },
                Event::RunStarted(direction),
            ) => {
                if !kind.allows(direction) {
                    return Err(SessionError::DirectionDisabled(direction));
                }
                Ok(Processing {
                    file: *file,
                    kind: *kind,
                    algorithm: *algorithm,
                    direction,
                })
            }

            (
                Processing {
                    file,
                    kind,
                    algorithm,
                    direction,
                },
                Event::RunSucceeded { file: ran, completed },
            ) if *file == ran => Ok(Settled {
                file: *file,
                kind: *kind,
                algorithm: *algorithm,
                direction: *direction,
                settlement: Settlement::Success(completed),
            }),

            (
                Processing {
                    file,
                    kind,
                    algorithm,
                    direction,
                },
                Event::RunFailed { file: ran },
            ) if *file == ran => Ok(Settled {
                file: *file,
                kind: *kind,
                algorithm: *algorithm,
                direction: *direction,
                settlement: Settlement::Failed,
            }),

            (_, Event::RunSucceeded { .. } | Event::RunFailed { .. }) => Err(SessionError::Stale),

            (state, event) => Err(SessionError::InvalidTransition {
                state: state.name(),
                event: event.name(),
            }),
        }
    }
}
