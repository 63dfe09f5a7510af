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

//! Session driver
//!
//! [`Session`] owns the current [`SessionState`], the selected file and the
//! collaborators. Long-running calls are split into `begin_*` / `complete_*`
//! pairs joined by a ticket, so a caller can await the advisor or simulator
//! elsewhere and hand the answer back later. Answers whose ticket no longer
//! matches the selection are discarded. The `suggest` and `run` methods
//! chain both halves for callers that simply await.

use crate::error::{SessionError, SessionResult};
use crate::notice::Notice;
use crate::state::{Completed, Event, FileId, FileKind, SessionState};
use shrinkwrap_advisor::{Advice, AlgorithmAdvisor, SuggestionOutcome};
use shrinkwrap_core::naming;
use shrinkwrap_core::{
    classify, AlgorithmKey, Classification, CoarseType, DataUrl, Direction, FileRecord,
    OperationResult, ShrinkResult, TransformOutput, TransformSimulator,
};
use shrinkwrap_delivery::{MailDispatcher, MailRequest};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Algorithm selected for a plain file before any suggestion arrives
pub const DEFAULT_ALGORITHM: AlgorithmKey = AlgorithmKey::Deflate;

/// Handle for an outstanding suggestion request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionTicket {
    /// Selection the request belongs to
    pub file: FileId,
    /// Coarse type to ask about
    pub file_type: CoarseType,
}

/// Handle for an outstanding transform run
#[derive(Debug, Clone)]
pub struct RunTicket {
    /// Selection the run belongs to
    pub file: FileId,
    /// Input payload
    pub payload: DataUrl,
    /// Algorithm to apply
    pub algorithm: AlgorithmKey,
    /// Direction to run in
    pub direction: Direction,
    source_name: String,
}

/// What a selection produced
#[derive(Debug, Clone)]
pub struct Selection {
    /// Identity of the new selection
    pub file: FileId,
    /// Classification of the file name
    pub classification: Classification,
    /// Notice to show, if any
    pub notice: Option<Notice>,
}

/// Single active session
#[derive(Debug)]
pub struct Session {
    advisor: AlgorithmAdvisor,
    simulator: TransformSimulator,
    state: SessionState,
    record: Option<Arc<FileRecord>>,
    classification: Option<Classification>,
    suggestion: Option<SuggestionOutcome>,
    last_file: Option<FileId>,
}

impl Session {
    /// Create an empty session
    pub fn new(advisor: AlgorithmAdvisor, simulator: TransformSimulator) -> Self {
        Session {
            advisor,
            simulator,
            state: SessionState::Empty,
            record: None,
            classification: None,
            suggestion: None,
            last_file: None,
        }
    }

    /// Current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Selected file
    pub fn record(&self) -> Option<&Arc<FileRecord>> {
        self.record.as_ref()
    }

    /// Classification of the selected file
    pub fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }

    /// Last suggestion received for the selected file
    pub fn suggestion(&self) -> Option<&SuggestionOutcome> {
        self.suggestion.as_ref()
    }

    /// Current algorithm
    pub fn algorithm(&self) -> Option<AlgorithmKey> {
        self.state.algorithm()
    }

    /// Direction a run may be started in right now
    pub fn enabled_direction(&self) -> Option<Direction> {
        self.state.enabled_direction()
    }

    /// Metrics of the live result
    pub fn result(&self) -> Option<&OperationResult> {
        self.state.result()
    }

    /// Output of the live result
    pub fn completed(&self) -> Option<&Completed> {
        self.state.completed()
    }

    fn transition(&mut self, event: Event) -> SessionResult<()> {
        let event_name = event.name();
        let next = self.state.apply(event)?;
        debug!(from = self.state.name(), to = next.name(), event = event_name, "Session transition");
        self.state = next;
        Ok(())
    }

    /// Replace the selection with `record`.
    ///
    /// Artifacts become ready for decompression immediately with their
    /// detected algorithm; plain files wait for [`Session::suggest`] or
    /// [`Session::skip_suggestion`].
    ///
    /// # Errors
    ///
    /// Selection is accepted in every state; errors only surface if the
    /// transition table rejects arming the new file.
    #[instrument(skip(self, record), fields(name = record.name()))]
    pub fn select(&mut self, record: FileRecord) -> SessionResult<Selection> {
        let file = self.last_file.map(FileId::next).unwrap_or_else(FileId::first);
        self.last_file = Some(file);

        let classification = classify(record.name());
        let (kind, algorithm) = match (classification.is_artifact, classification.detected_algorithm) {
            (true, Some(detected)) => (FileKind::Artifact, detected),
            _ => (FileKind::Plain, DEFAULT_ALGORITHM),
        };

        self.transition(Event::Select { file, kind, algorithm })?;
        self.record = Some(Arc::new(record));
        self.classification = Some(classification);
        self.suggestion = None;

        let notice = match kind {
            FileKind::Artifact => {
                self.transition(Event::Arm)?;
                info!(algorithm = %algorithm, "Artifact detected");
                Some(Notice::artifact_detected(algorithm))
            }
            FileKind::Plain => None,
        };

        Ok(Selection {
            file,
            classification,
            notice,
        })
    }

    /// Load a file from disk and select it
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Read`] if the file cannot be read; the
    /// current selection is left untouched.
    pub async fn open(&mut self, path: impl AsRef<Path>) -> SessionResult<Selection> {
        let record = FileRecord::load(path).await.map_err(SessionError::Read)?;
        self.select(record)
    }

    /// Drop the selection and any result
    pub fn clear(&mut self) {
        self.state = SessionState::Empty;
        self.record = None;
        self.classification = None;
        self.suggestion = None;
    }

    /// Mark the request for a suggestion as sent.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoFileSelected`] without a file, or
    /// [`SessionError::InvalidTransition`] unless a plain file was just
    /// classified.
    pub fn begin_suggestion(&mut self) -> SessionResult<SuggestionTicket> {
        let (Some(file), Some(classification)) = (self.state.file(), self.classification) else {
            return Err(SessionError::NoFileSelected(None));
        };
        self.transition(Event::SuggestionStarted)?;
        Ok(SuggestionTicket {
            file,
            file_type: classification.coarse_type,
        })
    }

    /// Apply advice for a ticket.
    ///
    /// Returns a warning notice when the advice came from the fallback rule.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Stale`] when the selection changed since the
    /// ticket was issued; the advice is discarded.
    pub fn complete_suggestion(
        &mut self,
        ticket: SuggestionTicket,
        advice: Advice,
    ) -> SessionResult<Option<Notice>> {
        if let Err(e) = self.transition(Event::SuggestionSettled {
            file: ticket.file,
            algorithm: advice.algorithm,
        }) {
            if e.is_stale() {
                debug!(file = %ticket.file, "Discarding stale suggestion");
            }
            return Err(e);
        }

        let notice = advice.is_fallback().then(Notice::suggestion_failed);
        self.suggestion = Some(advice.outcome);
        Ok(notice)
    }

    /// Ask the advisor and apply its answer
    ///
    /// # Errors
    ///
    /// See [`Session::begin_suggestion`] and [`Session::complete_suggestion`].
    pub async fn suggest(&mut self) -> SessionResult<Option<Notice>> {
        let ticket = self.begin_suggestion()?;
        let advice = self.advisor.suggest(ticket.file_type).await;
        self.complete_suggestion(ticket, advice)
    }

    /// Enable the direction without asking for a suggestion
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] unless the file was just
    /// classified.
    pub fn skip_suggestion(&mut self) -> SessionResult<()> {
        if self.state.file().is_none() {
            return Err(SessionError::NoFileSelected(None));
        }
        self.transition(Event::Arm)
    }

    /// Pick an algorithm.
    ///
    /// Changing the algorithm after a successful run drops that result.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoFileSelected`] without a file, or
    /// [`SessionError::InvalidTransition`] while a run is in progress.
    pub fn override_algorithm(&mut self, algorithm: AlgorithmKey) -> SessionResult<()> {
        if self.state.file().is_none() {
            return Err(SessionError::NoFileSelected(None));
        }
        self.transition(Event::Override(algorithm))
    }

    /// Start a run, discarding any previous result.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoFileSelected`] without a file
    /// - [`SessionError::DirectionDisabled`] for the direction the file does
    ///   not enable
    /// - [`SessionError::InvalidTransition`] when not ready
    pub fn begin_run(&mut self, direction: Direction) -> SessionResult<RunTicket> {
        let Some(record) = self.record.clone() else {
            return Err(SessionError::NoFileSelected(Some(direction)));
        };
        self.transition(Event::RunStarted(direction))?;

        let (Some(file), Some(algorithm)) = (self.state.file(), self.state.algorithm()) else {
            return Err(SessionError::NoFileSelected(Some(direction)));
        };

        Ok(RunTicket {
            file,
            payload: record.to_data_url(),
            algorithm,
            direction,
            source_name: record.name().to_string(),
        })
    }

    /// Settle a run with its outcome.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Stale`] when the selection changed; nothing is kept
    /// - [`SessionError::Transform`] when the run failed; the state settles as
    ///   failed with the file and selection kept
    pub fn complete_run(
        &mut self,
        ticket: RunTicket,
        outcome: ShrinkResult<TransformOutput>,
    ) -> SessionResult<&Completed> {
        match outcome {
            Ok(output) => {
                let output_name = naming::encode(&ticket.source_name, ticket.algorithm, ticket.direction);
                let completed = Completed {
                    result: output.result.clone(),
                    output,
                    output_name,
                };
                self.transition(Event::RunSucceeded {
                    file: ticket.file,
                    completed: Box::new(completed),
                })?;
                self.state.completed().ok_or(SessionError::NoResult)
            }
            Err(source) => {
                warn!(error = %source, direction = %ticket.direction, "Run failed");
                self.transition(Event::RunFailed { file: ticket.file })?;
                Err(SessionError::Transform {
                    direction: ticket.direction,
                    source,
                })
            }
        }
    }

    /// Run the transform and settle the session
    ///
    /// # Errors
    ///
    /// See [`Session::begin_run`] and [`Session::complete_run`].
    pub async fn run(&mut self, direction: Direction) -> SessionResult<&Completed> {
        let ticket = self.begin_run(direction)?;
        let outcome = self
            .simulator
            .run(&ticket.payload, ticket.algorithm, ticket.direction)
            .await;
        self.complete_run(ticket, outcome)
    }

    /// Build a mail request for the live result
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoResult`] without a successful run.
    pub fn mail_request(&self, recipient: &str) -> SessionResult<MailRequest> {
        let completed = self.completed().ok_or(SessionError::NoResult)?;
        Ok(MailRequest::new(
            recipient,
            completed.output_name.clone(),
            completed.output.payload.clone(),
        ))
    }

    /// Mail the live result and report the outcome as a notice
    pub async fn send_email(&self, dispatcher: &MailDispatcher, recipient: &str) -> Notice {
        let request = match self.mail_request(recipient) {
            Ok(request) => request,
            Err(e) => return e.notice().unwrap_or_else(Notice::no_result),
        };
        let outcome = dispatcher.dispatch(&request).await;
        Notice::from_delivery(&outcome, dispatcher.max_attachment_bytes())
    }
}
