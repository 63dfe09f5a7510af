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

// Property tests for the session transition function

#![allow(clippy::unwrap_used)]

use bytes::Bytes;
use proptest::prelude::*;
use shrinkwrap_core::{AlgorithmKey, DataUrl, Direction, OperationResult, TransformOutput};
use shrinkwrap_session::{Completed, Event, FileId, FileKind, SessionState};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Step {
    Select(bool),
    Arm,
    SuggestionStarted,
    SuggestionSettled { stale: bool, algorithm: Option<usize> },
    Override(usize),
    RunStarted(bool),
    RunSucceeded { stale: bool },
    RunFailed { stale: bool },
    Clear,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        any::<bool>().prop_map(Step::Select),
        Just(Step::Arm),
        Just(Step::SuggestionStarted),
        (any::<bool>(), proptest::option::of(0usize..5))
            .prop_map(|(stale, algorithm)| Step::SuggestionSettled { stale, algorithm }),
        (0usize..5).prop_map(Step::Override),
        any::<bool>().prop_map(Step::RunStarted),
        any::<bool>().prop_map(|stale| Step::RunSucceeded { stale }),
        any::<bool>().prop_map(|stale| Step::RunFailed { stale }),
        Just(Step::Clear),
    ]
}

fn completed() -> Box<Completed> {
    let result = OperationResult::compressed(4, 2, 0.5, Duration::from_millis(1));
    Box::new(Completed {
        output: TransformOutput {
            payload: DataUrl::from_bytes("text/plain", b"ab"),
            bytes: Bytes::from_static(b"ab"),
            result: result.clone(),
        },
        result,
        output_name: "x.txt.huffman.shrnk".to_string(),
    })
}

fn to_event(step: Step, current: FileId, next: FileId) -> Event {
    let stale_id = FileId::first();
    let pick = |stale: bool| if stale && current != stale_id { stale_id } else { current };
    match step {
        Step::Select(artifact) => Event::Select {
            file: next,
            kind: if artifact { FileKind::Artifact } else { FileKind::Plain },
            algorithm: AlgorithmKey::Huffman,
        },
        Step::Arm => Event::Arm,
        Step::SuggestionStarted => Event::SuggestionStarted,
        Step::SuggestionSettled { stale, algorithm } => Event::SuggestionSettled {
            file: pick(stale),
            algorithm: algorithm.map(|i| AlgorithmKey::ALL[i]),
        },
        Step::Override(i) => Event::Override(AlgorithmKey::ALL[i]),
        Step::RunStarted(compress) => Event::RunStarted(if compress {
            Direction::Compress
        } else {
            Direction::Decompress
        }),
        Step::RunSucceeded { stale } => Event::RunSucceeded {
            file: pick(stale),
            completed: completed(),
        },
        Step::RunFailed { stale } => Event::RunFailed { file: pick(stale) },
        Step::Clear => Event::Clear,
    }
}

proptest! {
    #[test]
    fn transitions_preserve_invariants(steps in proptest::collection::vec(step(), 1..40)) {
        let mut state = SessionState::Empty;
        let mut current = FileId::first();
        let mut next = FileId::first();

        for step in steps {
            let before = state.clone();
            let is_select = matches!(step, Step::Select(_));
            let event = to_event(step, current, next);
            let starts_run = matches!(event, Event::RunStarted(_));

            match before.apply(event) {
                Ok(after) => {
                    if is_select {
                        current = next;
                        next = next.next();
                    }
                    if starts_run {
                        // only from Ready or Settled, and the old result is gone
                        let from_runnable =
                            matches!(before, SessionState::Ready { .. } | SessionState::Settled { .. });
                        prop_assert!(from_runnable, "run started from {}", before.name());
                        prop_assert!(after.result().is_none());
                    }
                    state = after;
                }
                Err(_) => {
                    // rejected events leave the state alone
                    state = before;
                }
            }

            if let Some(direction) = state.enabled_direction() {
                prop_assert_eq!(Some(direction), state.kind().map(FileKind::enabled_direction));
            }
            if state.result().is_some() {
                prop_assert_eq!(state.name(), "settled");
            }
            if matches!(state, SessionState::Suggesting { .. }) {
                prop_assert_eq!(state.kind(), Some(FileKind::Plain));
            }
        }
    }
}
