//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::time::Duration;

use chordmap::keymap::{ActionContext, KeyChord, Primitive, StatusSink};

/// Something the host was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Perform(Primitive, KeyChord),
    Finish(i32),
    Status(String, Option<Duration>),
}

/// ActionContext that records every call
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn performed(&self) -> Vec<Primitive> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Perform(p, _) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Status(text, _) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl StatusSink for RecordingHost {
    fn set_status(&mut self, text: &str, clear_after: Option<Duration>) {
        self.calls.push(HostCall::Status(text.to_string(), clear_after));
    }
}

impl ActionContext for RecordingHost {
    fn perform(&mut self, primitive: Primitive, chord: &KeyChord) {
        self.calls.push(HostCall::Perform(primitive, *chord));
    }

    fn finish(&mut self, code: i32) {
        self.calls.push(HostCall::Finish(code));
    }
}

/// Parse a key spec into its chords
pub fn chords(spec: &str) -> Vec<KeyChord> {
    spec.parse::<chordmap::keymap::KeySequence>()
        .unwrap_or_else(|e| panic!("bad test key spec {spec}: {e}"))
        .chords()
        .to_vec()
}
