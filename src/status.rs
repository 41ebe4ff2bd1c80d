//! Status line with optional auto-clear
//!
//! Key-sequence feedback flashes here for a short time. Setting new text
//! replaces any pending clear.

use std::time::{Duration, Instant};

use crate::keymap::StatusSink;

/// Single-line status text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    /// The text shown, empty when cleared
    text: String,
    /// When the text should be cleared, if ever
    expires_at: Option<Instant>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Show `text` as of `now`, clearing it after `clear_after` if given
    pub fn set_at(&mut self, text: &str, clear_after: Option<Duration>, now: Instant) {
        self.text = text.to_string();
        self.expires_at = clear_after.map(|d| now + d);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.expires_at = None;
    }

    /// Clear the text if its deadline has passed; returns whether it changed
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(at) if now >= at => {
                self.clear();
                true
            }
            _ => false,
        }
    }
}

impl StatusSink for StatusLine {
    fn set_status(&mut self, text: &str, clear_after: Option<Duration>) {
        self.set_at(text, clear_after, Instant::now());
    }
}
