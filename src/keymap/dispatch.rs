//! Per-keystroke dispatch with key-sequence feedback
//!
//! ```text
//! KeyChord → Dispatcher::handle() → SequenceMatcher → DispatchedAction
//! ```
//!
//! Every chord yields an action. While a sequence is being typed the
//! dispatcher returns a no-op that shows the keys so far; when it resolves
//! (or fails to) the accumulated keys are flashed briefly and the bound
//! action (or the fallback) runs.

use std::time::{Duration, Instant};

use super::action::{Action, ActionContext, Primitive};
use super::matcher::{MatchOutcome, SequenceMatcher, TrieMatcher};
use super::types::KeyChord;

/// How long a finished key sequence stays in the status line
pub const SEQUENCE_FLASH: Duration = Duration::from_millis(500);

/// Status feedback attached to a dispatched action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Leave the status line alone
    None,
    /// Keys of an unfinished sequence, shown until replaced
    Progress(String),
    /// Keys of a finished sequence, cleared after the duration
    Flash(String, Duration),
    /// Clear the status line
    Clear,
}

/// An action wrapped with the status feedback to show before it runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedAction {
    feedback: Feedback,
    action: Action,
    /// A timed-out prefix binding that runs first, with its own chord
    expired: Option<Box<(KeyChord, DispatchedAction)>>,
}

impl DispatchedAction {
    pub fn new(feedback: Feedback, action: Action) -> Self {
        Self {
            feedback,
            action,
            expired: None,
        }
    }

    /// The timed-out prefix binding carried by this dispatch, if any
    pub fn expired(&self) -> Option<(&KeyChord, &DispatchedAction)> {
        self.expired.as_deref().map(|(chord, d)| (chord, d))
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    /// The wrapped action
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Emit the feedback, then run the wrapped action
    ///
    /// A carried timed-out prefix binding is executed first.
    pub fn execute(&self, ctx: &mut dyn ActionContext, chord: &KeyChord) {
        if let Some((expired_chord, expired)) = self.expired() {
            expired.execute(ctx, expired_chord);
        }
        match &self.feedback {
            Feedback::None => {}
            Feedback::Progress(text) => ctx.set_status(text, None),
            Feedback::Flash(text, clear_after) => ctx.set_status(text, Some(*clear_after)),
            Feedback::Clear => ctx.set_status("", None),
        }
        self.action.execute(ctx, chord);
    }
}

/// Turns chords into actions using a compiled [`SequenceMatcher`]
#[derive(Debug, Clone)]
pub struct Dispatcher<M = TrieMatcher> {
    matcher: M,
    /// Display strings of the chords typed in the current sequence
    pending: Vec<String>,
    last_chord: Option<KeyChord>,
    last_key_at: Option<Instant>,
    /// Abandon a partial sequence after this long without a key
    timeout: Option<Duration>,
    /// Runs when a chord matches nothing
    fallback: Action,
    noop: Action,
}

impl<M: SequenceMatcher> Dispatcher<M> {
    /// Dispatcher over a compiled matcher, falling back to `AcceptChar`
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            pending: Vec::new(),
            last_chord: None,
            last_key_at: None,
            timeout: None,
            fallback: Action::primitive(Primitive::AcceptChar),
            noop: Action::noop(),
        }
    }

    /// Set the partial sequence timeout (builder pattern)
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the action for unmatched chords (builder pattern)
    pub fn with_fallback(mut self, fallback: Action) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Swap in a freshly compiled matcher, dropping any partial sequence
    pub fn replace_matcher(&mut self, matcher: M) -> M {
        self.clear_pending();
        std::mem::replace(&mut self.matcher, matcher)
    }

    /// Keys of the partial sequence, joined for display
    pub fn pending_display(&self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.join(" "))
        }
    }

    /// Handle one chord
    pub fn handle(&mut self, chord: KeyChord) -> DispatchedAction {
        self.handle_at(chord, Instant::now())
    }

    /// Handle one chord arriving at `now`
    ///
    /// A partial sequence that has timed out is abandoned before the chord
    /// is matched, exactly as [`expire`](Self::expire) would have done. When
    /// the abandoned keys are bound, their action rides along on the result
    /// and runs before the new chord's action.
    pub fn handle_at(&mut self, chord: KeyChord, now: Instant) -> DispatchedAction {
        let expired = self
            .expire(now)
            .filter(|(_, dispatched)| !dispatched.action().is_noop());

        let mut dispatched = self.dispatch(chord, now);
        dispatched.expired = expired.map(Box::new);
        dispatched
    }

    fn dispatch(&mut self, chord: KeyChord, now: Instant) -> DispatchedAction {
        match self.matcher.accept_key(chord) {
            MatchOutcome::Resolved(action) => {
                tracing::debug!("{} resolved to {}", chord, action);
                self.flush(chord, action)
            }
            MatchOutcome::InSequence => {
                self.pending.push(chord.display_string());
                self.last_chord = Some(chord);
                self.last_key_at = Some(now);
                let text = self.pending.join(" ");
                DispatchedAction::new(Feedback::Progress(text), self.noop.clone())
            }
            MatchOutcome::NoMatch => {
                let fallback = self.fallback.clone();
                self.flush(chord, fallback)
            }
        }
    }

    /// Abandon a partial sequence that has been idle past the timeout
    ///
    /// When the abandoned keys are themselves bound, their action is
    /// returned along with the chord that should be passed to it.
    /// Otherwise a no-op that clears the status line is returned.
    pub fn expire(&mut self, now: Instant) -> Option<(KeyChord, DispatchedAction)> {
        if !self.timed_out(now) {
            return None;
        }
        let chord = self.last_chord?;
        let text = self.pending.join(" ");
        let bound = self.matcher.cancel();
        self.clear_pending();

        let dispatched = match bound {
            Some(action) => {
                tracing::debug!("{} timed out, running {}", text, action);
                DispatchedAction::new(Feedback::Flash(text, SEQUENCE_FLASH), action)
            }
            None => {
                tracing::debug!("{} timed out", text);
                DispatchedAction::new(Feedback::Clear, self.noop.clone())
            }
        };
        Some((chord, dispatched))
    }

    fn timed_out(&self, now: Instant) -> bool {
        match (self.timeout, self.last_key_at) {
            (Some(timeout), Some(at)) if self.matcher.is_pending() => {
                now.saturating_duration_since(at) >= timeout
            }
            _ => false,
        }
    }

    fn flush(&mut self, chord: KeyChord, action: Action) -> DispatchedAction {
        self.pending.push(chord.display_string());
        let text = self.pending.join(" ");
        self.clear_pending();
        DispatchedAction::new(Feedback::Flash(text, SEQUENCE_FLASH), action)
    }

    fn clear_pending(&mut self) {
        self.pending.clear();
        self.last_chord = None;
        self.last_key_at = None;
    }
}
