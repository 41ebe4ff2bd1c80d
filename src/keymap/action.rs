//! Executable actions bound to key sequences
//!
//! An [`Action`] is a cheap, shareable handle around one of three kinds:
//! a built-in [`Primitive`], a named combo running several actions in order,
//! or a dynamic `Finish(code)` action created on demand by the resolver.
//! Behaviour of primitives is supplied by the host through [`ActionContext`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use super::types::KeyChord;

/// Where key-sequence feedback and other status text goes
pub trait StatusSink {
    /// Show `text`; with `clear_after` the text is cleared once it elapses
    fn set_status(&mut self, text: &str, clear_after: Option<Duration>);
}

/// The host application, as seen by actions
pub trait ActionContext: StatusSink {
    /// Run a built-in behaviour for the triggering chord
    fn perform(&mut self, primitive: Primitive, chord: &KeyChord);

    /// Finish the session with the given exit status
    fn finish(&mut self, code: i32);
}

/// Built-in behaviours that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    // ========================================================================
    // Special
    // ========================================================================
    /// Do nothing
    Noop,
    /// Insert the typed character into the query
    AcceptChar,

    // ========================================================================
    // Session
    // ========================================================================
    /// Accept the current selection and exit successfully
    Finish,
    /// Abort without a selection
    Cancel,

    // ========================================================================
    // Query editing
    // ========================================================================
    /// Move caret right one character
    ForwardChar,
    /// Move caret left one character
    BackwardChar,
    /// Move caret right by word
    ForwardWord,
    /// Move caret left by word
    BackwardWord,
    /// Move caret to start of query
    BeginningOfLine,
    /// Move caret to end of query
    EndOfLine,
    /// Delete character at caret
    DeleteForwardChar,
    /// Delete character before caret
    DeleteBackwardChar,
    /// Delete word before caret
    DeleteBackwardWord,
    /// Delete from start of query to caret
    KillBeginningOfLine,
    /// Delete from caret to end of query
    KillEndOfLine,

    // ========================================================================
    // Selection
    // ========================================================================
    /// Move selection up one candidate
    SelectUp,
    /// Move selection down one candidate
    SelectDown,
    /// Move selection up one page
    ScrollPageUp,
    /// Move selection down one page
    ScrollPageDown,
    /// Toggle the mark on the selected candidate
    ToggleSelection,
    /// Toggle the mark, then move down
    ToggleSelectionAndSelectNext,
}

impl Primitive {
    /// Every primitive, in registration order
    pub const ALL: &'static [Primitive] = &[
        Primitive::Noop,
        Primitive::AcceptChar,
        Primitive::Finish,
        Primitive::Cancel,
        Primitive::ForwardChar,
        Primitive::BackwardChar,
        Primitive::ForwardWord,
        Primitive::BackwardWord,
        Primitive::BeginningOfLine,
        Primitive::EndOfLine,
        Primitive::DeleteForwardChar,
        Primitive::DeleteBackwardChar,
        Primitive::DeleteBackwardWord,
        Primitive::KillBeginningOfLine,
        Primitive::KillEndOfLine,
        Primitive::SelectUp,
        Primitive::SelectDown,
        Primitive::ScrollPageUp,
        Primitive::ScrollPageDown,
        Primitive::ToggleSelection,
        Primitive::ToggleSelectionAndSelectNext,
    ];

    /// The name this primitive is registered under
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Noop => "Noop",
            Primitive::AcceptChar => "AcceptChar",
            Primitive::Finish => "Finish",
            Primitive::Cancel => "Cancel",
            Primitive::ForwardChar => "ForwardChar",
            Primitive::BackwardChar => "BackwardChar",
            Primitive::ForwardWord => "ForwardWord",
            Primitive::BackwardWord => "BackwardWord",
            Primitive::BeginningOfLine => "BeginningOfLine",
            Primitive::EndOfLine => "EndOfLine",
            Primitive::DeleteForwardChar => "DeleteForwardChar",
            Primitive::DeleteBackwardChar => "DeleteBackwardChar",
            Primitive::DeleteBackwardWord => "DeleteBackwardWord",
            Primitive::KillBeginningOfLine => "KillBeginningOfLine",
            Primitive::KillEndOfLine => "KillEndOfLine",
            Primitive::SelectUp => "SelectUp",
            Primitive::SelectDown => "SelectDown",
            Primitive::ScrollPageUp => "ScrollPageUp",
            Primitive::ScrollPageDown => "ScrollPageDown",
            Primitive::ToggleSelection => "ToggleSelection",
            Primitive::ToggleSelectionAndSelectNext => "ToggleSelectionAndSelectNext",
        }
    }
}

impl FromStr for Primitive {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Primitive::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or(())
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The variants an [`Action`] can take
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Built-in behaviour
    Primitive(Primitive),
    /// Named sequence of actions executed in order for one event
    Combo { name: String, children: Vec<Action> },
    /// Exit with the given status code
    Finish(i32),
}

/// A resolved, executable action
///
/// Cloning shares the underlying value. Equality compares content;
/// use [`Action::ptr_eq`] to check for the same cached instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action(Arc<ActionKind>);

impl Action {
    pub fn primitive(primitive: Primitive) -> Self {
        Action(Arc::new(ActionKind::Primitive(primitive)))
    }

    pub fn combo(name: impl Into<String>, children: Vec<Action>) -> Self {
        Action(Arc::new(ActionKind::Combo {
            name: name.into(),
            children,
        }))
    }

    pub fn finish_with(code: i32) -> Self {
        Action(Arc::new(ActionKind::Finish(code)))
    }

    pub fn noop() -> Self {
        Self::primitive(Primitive::Noop)
    }

    pub fn kind(&self) -> &ActionKind {
        &self.0
    }

    /// Whether both handles point at the same instance
    pub fn ptr_eq(&self, other: &Action) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn is_noop(&self) -> bool {
        matches!(*self.0, ActionKind::Primitive(Primitive::Noop))
    }

    /// Display name of this action
    pub fn name(&self) -> String {
        match &*self.0 {
            ActionKind::Primitive(p) => p.name().to_string(),
            ActionKind::Combo { name, .. } => name.clone(),
            ActionKind::Finish(code) => format!("{}{}", Primitive::Finish.name(), code),
        }
    }

    /// Run this action against the context for one triggering chord
    pub fn execute(&self, ctx: &mut dyn ActionContext, chord: &KeyChord) {
        match &*self.0 {
            ActionKind::Primitive(Primitive::Noop) => {}
            ActionKind::Primitive(p) => ctx.perform(*p, chord),
            ActionKind::Combo { children, .. } => {
                for child in children {
                    child.execute(ctx, chord);
                }
            }
            ActionKind::Finish(code) => ctx.finish(*code),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}


#[cfg(test)]
mod tests {
    use super::recording::{Event, Recorder};
    use super::*;

    #[test]
    fn test_primitive_names_round_trip() {
        for p in Primitive::ALL {
            assert_eq!(Primitive::from_str(p.name()), Ok(*p));
        }
        assert_eq!(Primitive::from_str("NoSuchThing"), Err(()));
    }

    #[test]
    fn test_combo_executes_children_in_order() {
        let combo = Action::combo(
            "SelectTwoDown",
            vec![
                Action::primitive(Primitive::SelectDown),
                Action::noop(),
                Action::primitive(Primitive::SelectDown),
                Action::finish_with(3),
            ],
        );
        let chord = KeyChord::ctrl('n');
        let mut rec = Recorder::default();
        combo.execute(&mut rec, &chord);

        assert_eq!(
            rec.events,
            vec![
                Event::Perform(Primitive::SelectDown, chord),
                Event::Perform(Primitive::SelectDown, chord),
                Event::Finish(3),
            ]
        );
    }

    #[test]
    fn test_clone_shares_instance() {
        let a = Action::finish_with(7);
        let b = a.clone();
        let c = Action::finish_with(7);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
        assert_eq!(a, c);
    }

    #[test]
    fn test_action_names() {
        assert_eq!(Action::primitive(Primitive::Cancel).name(), "Cancel");
        assert_eq!(Action::finish_with(42).name(), "Finish42");
        assert_eq!(Action::combo("Both", vec![]).name(), "Both");
    }
}
