//! Default keybindings
//!
//! Emacs-flavoured bindings that ship with the tool. User configuration is
//! merged on top of these by [`build`](super::builder::build).

use std::collections::BTreeMap;

use super::action::{Action, Primitive};

/// Built-in key spec → primitive table
const DEFAULT_BINDINGS: &[(&str, Primitive)] = &[
    // ====================================================================
    // Session
    // ====================================================================
    ("Enter", Primitive::Finish),
    ("Esc", Primitive::Cancel),
    ("C-c", Primitive::Cancel),
    ("C-x C-s", Primitive::Finish),
    ("C-x C-c", Primitive::Cancel),
    // ====================================================================
    // Caret movement
    // ====================================================================
    ("C-f", Primitive::ForwardChar),
    ("ArrowRight", Primitive::ForwardChar),
    ("C-b", Primitive::BackwardChar),
    ("ArrowLeft", Primitive::BackwardChar),
    ("M-f", Primitive::ForwardWord),
    ("M-b", Primitive::BackwardWord),
    ("C-a", Primitive::BeginningOfLine),
    ("Home", Primitive::BeginningOfLine),
    ("C-e", Primitive::EndOfLine),
    ("End", Primitive::EndOfLine),
    // ====================================================================
    // Deletion
    // ====================================================================
    ("C-d", Primitive::DeleteForwardChar),
    ("Del", Primitive::DeleteForwardChar),
    ("BS", Primitive::DeleteBackwardChar),
    ("C-h", Primitive::DeleteBackwardChar),
    ("C-w", Primitive::DeleteBackwardWord),
    ("C-u", Primitive::KillBeginningOfLine),
    ("C-k", Primitive::KillEndOfLine),
    // ====================================================================
    // Selection
    // ====================================================================
    ("C-p", Primitive::SelectUp),
    ("ArrowUp", Primitive::SelectUp),
    ("C-n", Primitive::SelectDown),
    ("ArrowDown", Primitive::SelectDown),
    ("PgUp", Primitive::ScrollPageUp),
    ("M-v", Primitive::ScrollPageUp),
    ("PgDn", Primitive::ScrollPageDown),
    ("C-v", Primitive::ScrollPageDown),
    ("C-Space", Primitive::ToggleSelectionAndSelectNext),
    ("M-Space", Primitive::ToggleSelection),
];

/// Default key spec → action table
pub fn default_bindings() -> BTreeMap<String, Action> {
    DEFAULT_BINDINGS
        .iter()
        .map(|&(spec, primitive)| (spec.to_string(), Action::primitive(primitive)))
        .collect()
}
