//! Errors reported while resolving action names and parsing key specs

use thiserror::Error;

/// A problem with a single binding or action definition.
///
/// None of these abort a keymap build: the offending entry is dropped and
/// the error is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    /// No built-in, dynamic pattern, or combo definition matches the name.
    #[error("could not resolve {0}: no such action")]
    UnresolvableName(String),
    /// Combo expansion nested too deeply (usually a cycle).
    #[error("could not resolve {0}: deep recursion")]
    RecursionLimitExceeded(String),
    /// A key spec string could not be parsed into chords.
    #[error("unknown key {spec}: {reason}")]
    InvalidKeySequenceSyntax { spec: String, reason: String },
    /// The numeric suffix of a dynamic action name is not an integer.
    #[error("could not resolve {name}: invalid parameter: {reason}")]
    InvalidDynamicParameter { name: String, reason: String },
}

impl KeymapError {
    pub(crate) fn syntax(spec: &str, reason: impl Into<String>) -> Self {
        KeymapError::InvalidKeySequenceSyntax {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }
}
