//! chordmap - key sequence bindings for terminal tools
//!
//! This crate provides a keymap engine that resolves symbolic action names
//! (built-ins, user combos and `Finish<N>`), merges user bindings over
//! defaults, matches multi-key sequences such as `C-x C-s`, and dispatches
//! each keystroke with status-line feedback. A small selection prompt shows
//! it driving a real interactive session.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod keymap;
pub mod prompt;
pub mod status;
pub mod tracing;

// Re-export commonly used types
pub use config::AppConfig;
pub use keymap::{Action, Dispatcher, KeyChord, Keymap};
pub use prompt::{Exit, Prompt};
pub use status::StatusLine;
