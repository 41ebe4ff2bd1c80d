//! Configurable key sequence mapping
//!
//! This module provides a data-driven keybinding engine that:
//! - Resolves symbolic action names to executable actions, including
//!   user-defined combos and dynamic `Finish<N>` actions
//! - Merges user bindings (YAML) over built-in defaults, with `"-"` deleting
//!   a default
//! - Matches multi-key sequences such as `C-x C-s` one chord at a time
//! - Wraps every dispatched action with status-line feedback for the keys
//!   typed so far
//!
//! # Architecture
//!
//! ```text
//! crossterm::KeyEvent → KeyChord → Dispatcher::handle() → DispatchedAction
//!                                        │
//!                                  TrieMatcher ◄── EffectiveBindings ◄── build()
//! ```
//!
//! # Building a keymap
//!
//! ```ignore
//! let config = parse_keymap_yaml(yaml)?;
//! let keymap = Keymap::new(config, FailedOverride::Drop);
//! for problem in keymap.errors() {
//!     eprintln!("{problem}");
//! }
//! let mut dispatcher = keymap.dispatcher();
//! let dispatched = dispatcher.handle(chord);
//! dispatched.execute(&mut host, &chord);
//! ```

mod action;
mod builder;
mod config;
mod crossterm_adapter;
mod defaults;
mod dispatch;
mod error;
#[allow(clippy::module_inception)]
mod keymap;
mod matcher;
mod registry;
mod sequence;
mod types;

pub use action::{Action, ActionContext, ActionKind, Primitive, StatusSink};
pub use builder::{build, Binding, BuildReport, EffectiveBindings, FailedOverride};
pub use config::{
    load_keymap_file, parse_keymap_yaml, BindingConfig, ComboConfig, ConfigError, KeymapConfig,
    DELETE_SENTINEL,
};
pub use crossterm_adapter::chord_from_crossterm;
pub use defaults::default_bindings;
pub use dispatch::{DispatchedAction, Dispatcher, Feedback, SEQUENCE_FLASH};
pub use error::KeymapError;
pub use keymap::Keymap;
pub use matcher::{MatchOutcome, SequenceMatcher, TrieMatcher};
pub use registry::{ActionRegistry, Resolver, FINISH_PREFIX, MAX_RESOLVE_DEPTH};
pub use sequence::{parse_key_sequence, KeySequence};
pub use types::{KeyChord, KeyCode, Modifiers};
