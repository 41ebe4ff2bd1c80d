//! Merging default bindings with user configuration
//!
//! User entries either override a key (`"C-j": SelectDown`) or delete the
//! default for it (`"C-j": "-"`). Entries that fail to resolve or parse are
//! reported and left out; they never abort the build.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::config::{BindingConfig, ComboConfig, DELETE_SENTINEL};
use super::error::KeymapError;
use super::matcher::SequenceMatcher;
use super::registry::ActionRegistry;
use super::sequence::{parse_key_sequence, KeySequence};

/// What happens to a key whose user override fails to resolve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailedOverride {
    /// The key ends up unbound
    #[default]
    Drop,
    /// The key keeps its default binding, if it had one
    KeepDefault,
}

/// A binding that made it into the effective table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub sequence: KeySequence,
    pub action: Action,
}

/// Final key spec → action table
///
/// Keys are canonical specs (the display form of the parsed sequence), so
/// aliases like `PageUp` and `PgUp` name the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveBindings {
    entries: BTreeMap<String, Binding>,
}

impl EffectiveBindings {
    /// Action bound to the given key spec string, in any alias form
    pub fn get(&self, spec: &str) -> Option<&Action> {
        let sequence = parse_key_sequence(spec).ok()?;
        self.get_sequence(&sequence)
    }

    /// Action bound to the given parsed sequence
    pub fn get_sequence(&self, sequence: &KeySequence) -> Option<&Action> {
        self.entries.get(&sequence.to_string()).map(|b| &b.action)
    }

    pub fn contains(&self, spec: &str) -> bool {
        self.get(spec).is_some()
    }

    /// Bindings in canonical key spec order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.entries.iter().map(|(spec, b)| (spec.as_str(), b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the matcher's bindings with this table and compile it
    pub fn compile_into<M: SequenceMatcher>(&self, matcher: &mut M) {
        matcher.clear();
        for binding in self.entries.values() {
            matcher.add(binding.sequence.clone(), binding.action.clone());
        }
        matcher.compile();
    }
}

/// Result of a build: the table plus every problem found on the way
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub bindings: EffectiveBindings,
    pub errors: Vec<KeymapError>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Merge user bindings into the defaults
///
/// Every spec is parsed up front and keyed by its canonical form, so a user
/// entry overrides or deletes a default written with a different alias.
/// Combo and dynamic actions resolved along the way are cached in
/// `registry`.
pub fn build(
    defaults: &BTreeMap<String, Action>,
    bindings: &BindingConfig,
    combos: &ComboConfig,
    registry: &mut ActionRegistry,
    policy: FailedOverride,
) -> BuildReport {
    let mut errors = Vec::new();
    let mut table: BTreeMap<String, Binding> = BTreeMap::new();

    for (spec, action) in defaults {
        match parse_key_sequence(spec) {
            Ok(sequence) => {
                table.insert(
                    sequence.to_string(),
                    Binding {
                        sequence,
                        action: action.clone(),
                    },
                );
            }
            Err(e) => {
                tracing::warn!("Default binding skipped: {}", e);
                errors.push(e);
            }
        }
    }

    for (spec, name) in bindings {
        let sequence = match parse_key_sequence(spec) {
            Ok(sequence) => sequence,
            Err(e) => {
                tracing::warn!("{}", e);
                errors.push(e);
                continue;
            }
        };
        let key = sequence.to_string();

        if name == DELETE_SENTINEL {
            if table.remove(&key).is_some() {
                tracing::debug!("Removed binding for {}", key);
            }
            continue;
        }

        match registry.resolve(name, combos) {
            Ok(action) => {
                if key != *spec {
                    tracing::debug!("Binding {} as {}", spec, key);
                }
                table.insert(key, Binding { sequence, action });
            }
            Err(e) => {
                tracing::warn!("Binding for {} dropped: {}", spec, e);
                if policy == FailedOverride::Drop {
                    table.remove(&key);
                }
                errors.push(e);
            }
        }
    }

    tracing::info!(
        "Built keymap with {} bindings ({} problems)",
        table.len(),
        errors.len()
    );

    BuildReport {
        bindings: EffectiveBindings { entries: table },
        errors,
    }
}
