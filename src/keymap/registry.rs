//! Name → action registry and the recursive action name resolver

use std::collections::HashMap;

use super::action::{Action, Primitive};
use super::config::ComboConfig;
use super::error::KeymapError;

/// Combo expansion deeper than this is treated as a cycle
pub const MAX_RESOLVE_DEPTH: usize = 100;

/// Names `Finish<N>` resolve to an action exiting with status N
pub const FINISH_PREFIX: &str = "Finish";

/// Maps action names to resolved actions
///
/// Seeded with every [`Primitive`]; combo and dynamic actions are added as
/// they are resolved and then stay cached for the registry's lifetime.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    actions: HashMap<String, Action>,
}

impl ActionRegistry {
    /// Registry holding all built-in primitives
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for &p in Primitive::ALL {
            registry.register(p.name(), Action::primitive(p));
        }
        registry
    }

    /// Registry with no actions at all
    pub fn empty() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Look up an already registered action
    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Register `action` under `name` unless the name is taken
    ///
    /// Returns the action now registered under `name`, which is the existing
    /// one if there was one.
    pub fn register(&mut self, name: impl Into<String>, action: Action) -> Action {
        self.actions.entry(name.into()).or_insert(action).clone()
    }

    /// Resolve `name` against this registry and the given combo definitions
    pub fn resolve(&mut self, name: &str, combos: &ComboConfig) -> Result<Action, KeymapError> {
        Resolver::new(self, combos).resolve(name, 0)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves action names, expanding combos and dynamic actions
pub struct Resolver<'a> {
    registry: &'a mut ActionRegistry,
    combos: &'a ComboConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a mut ActionRegistry, combos: &'a ComboConfig) -> Self {
        Self { registry, combos }
    }

    /// Resolve `name` at the given combo nesting depth
    ///
    /// Only successful resolutions are registered.
    pub fn resolve(&mut self, name: &str, depth: usize) -> Result<Action, KeymapError> {
        if depth >= MAX_RESOLVE_DEPTH {
            return Err(KeymapError::RecursionLimitExceeded(name.to_string()));
        }

        if let Some(action) = self.registry.get(name) {
            return Ok(action.clone());
        }

        if let Some(param) = name.strip_prefix(FINISH_PREFIX) {
            match param.parse::<i32>() {
                Ok(code) => {
                    tracing::debug!("Created dynamic action {} (exit status {})", name, code);
                    return Ok(self.registry.register(name, Action::finish_with(code)));
                }
                // A combo may legitimately share the prefix
                Err(e) if !self.combos.contains_key(name) => {
                    return Err(KeymapError::InvalidDynamicParameter {
                        name: name.to_string(),
                        reason: e.to_string(),
                    });
                }
                Err(_) => {}
            }
        }

        let combos = self.combos;
        let Some(child_names) = combos.get(name) else {
            return Err(KeymapError::UnresolvableName(name.to_string()));
        };

        let children = child_names
            .iter()
            .map(|child| self.resolve(child, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "Resolved combo action {} ({} children)",
            name,
            children.len()
        );
        Ok(self.registry.register(name, Action::combo(name, children)))
    }
}
