//! Keymap: registry, configuration and effective bindings in one place

use std::collections::BTreeMap;

use super::action::Action;
use super::builder::{build, EffectiveBindings, FailedOverride};
use super::config::KeymapConfig;
use super::defaults::default_bindings;
use super::dispatch::Dispatcher;
use super::error::KeymapError;
use super::matcher::TrieMatcher;
use super::registry::ActionRegistry;

/// Owns the action registry and the bindings built from a configuration
#[derive(Debug, Clone)]
pub struct Keymap {
    registry: ActionRegistry,
    defaults: BTreeMap<String, Action>,
    config: KeymapConfig,
    policy: FailedOverride,
    bindings: EffectiveBindings,
    /// Problems found during the last build
    errors: Vec<KeymapError>,
}

impl Keymap {
    /// Build a keymap from the built-in defaults and the given config
    pub fn new(config: KeymapConfig, policy: FailedOverride) -> Self {
        Self::with_bindings(default_bindings(), config, policy)
    }

    /// Build a keymap from custom defaults and the given config
    pub fn with_bindings(
        defaults: BTreeMap<String, Action>,
        config: KeymapConfig,
        policy: FailedOverride,
    ) -> Self {
        let mut keymap = Self {
            registry: ActionRegistry::new(),
            defaults,
            config,
            policy,
            bindings: EffectiveBindings::default(),
            errors: Vec::new(),
        };
        keymap.rebuild();
        keymap
    }

    /// Built-in defaults with no user configuration
    pub fn with_defaults() -> Self {
        Self::new(KeymapConfig::default(), FailedOverride::default())
    }

    /// Rebuild the effective bindings from the current config
    ///
    /// The config is unchanged, so actions cached by earlier builds stay
    /// valid and are reused.
    pub fn rebuild(&mut self) {
        let report = build(
            &self.defaults,
            &self.config.keymap,
            &self.config.action,
            &mut self.registry,
            self.policy,
        );
        self.bindings = report.bindings;
        self.errors = report.errors;
    }

    /// Replace the config and rebuild from a fresh registry
    ///
    /// Combos cached from the old config may have been redefined, so
    /// nothing resolved under it is kept.
    pub fn reload(&mut self, config: KeymapConfig) {
        self.config = config;
        self.registry = ActionRegistry::new();
        self.rebuild();
    }

    pub fn config(&self) -> &KeymapConfig {
        &self.config
    }

    pub fn policy(&self) -> FailedOverride {
        self.policy
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn bindings(&self) -> &EffectiveBindings {
        &self.bindings
    }

    pub fn errors(&self) -> &[KeymapError] {
        &self.errors
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Resolve an action name against this keymap's combos
    pub fn resolve(&mut self, name: &str) -> Result<Action, KeymapError> {
        self.registry.resolve(name, &self.config.action)
    }

    /// A compiled matcher for the effective bindings
    pub fn matcher(&self) -> TrieMatcher {
        let mut matcher = TrieMatcher::new();
        self.bindings.compile_into(&mut matcher);
        matcher
    }

    /// A dispatcher over a freshly compiled matcher
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.matcher())
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::with_defaults()
    }
}
