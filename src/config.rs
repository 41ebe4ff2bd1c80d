//! Application configuration
//!
//! Stored in `~/.config/chordmap/config.yaml`. The keymap sections
//! (`keymap`, `action`) sit at the top level next to the dispatcher
//! settings; see `keymap.yaml` in the repository for an example.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::keymap::{ConfigError, FailedOverride, Keymap, KeymapConfig};

/// Everything read from the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Key bindings and combo definitions
    #[serde(flatten)]
    pub keymap: KeymapConfig,

    /// Abandon a partial key sequence after this many milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_timeout_ms: Option<u64>,

    /// What happens to a key whose binding fails to resolve
    #[serde(default)]
    pub failed_override: FailedOverride,
}

impl AppConfig {
    /// Load config from the default location, or return defaults
    ///
    /// A missing file is normal; an unreadable or malformed one is logged.
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config from a YAML string
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty file is a valid, empty config
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn sequence_timeout(&self) -> Option<Duration> {
        self.sequence_timeout_ms.map(Duration::from_millis)
    }

    /// Build the keymap described by this config
    pub fn build_keymap(&self) -> Keymap {
        Keymap::new(self.keymap.clone(), self.failed_override)
    }
}
