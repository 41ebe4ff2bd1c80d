//! User keymap configuration
//!
//! ```yaml
//! keymap:
//!   "C-x C-s": Finish
//!   "C-j": SelectDownAndFinish
//!   "C-g": "-"            # remove the default binding
//! action:
//!   SelectDownAndFinish: [SelectDown, Finish]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Binding value that deletes the default binding for a key
pub const DELETE_SENTINEL: &str = "-";

/// Key spec → action name (or [`DELETE_SENTINEL`])
pub type BindingConfig = BTreeMap<String, String>;

/// Combo name → names of the actions it runs, in order
pub type ComboConfig = BTreeMap<String, Vec<String>>;

/// The keymap section of a config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default)]
    pub keymap: BindingConfig,
    #[serde(default)]
    pub action: ComboConfig,
}

/// Errors that can occur when reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Parse a keymap config from a YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<KeymapConfig, ConfigError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load a keymap config from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<KeymapConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_keymap_yaml(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
keymap:
  "C-x C-s": Finish
  "C-g": "-"
action:
  DownAndFinish:
    - SelectDown
    - Finish
"#;
        let config = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(config.keymap.len(), 2);
        assert_eq!(config.keymap["C-x C-s"], "Finish");
        assert_eq!(config.keymap["C-g"], DELETE_SENTINEL);
        assert_eq!(config.action["DownAndFinish"], vec!["SelectDown", "Finish"]);
    }

    #[test]
    fn test_sections_are_optional() {
        let config = parse_keymap_yaml("keymap: {}").unwrap();
        assert!(config.keymap.is_empty());
        assert!(config.action.is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        assert!(matches!(
            parse_keymap_yaml("keymap: [not, a, map]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_keymap_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
