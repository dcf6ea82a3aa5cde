//! User settings for create-sparc.
//! Settings are read from a JSON or YAML file; keys missing from the file keep
//! their default values.

use crate::constants::{DEFAULT_TEMPLATE, DEFAULT_TEMPLATES_DIR, SETTINGS_DIR, SETTINGS_FILE};
use crate::error::{Error, Result};
use crate::fs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root directory holding one subdirectory per template.
    pub templates_dir: PathBuf,
    /// Template used when `init` is not given one.
    pub default_template: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            default_template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

/// Location of the per-user settings file, if a home directory is known.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

impl Settings {
    /// Parses settings content. JSON is tried first, then YAML.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the content is neither
    pub fn parse(content: &str) -> Result<Self> {
        match serde_json::from_str(content) {
            Ok(settings) => Ok(settings),
            Err(_) => serde_yaml::from_str(content)
                .map_err(|e| Error::ConfigError(format!("Invalid settings format: {e}"))),
        }
    }

    /// Loads settings from `path`, or from the per-user file when `path` is `None`.
    ///
    /// An explicitly given file must exist; a missing per-user file simply
    /// yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) if !fs::is_file(path) => {
                return Err(Error::ConfigError(format!(
                    "settings file not found: {}",
                    path.display()
                )))
            }
            Some(path) => path.to_path_buf(),
            None => match default_settings_path() {
                Some(path) if fs::is_file(&path) => path,
                _ => {
                    debug!("No settings file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        debug!("Loading settings from {}", path.display());
        Self::parse(&fs::read_file(&path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::parse(r#"{"default_template": "sparc"}"#).unwrap();
        assert_eq!(settings.default_template, "sparc");
        assert_eq!(settings.templates_dir, PathBuf::from("templates"));
    }

    #[test]
    fn test_yaml_settings() {
        let settings = Settings::parse("templates_dir: /opt/templates\n").unwrap();
        assert_eq!(settings.templates_dir, PathBuf::from("/opt/templates"));
        assert_eq!(settings.default_template, "default");
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(Settings::parse("[unclosed"), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_load_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write_file(&path, r#"{"templates_dir": "tpl"}"#).unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();
        assert_eq!(settings.templates_dir, PathBuf::from("tpl"));

        let missing = temp_dir.path().join("missing.json");
        assert!(Settings::load(Some(missing.as_path())).is_err());
    }
}
