use crate::error::{ClassdeskError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_LINE_WIDTH: usize = 80;
const MIN_LINE_WIDTH: usize = 40;

pub const KEYS: &[&str] = &["confirm-delete", "line-width"];

/// Configuration for classdesk, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassdeskConfig {
    /// Ask before deleting a student unless `--yes` is given
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,

    /// Width of the student table
    #[serde(default = "default_line_width")]
    pub line_width: usize,
}

fn default_confirm_delete() -> bool {
    true
}

fn default_line_width() -> usize {
    DEFAULT_LINE_WIDTH
}

impl Default for ClassdeskConfig {
    fn default() -> Self {
        Self {
            confirm_delete: default_confirm_delete(),
            line_width: default_line_width(),
        }
    }
}

impl ClassdeskConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ClassdeskError::Io)?;
        let config: ClassdeskConfig =
            serde_json::from_str(&content).map_err(ClassdeskError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ClassdeskError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ClassdeskError::Serialization)?;
        fs::write(config_path, content).map_err(ClassdeskError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "confirm-delete" => Some(self.confirm_delete.to_string()),
            "line-width" => Some(self.line_width.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "confirm-delete" => {
                self.confirm_delete = match value {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    _ => return Err(format!("Invalid value for confirm-delete: {}", value)),
                };
            }
            "line-width" => {
                let width: usize = value
                    .parse()
                    .map_err(|_| format!("Invalid value for line-width: {}", value))?;
                if width < MIN_LINE_WIDTH {
                    return Err(format!("line-width must be at least {}", MIN_LINE_WIDTH));
                }
                self.line_width = width;
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ClassdeskConfig::default();
        assert!(config.confirm_delete);
        assert_eq!(config.line_width, 80);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = ClassdeskConfig::load(temp.path().join("missing")).unwrap();
        assert_eq!(config, ClassdeskConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let mut config = ClassdeskConfig::default();
        config.set("confirm-delete", "off").unwrap();
        config.set("line-width", "120").unwrap();
        config.save(temp.path()).unwrap();

        let loaded = ClassdeskConfig::load(temp.path()).unwrap();
        assert!(!loaded.confirm_delete);
        assert_eq!(loaded.line_width, 120);
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"line_width": 100}"#).unwrap();
        let loaded = ClassdeskConfig::load(temp.path()).unwrap();
        assert!(loaded.confirm_delete);
        assert_eq!(loaded.line_width, 100);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = ClassdeskConfig::default();
        assert!(config.set("line-width", "10").is_err());
        assert!(config.set("line-width", "wide").is_err());
        assert!(config.set("confirm-delete", "maybe").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, ClassdeskConfig::default());
    }

    #[test]
    fn test_get_known_keys() {
        let config = ClassdeskConfig::default();
        for key in KEYS {
            assert!(config.get(key).is_some());
        }
        assert_eq!(config.get("nope"), None);
    }
}
