//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/kintree/kintree.toml`
//! 3. Local config: `<dir>/.kintree.toml` (usually next to the snapshot)
//! 4. Environment variables: `KINTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// What the printable tree shows next to each member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Append the age label, e.g. "74 years (1930–2004)"
    pub show_age: bool,
    /// Show the spouse next to the member
    pub show_spouse: bool,
    /// Append free-text notes
    pub show_notes: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_age: true,
            show_spouse: true,
            show_notes: false,
        }
    }
}

/// Raw display config for intermediate parsing (`None` = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplayConfig {
    pub show_age: Option<bool>,
    pub show_spouse: Option<bool>,
    pub show_notes: Option<bool>,
}

impl DisplayConfig {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawDisplayConfig) -> Self {
        Self {
            show_age: overlay.show_age.unwrap_or(self.show_age),
            show_spouse: overlay.show_spouse.unwrap_or(self.show_spouse),
            show_notes: overlay.show_notes.unwrap_or(self.show_notes),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub cache_size: Option<usize>,
    pub default_root: Option<String>,
    #[serde(default)]
    pub display: RawDisplayConfig,
}

/// Unified configuration for kintree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Number of built trees a session keeps for cheap back-navigation (0 disables)
    pub cache_size: usize,
    /// Root used instead of the oldest member when no root is requested
    pub default_root: Option<String>,
    /// Printable tree options
    pub display: DisplayConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_size: 8,
            default_root: None,
            display: DisplayConfig::default(),
        }
    }
}

/// Get the XDG config directory for kintree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "kintree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("kintree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".kintree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base); overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            cache_size: overlay.cache_size.unwrap_or(self.cache_size),
            default_root: overlay
                .default_root
                .clone()
                .or_else(|| self.default_root.clone()),
            display: self.display.merge(&overlay.display),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.kintree.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/kintree/kintree.toml`
    /// 3. Local config: `<local_dir>/.kintree.toml`
    /// 4. Environment variables: `KINTREE_*` prefix, `__` separates sections
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply KINTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("KINTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_int("cache_size") {
            settings.cache_size = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("KINTREE_CACHE_SIZE must not be negative: {val}"),
            })?;
        }
        if let Ok(val) = config.get_string("default_root") {
            settings.default_root = Some(val).filter(|v| !v.is_empty());
        }
        if let Ok(val) = config.get_bool("display.show_age") {
            settings.display.show_age = val;
        }
        if let Ok(val) = config.get_bool("display.show_spouse") {
            settings.display.show_spouse = val;
        }
        if let Ok(val) = config.get_bool("display.show_notes") {
            settings.display.show_notes = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# kintree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/kintree/kintree.toml
#   Local:  <dir>/.kintree.toml
#   Env:    KINTREE_* environment variables (KINTREE_DISPLAY__SHOW_AGE=false)

# Trees kept per session for back-navigation (0 disables caching)
# cache_size = 8

# Member id used as root instead of the oldest member
# default_root = "42"

[display]
# show_age = true
# show_spouse = true
# show_notes = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_created_then_has_expected_values() {
        let settings = Settings::default();
        assert_eq!(settings.cache_size, 8);
        assert!(settings.default_root.is_none());
        assert!(settings.display.show_age);
        assert!(!settings.display.show_notes);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_fields_kept() {
        let base = Settings::default();
        let overlay = RawSettings {
            cache_size: Some(2),
            default_root: None,
            display: RawDisplayConfig {
                show_notes: Some(true),
                ..Default::default()
            },
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.cache_size, 2);
        assert!(result.default_root.is_none());
        assert!(result.display.show_age);
        assert!(result.display.show_notes);
    }

    #[test]
    fn given_settings_when_to_toml_then_round_trips_through_toml() {
        let settings = Settings::default();
        let text = settings.to_toml().expect("serialize");
        let parsed: Settings = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.cache_size.is_none());
    }
}
