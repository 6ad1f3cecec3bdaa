//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/mangosurv/mangosurv.toml`
//! 3. Local config: `<dir>/.mangosurv.toml` (farm directory)
//! 4. Environment variables: `MANGOSURV_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::CalculationMode;

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub inventory: Option<PathBuf>,
    pub mode: Option<CalculationMode>,
    pub frequency_days: Option<u32>,
}

/// Unified configuration for mangosurv.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Inventory file (default: <data dir>/mangosurv/inventory.toml)
    pub inventory: PathBuf,
    /// Location minutes calculation: detailed per-tree or quick flat-rate
    pub mode: CalculationMode,
    /// Replaces every grower's surveillance frequency when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_days: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            inventory: default_inventory_path(),
            mode: CalculationMode::default(),
            frequency_days: None,
        }
    }
}

/// Get the default inventory path.
fn default_inventory_path() -> PathBuf {
    ProjectDirs::from("", "", "mangosurv")
        .map(|dirs| dirs.data_dir().join("inventory.toml"))
        .unwrap_or_else(|| PathBuf::from("~/.mangosurv/inventory.toml"))
}

/// Get the XDG config directory for mangosurv.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mangosurv").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("mangosurv.toml"))
}

/// Get the path to the local config file in a farm directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".mangosurv.toml")
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

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.inventory.to_string_lossy().as_ref());
        self.inventory = PathBuf::from(expanded);
    }

    /// Overlay wins where it specifies a value; relative inventory paths
    /// are resolved against the directory of the file they came from.
    fn merge_with(&self, overlay: &RawSettings, base_dir: Option<&Path>) -> Self {
        let inventory = overlay
            .inventory
            .clone()
            .map(|p| match base_dir {
                Some(dir) if p.is_relative() && !p.to_string_lossy().starts_with(['~', '$']) => {
                    dir.join(p)
                }
                _ => p,
            })
            .unwrap_or_else(|| self.inventory.clone());
        Self {
            inventory,
            mode: overlay.mode.unwrap_or(self.mode),
            frequency_days: overlay.frequency_days.or(self.frequency_days),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional farm directory holding a `.mangosurv.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw, None);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw, Some(dir));
            }
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply MANGOSURV_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("MANGOSURV").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("inventory") {
            settings.inventory = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("mode") {
            settings.mode = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        match config.get::<u32>("frequency_days") {
            Ok(val) => settings.frequency_days = Some(val),
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
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
        r#"# mangosurv configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/mangosurv/mangosurv.toml
#   Local:  <farm_dir>/.mangosurv.toml
#   Env:    MANGOSURV_* environment variables

# Inventory file with growers, locations, trees and the threat catalogue.
# Relative paths in a local config resolve against the farm directory.
# inventory = "~/farm/inventory.toml"

# Location minutes: "detailed" (per-tree model) or "quick" (6 min per tree)
# mode = "detailed"

# Override every grower's surveillance interval (days)
# frequency_days = 14
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
    fn given_no_config_when_defaulting_then_detailed_mode_and_inventory_file() {
        let settings = Settings::default();
        assert_eq!(settings.mode, CalculationMode::Detailed);
        assert!(settings.inventory.ends_with("inventory.toml"));
        assert_eq!(settings.frequency_days, None);
    }

    #[test]
    fn given_overlay_when_merging_then_overlay_wins_where_set() {
        let base = Settings {
            inventory: PathBuf::from("/srv/farm/inventory.toml"),
            mode: CalculationMode::Detailed,
            frequency_days: Some(7),
        };
        let overlay = RawSettings {
            inventory: None,
            mode: Some(CalculationMode::Quick),
            frequency_days: None,
        };

        let merged = base.merge_with(&overlay, None);

        assert_eq!(merged.inventory, PathBuf::from("/srv/farm/inventory.toml"));
        assert_eq!(merged.mode, CalculationMode::Quick);
        assert_eq!(merged.frequency_days, Some(7));
    }

    #[test]
    fn given_relative_inventory_in_local_config_when_merging_then_resolves_against_dir() {
        let overlay = RawSettings {
            inventory: Some(PathBuf::from("data/inventory.toml")),
            ..RawSettings::default()
        };

        let merged = Settings::default().merge_with(&overlay, Some(Path::new("/srv/farm")));

        assert_eq!(merged.inventory, PathBuf::from("/srv/farm/data/inventory.toml"));
    }

    #[test]
    fn given_tilde_in_inventory_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            inventory: PathBuf::from("~/farm/inventory.toml"),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(settings.inventory.to_string_lossy().starts_with(&home));
    }

    #[test]
    fn given_settings_when_to_toml_then_round_trips_mode() {
        let settings = Settings {
            inventory: PathBuf::from("/tmp/inventory.toml"),
            mode: CalculationMode::Quick,
            frequency_days: Some(10),
        };
        let rendered = settings.to_toml().unwrap();
        assert!(rendered.contains(r#"mode = "quick""#));
        assert!(rendered.contains("frequency_days = 10"));
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.inventory.is_none());
        assert!(raw.mode.is_none());
    }
}
