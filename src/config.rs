//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rscat/rscat.toml`
//! 3. Environment variables: `RSCAT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, OverlayMode};
use crate::domain::{LocaleId, DEFAULT_LOCALE};

/// Unified configuration for rscat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Default catalog file, used when no --data flag is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    /// Active locale applied when no --locale flag is given (0 = default)
    pub locale: LocaleId,
    /// Storage-scope restriction: comma-joined pid list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Duplicate-occurrence behavior of the locale overlay
    pub overlay_mode: OverlayMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: None,
            locale: DEFAULT_LOCALE,
            scope: None,
            overlay_mode: OverlayMode::default(),
        }
    }
}

/// Raw settings for intermediate parsing (all fields Option to detect
/// "not specified" during merging).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog: Option<PathBuf>,
    pub locale: Option<LocaleId>,
    pub scope: Option<String>,
    pub overlay_mode: Option<OverlayMode>,
}

/// Get the XDG config directory for rscat.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rscat").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rscat.toml"))
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
    /// Expand shell variables and tilde in path-like fields.
    ///
    /// Handles `~`, `$VAR`, and `${VAR}` syntax.
    fn expand_paths(&mut self) {
        if let Some(catalog) = &self.catalog {
            let expanded = shellexpand::full(catalog.to_string_lossy().as_ref())
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| catalog.to_string_lossy().into_owned());
            self.catalog = Some(PathBuf::from(expanded));
        }
    }

    /// Merge overlay config onto self (base): overlay wins if Some.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog: overlay.catalog.clone().or_else(|| self.catalog.clone()),
            locale: overlay.locale.unwrap_or(self.locale),
            scope: overlay.scope.clone().or_else(|| self.scope.clone()),
            overlay_mode: overlay.overlay_mode.unwrap_or(self.overlay_mode),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/rscat/rscat.toml`
    /// 3. Environment variables: `RSCAT_*` prefix (explicit override)
    pub fn load() -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply RSCAT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder =
            Config::builder().add_source(Environment::with_prefix("RSCAT").separator("__"));
        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("catalog") {
            settings.catalog = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("locale") {
            settings.locale = val.parse().map_err(|_| ApplicationError::Config {
                message: format!("invalid RSCAT_LOCALE: {val}"),
            })?;
        }
        if let Ok(val) = config.get_string("scope") {
            settings.scope = Some(val);
        }
        if let Ok(val) = config.get_string("overlay_mode") {
            settings.overlay_mode =
                OverlayMode::parse(&val).ok_or_else(|| ApplicationError::Config {
                    message: format!("invalid RSCAT_OVERLAY_MODE: {val}"),
                })?;
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
        r#"# rscat configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/rscat/rscat.toml
#   Env:    RSCAT_* environment variables (explicit overrides)

# Default category catalog (TOML with [[category]] tables)
# catalog = "~/categories.toml"

# Active locale id when no --locale flag is given (0 = default locale)
# locale = 0

# Storage-scope restriction: comma-joined pid list
# scope = "1,2"

# Locale overlay behavior for duplicate ids in an id list:
#   "first-occurrence" (historical) or "all-occurrences"
# overlay_mode = "first-occurrence"
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
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load().expect("load defaults");
        assert_eq!(settings.locale, DEFAULT_LOCALE);
        assert_eq!(settings.overlay_mode, OverlayMode::FirstOccurrence);
    }

    #[test]
    fn given_tilde_in_catalog_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            catalog: Some(PathBuf::from("~/categories.toml")),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let catalog = settings.catalog.expect("catalog set");
        assert!(
            catalog.to_string_lossy().starts_with(&home),
            "catalog should start with home dir: {}",
            catalog.display()
        );
    }

    #[test]
    fn given_raw_overlay_when_merging_then_overlay_wins() {
        let base = Settings::default();
        let raw = RawSettings {
            catalog: Some(PathBuf::from("cats.toml")),
            locale: Some(3),
            scope: None,
            overlay_mode: Some(OverlayMode::AllOccurrences),
        };

        let merged = base.merge_with(&raw);

        assert_eq!(merged.catalog, Some(PathBuf::from("cats.toml")));
        assert_eq!(merged.locale, 3);
        assert_eq!(merged.scope, None);
        assert_eq!(merged.overlay_mode, OverlayMode::AllOccurrences);
    }

    #[test]
    fn given_settings_when_serializing_then_roundtrips() {
        let settings = Settings {
            catalog: Some(PathBuf::from("cats.toml")),
            locale: 2,
            scope: Some("1,5".to_string()),
            overlay_mode: OverlayMode::AllOccurrences,
        };

        let toml_str = settings.to_toml().expect("serialize");
        let parsed: Settings = toml::from_str(&toml_str).expect("parse back");
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_generated_then_mentions_all_keys() {
        let template = Settings::template();
        for key in ["catalog", "locale", "scope", "overlay_mode"] {
            assert!(template.contains(key), "template should mention {key}");
        }
    }
}
