//! Configuration management for oneos
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/oneos/config.toml
//!
//! The configuration is the single customization point of the shell: skin
//! selection, behaviour flags, per-view texts and the support panel text.
//! It is read once at startup and never mutated while the shell runs.

use crate::types::ViewKey;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the skin used when the configured one does not exist
pub const DEFAULT_SKIN: &str = "default";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub active_skin: String,
    pub top_mode_label: String,
    pub behaviour: Behaviour,
    pub support: SupportConfig,
    pub skins: BTreeMap<String, Palette>,
    pub pages: BTreeMap<String, PageConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let skins = BTreeMap::from([
            (DEFAULT_SKIN.to_string(), Palette::default()),
            ("dusk".to_string(), Palette::dusk()),
        ]);

        let pages = ViewKey::all()
            .iter()
            .map(|key| (key.as_str().to_string(), PageConfig::for_view(*key)))
            .collect();

        Self {
            active_skin: DEFAULT_SKIN.to_string(),
            top_mode_label: "Guidance".to_string(),
            behaviour: Behaviour::default(),
            support: SupportConfig::default(),
            skins,
            pages,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("oneos");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from a file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Page configuration for a view, if the config defines one
    pub fn page(&self, key: ViewKey) -> Option<&PageConfig> {
        self.pages.get(key.as_str())
    }

    /// Names of all configured skins
    pub fn skin_names(&self) -> Vec<&str> {
        self.skins.keys().map(String::as_str).collect()
    }
}

/// Global behaviour flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Behaviour {
    /// Scrolling down hides the nav bar, scrolling up reveals it
    pub nav_auto_hide: bool,
    /// Rows to scroll before the nav bar starts reacting
    pub nav_hide_threshold: u32,
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            nav_auto_hide: true,
            nav_hide_threshold: 4,
        }
    }
}

/// Per-view configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub label: String,
    pub show_intro_panel: bool,
    pub intro_title: String,
    pub intro_body: String,
}

impl PageConfig {
    /// Built-in page texts
    pub fn for_view(key: ViewKey) -> Self {
        let (title, body) = match key {
            ViewKey::Home => (
                "Hub Overview",
                "This hub can host your fields, modules, or apps. Duplicate or remove this panel by editing [pages.home] in config.toml.",
            ),
            ViewKey::Modes => (
                "Mode Field",
                "Here you can eventually switch between Creation, Guidance, Observation and other Lucen modes.",
            ),
            ViewKey::Settings => (
                "System Settings",
                "These placeholders show where you'll surface toggles and skins. All controlled from config.toml.",
            ),
        };

        Self {
            label: key.default_label().to_string(),
            show_intro_panel: true,
            intro_title: title.to_string(),
            intro_body: body.to_string(),
        }
    }
}

/// Support / about panel text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportConfig {
    /// Label of the nav bar button ("Support", "About", "Contact", ...)
    pub label: String,
    pub title: String,
    pub body: String,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            label: "Support".to_string(),
            title: "Support / About".to_string(),
            body: "This is placeholder text for Support/About. In a real build, link this to a contact flow, onboarding, or an explainer about how this OS works.".to_string(),
        }
    }
}

/// A skin: one color string per style variable.
///
/// Values are `#rrggbb` or `rgba(r, g, b, a)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub bg: String,
    pub bg_elevated: String,
    pub bg_soft: String,
    pub accent: String,
    pub accent_soft: String,
    pub accent_strong: String,
    pub accent_muted: String,
    pub text_main: String,
    pub text_soft: String,
    pub border_soft: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bg: "#070b10".into(),
            bg_elevated: "#0d1118".into(),
            bg_soft: "#141a24".into(),
            accent: "#f4b86f".into(),
            accent_soft: "rgba(244, 184, 111, 0.18)".into(),
            accent_strong: "#ffce85".into(),
            accent_muted: "#8c6b3c".into(),
            text_main: "#f5f7fb".into(),
            text_soft: "#a7b0c8".into(),
            border_soft: "rgba(255, 255, 255, 0.06)".into(),
        }
    }
}

impl Palette {
    /// Cool cyan skin
    pub fn dusk() -> Self {
        Self {
            bg: "#05070b".into(),
            bg_elevated: "#121322".into(),
            bg_soft: "#191a2a".into(),
            accent: "#6fe4f4".into(),
            accent_soft: "rgba(111, 228, 244, 0.18)".into(),
            accent_strong: "#b5f1ff".into(),
            accent_muted: "#4b8690".into(),
            text_main: "#f6fbff".into(),
            text_soft: "#a9bbd4".into(),
            border_soft: "rgba(255, 255, 255, 0.08)".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_skin, "default");
        assert!(config.behaviour.nav_auto_hide);
        assert_eq!(config.behaviour.nav_hide_threshold, 4);
        assert_eq!(config.skin_names(), vec!["default", "dusk"]);
        for key in ViewKey::all() {
            assert!(config.page(*key).is_some());
        }
        assert_eq!(config.page(ViewKey::Home).map(|p| p.label.as_str()), Some("Hub"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.active_skin = "dusk".into();
        config.support.label = "About".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
active_skin = "dusk"

[behaviour]
nav_auto_hide = false
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.active_skin, "dusk");
        assert!(!config.behaviour.nav_auto_hide);
        assert_eq!(config.behaviour.nav_hide_threshold, 4);
        assert_eq!(config.skins.len(), 2);
        assert_eq!(config.support, SupportConfig::default());
    }

    #[test]
    fn test_pages_keyed_by_view_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[pages.modes]
label = "States"
show_intro_panel = false

[pages.lounge]
label = "Lounge"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        let modes = config.page(ViewKey::Modes).unwrap();
        assert_eq!(modes.label, "States");
        assert!(!modes.show_intro_panel);
        // A file that names its own pages replaces the built-in set
        assert!(config.page(ViewKey::Home).is_none());
        assert!(config.pages.contains_key("lounge"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "active_skin = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config"));
    }
}
