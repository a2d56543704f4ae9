//! Core data types for oneos
//!
//! This module defines the closed sets the shell is keyed on (views, overlays)
//! and the static placeholder content shown by the views.

use std::fmt;
use std::str::FromStr;

/// Top-level content screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ViewKey {
    #[default]
    Home,
    Modes,
    Settings,
}

impl ViewKey {
    pub fn all() -> &'static [ViewKey] {
        &[ViewKey::Home, ViewKey::Modes, ViewKey::Settings]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKey::Home => "home",
            ViewKey::Modes => "modes",
            ViewKey::Settings => "settings",
        }
    }

    /// Built-in nav label, used when the page config has none
    pub fn default_label(&self) -> &'static str {
        match self {
            ViewKey::Home => "Hub",
            ViewKey::Modes => "Modes",
            ViewKey::Settings => "Settings",
        }
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewKey::all()
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown view: {s:?}"))
    }
}

/// Modal panels that can sit above the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Modes,
    Settings,
    Support,
}

impl OverlayKind {
    pub fn all() -> &'static [OverlayKind] {
        &[OverlayKind::Modes, OverlayKind::Settings, OverlayKind::Support]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayKind::Modes => "modes",
            OverlayKind::Settings => "settings",
            OverlayKind::Support => "support",
        }
    }
}

impl FromStr for OverlayKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OverlayKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown overlay: {s:?}"))
    }
}

/// Literal input for a card
#[derive(Debug, Clone, Copy)]
pub struct CardSpec {
    pub title: &'static str,
    pub summary: &'static str,
    pub meta: &'static str,
}

/// Modules listed on the Hub
pub const HUB_MODULES: [CardSpec; 4] = [
    CardSpec {
        title: "Fieldwright",
        summary: "Your modular field OS – build, tag, and track your worlds.",
        meta: "Module • Core field engine",
    },
    CardSpec {
        title: "HelpToHeal",
        summary: "Healing tools and maps. A quieter space for tough days.",
        meta: "Module • Care & recovery",
    },
    CardSpec {
        title: "MindSetFree",
        summary: "Gentle mindset untangling and narrative rewriting.",
        meta: "Module • Inner work",
    },
    CardSpec {
        title: "Farm OS",
        summary: "Bridge between soil, sky, and system. Physical field mapper.",
        meta: "Module • Sovereign field",
    },
];

/// Modes listed on the Modes view and in the modes overlay
pub const MODES: [CardSpec; 4] = [
    CardSpec {
        title: "Creation Mode",
        summary: "You drive. All dials manual, high sensitivity, immediate feedback.",
        meta: "Manual • High agency",
    },
    CardSpec {
        title: "Guidance Mode",
        summary: "The OS breathes with you. Dials drift from pattern and reflection.",
        meta: "Default • Living state",
    },
    CardSpec {
        title: "Observation Mode",
        summary: "Stillness. Pure archival. No influence, just recording of rhythm.",
        meta: "Passive • Archive",
    },
    CardSpec {
        title: "Dream Mode",
        summary: "Sandbox where future branches and what-ifs can be explored safely.",
        meta: "Sandbox • Simulation",
    },
];
