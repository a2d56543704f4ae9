//! View content
//!
//! Every navigation throws the previous content away and rebuilds it from
//! the config and the static placeholder data. Per-view behaviour lives in
//! one table keyed by [`ViewKey`].

use crate::config::{Config, PageConfig};
use crate::types::{CardSpec, ViewKey, HUB_MODULES, MODES};
use crate::ui::widgets::{create_card, create_toggle, wrapped_height, Card, CardAction, Toggle, CARD_HEIGHT};
use ratatui::layout::Rect;

/// Trailing note of the settings view
pub const SETTINGS_NOTE: &str =
    "Edit settings in config.toml. Wire real toggles later without rewriting the engine.";

/// Content width from which cards are laid out in two columns
pub const TWO_COLUMN_WIDTH: u16 = 72;

const COLUMN_GAP: u16 = 2;

/// Per-view entry of the dispatch table
pub struct ViewSpec {
    pub subtitle: &'static str,
    pub render: fn(&Config) -> ViewBody,
}

static HOME: ViewSpec = ViewSpec {
    subtitle: "Unified hub for all fields and modules.",
    render: render_home,
};

static MODES_VIEW: ViewSpec = ViewSpec {
    subtitle: "Where state and mode logic will eventually live.",
    render: render_modes,
};

static SETTINGS: ViewSpec = ViewSpec {
    subtitle: "Adjust One OS behaviour, skins, and defaults.",
    render: render_settings,
};

/// Look up the table entry for a view
pub fn spec(key: ViewKey) -> &'static ViewSpec {
    match key {
        ViewKey::Home => &HOME,
        ViewKey::Modes => &MODES_VIEW,
        ViewKey::Settings => &SETTINGS,
    }
}

/// Optional descriptive block above the view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intro {
    pub visible: bool,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewHeader {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBody {
    CardGrid(Vec<Card>),
    Settings { toggles: Vec<Toggle>, note: String },
}

/// Everything drawn for the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub key: ViewKey,
    pub intro: Intro,
    pub header: ViewHeader,
    pub body: ViewBody,
}

/// Build the content for `key` from scratch
pub fn build(config: &Config, key: ViewKey) -> RenderedView {
    let builtin;
    let page = match config.page(key).or_else(|| config.page(ViewKey::Home)) {
        Some(page) => page,
        None => {
            tracing::debug!(view = %key, "no page config, using built-in home page");
            builtin = PageConfig::for_view(ViewKey::Home);
            &builtin
        }
    };

    let intro = if page.show_intro_panel {
        Intro {
            visible: true,
            title: page.intro_title.clone(),
            body: page.intro_body.clone(),
        }
    } else {
        Intro::default()
    };

    let title = if page.label.is_empty() {
        key.as_str().to_string()
    } else {
        page.label.clone()
    };

    let spec = spec(key);

    RenderedView {
        key,
        intro,
        header: ViewHeader {
            title,
            subtitle: spec.subtitle.to_string(),
        },
        body: (spec.render)(config),
    }
}

fn card_grid(items: &[CardSpec], button_label: &str, verb: &str) -> ViewBody {
    let cards = items
        .iter()
        .map(|item| {
            create_card(
                item.title,
                Some(item.summary),
                Some(item.meta),
                Some(button_label),
                Some(CardAction::Acknowledge(format!(
                    "Placeholder: {} {} here.",
                    verb, item.title
                ))),
            )
        })
        .collect();
    ViewBody::CardGrid(cards)
}

fn render_home(_config: &Config) -> ViewBody {
    card_grid(&HUB_MODULES, "Open", "open")
}

fn render_modes(_config: &Config) -> ViewBody {
    card_grid(&MODES, "Details", "configure")
}

fn render_settings(config: &Config) -> ViewBody {
    // Examples of where toggles will go
    let show_hub_intro = config
        .page(ViewKey::Home)
        .map(|page| page.show_intro_panel)
        .unwrap_or(false);

    ViewBody::Settings {
        toggles: vec![
            create_toggle("Show intro panel on Hub", show_hub_intro),
            create_toggle("Auto-hide nav on scroll", config.behaviour.nav_auto_hide),
            create_toggle("Guidance as default mode", true),
        ],
        note: SETTINGS_NOTE.to_string(),
    }
}

/// Where each piece of the view lands, relative to the top of the content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentLayout {
    pub header: Rect,
    pub cards: Vec<Rect>,
    pub toggles: Vec<Rect>,
    pub note: Option<Rect>,
    pub height: u16,
}

impl ContentLayout {
    /// Index of the card under a content-relative position
    pub fn card_at(&self, x: u16, y: u16) -> Option<usize> {
        self.cards
            .iter()
            .position(|rect| rect.contains((x, y).into()))
    }
}

impl RenderedView {
    /// Lay the content out for a given width
    pub fn layout(&self, width: u16) -> ContentLayout {
        let mut layout = ContentLayout {
            header: Rect::new(0, 0, width, 2),
            ..Default::default()
        };
        let mut y = 3;

        match &self.body {
            ViewBody::CardGrid(cards) => {
                let columns: u16 = if width >= TWO_COLUMN_WIDTH { 2 } else { 1 };
                let card_width = width.saturating_sub(COLUMN_GAP * (columns - 1)) / columns;

                for (i, _) in cards.iter().enumerate() {
                    let col = i as u16 % columns;
                    let row = i as u16 / columns;
                    layout.cards.push(Rect::new(
                        col * (card_width + COLUMN_GAP),
                        y + row * (CARD_HEIGHT + 1),
                        card_width,
                        CARD_HEIGHT,
                    ));
                }

                let rows = (cards.len() as u16).div_ceil(columns);
                y += rows * (CARD_HEIGHT + 1);
            }
            ViewBody::Settings { toggles, note } => {
                for _ in toggles {
                    layout.toggles.push(Rect::new(0, y, width, 1));
                    y += 1;
                }
                y += 1;

                let note_height = wrapped_height(note, width);
                layout.note = Some(Rect::new(0, y, width, note_height));
                y += note_height;
            }
        }

        layout.height = y;
        layout
    }

    pub fn cards(&self) -> &[Card] {
        match &self.body {
            ViewBody::CardGrid(cards) => cards,
            ViewBody::Settings { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_view() {
        let view = build(&Config::default(), ViewKey::Home);
        assert_eq!(view.header.title, "Hub");
        assert_eq!(view.header.subtitle, "Unified hub for all fields and modules.");
        assert!(view.intro.visible);
        assert_eq!(view.intro.title, "Hub Overview");

        let cards = view.cards();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].title, "Fieldwright");
        assert_eq!(cards[0].button_label, "Open");
        assert_eq!(cards[3].activate(), Some("Placeholder: open Farm OS here."));
    }

    #[test]
    fn test_modes_view() {
        let view = build(&Config::default(), ViewKey::Modes);
        assert_eq!(view.header.title, "Modes");
        let cards = view.cards();
        assert_eq!(cards.len(), 4);
        assert!(cards.iter().all(|card| card.button_label == "Details"));
        assert_eq!(
            cards[1].activate(),
            Some("Placeholder: configure Guidance Mode here.")
        );
    }

    #[test]
    fn test_settings_view_always_has_three_toggles_and_note() {
        let mut config = Config::default();
        config.pages.clear();
        config.behaviour.nav_auto_hide = false;

        for config in [Config::default(), config] {
            let view = build(&config, ViewKey::Settings);
            match &view.body {
                ViewBody::Settings { toggles, note } => {
                    assert_eq!(toggles.len(), 3);
                    assert_eq!(note, SETTINGS_NOTE);
                }
                other => panic!("unexpected body {:?}", other),
            }
            let layout = view.layout(80);
            assert_eq!(layout.toggles.len(), 3);
            assert!(layout.note.is_some());
        }
    }

    #[test]
    fn test_settings_toggles_reflect_config() {
        let mut config = Config::default();
        config.behaviour.nav_auto_hide = false;
        let view = build(&config, ViewKey::Settings);

        let ViewBody::Settings { toggles, .. } = &view.body else {
            panic!("expected settings body");
        };
        let states: Vec<bool> = toggles.iter().map(|t| t.is_on).collect();
        assert_eq!(states, vec![true, false, true]);
    }

    #[test]
    fn test_hidden_intro() {
        let mut config = Config::default();
        if let Some(page) = config.pages.get_mut("modes") {
            page.show_intro_panel = false;
        }
        let view = build(&config, ViewKey::Modes);
        assert!(!view.intro.visible);
        assert!(build(&config, ViewKey::Home).intro.visible);
    }

    #[test]
    fn test_missing_page_falls_back_to_home() {
        let mut config = Config::default();
        config.pages.remove("settings");
        let view = build(&config, ViewKey::Settings);

        // Home's page text, settings' own subtitle and body
        assert_eq!(view.header.title, "Hub");
        assert_eq!(view.intro.title, "Hub Overview");
        assert_eq!(view.header.subtitle, spec(ViewKey::Settings).subtitle);
        assert!(matches!(view.body, ViewBody::Settings { .. }));
    }

    #[test]
    fn test_empty_label_uses_key() {
        let mut config = Config::default();
        if let Some(page) = config.pages.get_mut("modes") {
            page.label.clear();
        }
        assert_eq!(build(&config, ViewKey::Modes).header.title, "modes");
    }

    #[test]
    fn test_grid_layout() {
        let view = build(&Config::default(), ViewKey::Home);

        let wide = view.layout(80);
        assert_eq!(wide.cards.len(), 4);
        assert_eq!(wide.cards[0].y, wide.cards[1].y);
        assert!(wide.cards[1].x > wide.cards[0].x);
        assert_eq!(wide.height, 3 + 2 * (CARD_HEIGHT + 1));

        let narrow = view.layout(40);
        assert!(narrow.cards.iter().all(|rect| rect.x == 0));
        assert_eq!(narrow.height, 3 + 4 * (CARD_HEIGHT + 1));

        assert_eq!(wide.card_at(wide.cards[3].x + 1, wide.cards[3].y + 1), Some(3));
        assert_eq!(wide.card_at(0, 0), None);
    }
}
