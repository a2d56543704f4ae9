//! Screen regions
//!
//! The same layout drives drawing and mouse hit-testing, so a click always
//! lands on what was drawn under it.

use crate::app::App;
use crate::types::ViewKey;
use crate::ui::widgets::{centered_rect, wrapped_height};
use ratatui::layout::{Constraint, Layout, Position, Rect};

/// Nav buttons in the order they appear on the bar
pub const NAV_ORDER: [ViewKey; 3] = [ViewKey::Modes, ViewKey::Home, ViewKey::Settings];

const NAV_BUTTON_WIDTH: u16 = 14;
const NAV_BUTTON_GAP: u16 = 2;
const NAV_HEIGHT: u16 = 3;
const INTRO_MAX_BODY_ROWS: u16 = 3;
const PANEL_WIDTH: u16 = 64;
const PANEL_HEIGHT: u16 = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellLayout {
    pub top_rail: Rect,
    pub intro: Rect,
    pub content: Rect,
    pub nav: Rect,
    pub status: Rect,
    pub nav_buttons: [(ViewKey, Rect); 3],
    pub support_button: Rect,
    pub overlay_panel: Rect,
    pub overlay_close: Rect,
}

impl ShellLayout {
    pub fn new(area: Rect, app: &App) -> Self {
        let intro = &app.view.intro;
        let intro_height = if intro.visible {
            // Title row, wrapped body, bottom border
            let body = wrapped_height(&intro.body, area.width.saturating_sub(4));
            2 + body.min(INTRO_MAX_BODY_ROWS)
        } else {
            0
        };
        let nav_height = if app.nav_hidden() { 0 } else { NAV_HEIGHT };

        let rows = Layout::vertical([
            Constraint::Length(1),            // Top rail
            Constraint::Length(intro_height), // Intro panel
            Constraint::Min(1),               // View container
            Constraint::Length(nav_height),   // Nav bar
            Constraint::Length(1),            // Status line
        ])
        .split(area);

        let nav = rows[3];
        let button_row = nav.y + nav.height.min(1);
        let total = NAV_BUTTON_WIDTH * 3 + NAV_BUTTON_GAP * 2;
        let start = nav.x + nav.width.saturating_sub(total) / 2;
        let button = |i: u16| Rect {
            x: start + i * (NAV_BUTTON_WIDTH + NAV_BUTTON_GAP),
            y: button_row,
            width: NAV_BUTTON_WIDTH,
            height: nav.height.min(1),
        }
        .intersection(nav);

        let support_width = app.support_label.chars().count() as u16 + 4;
        let support_button = Rect {
            x: (nav.x + nav.width).saturating_sub(support_width + 1),
            y: button_row,
            width: support_width,
            height: nav.height.min(1),
        }
        .intersection(nav);

        let overlay_panel = centered_rect(PANEL_WIDTH, PANEL_HEIGHT, area);
        let overlay_close = Rect {
            x: (overlay_panel.x + overlay_panel.width).saturating_sub(5),
            y: overlay_panel.y,
            width: 3,
            height: overlay_panel.height.min(1),
        }
        .intersection(overlay_panel);

        Self {
            top_rail: rows[0],
            intro: rows[1],
            content: rows[2],
            nav,
            status: rows[4],
            nav_buttons: [
                (NAV_ORDER[0], button(0)),
                (NAV_ORDER[1], button(1)),
                (NAV_ORDER[2], button(2)),
            ],
            support_button,
            overlay_panel,
            overlay_close,
        }
    }

    /// Nav button under a screen position
    pub fn nav_button_at(&self, pos: Position) -> Option<ViewKey> {
        self.nav_buttons
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(key, _)| *key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_regions_stack_vertically() {
        let app = App::new(Config::default());
        let area = Rect::new(0, 0, 100, 40);
        let layout = ShellLayout::new(area, &app);

        assert_eq!(layout.top_rail.y, 0);
        assert_eq!(layout.intro.y, 1);
        assert!(layout.intro.height > 0);
        assert_eq!(layout.content.y, layout.intro.y + layout.intro.height);
        assert_eq!(layout.nav.height, 3);
        assert_eq!(layout.status.y, 39);
        assert_eq!(
            layout.content.height + layout.intro.height + layout.nav.height + 2,
            40
        );
    }

    #[test]
    fn test_nav_buttons_do_not_overlap() {
        let app = App::new(Config::default());
        let layout = ShellLayout::new(Rect::new(0, 0, 100, 40), &app);

        for (i, (key, rect)) in layout.nav_buttons.iter().enumerate() {
            assert!(rect.width > 0);
            let center = Position::new(rect.x + rect.width / 2, rect.y);
            assert_eq!(layout.nav_button_at(center), Some(*key));
            for (_, other) in layout.nav_buttons.iter().skip(i + 1) {
                assert!(!rect.intersects(*other));
            }
            assert!(!rect.intersects(layout.support_button));
        }
        assert_eq!(layout.nav_button_at(Position::new(0, 0)), None);
    }

    #[test]
    fn test_overlay_close_sits_on_panel_border() {
        let app = App::new(Config::default());
        let layout = ShellLayout::new(Rect::new(0, 0, 100, 40), &app);

        assert_eq!(layout.overlay_close.y, layout.overlay_panel.y);
        assert!(layout.overlay_panel.contains(layout.overlay_close.as_position()));
        assert_eq!(layout.overlay_close.width, 3);
    }
}
