//! Application state and event handling
//!
//! This is the core of oneos, managing:
//! - The current view and the nav bar's active button
//! - Overlay panels and the content scroll position
//! - Event handling (keyboard and mouse input)

use crate::config::Config;
use crate::overlay::OverlayManager;
use crate::scroll::{ScrollEvent, ScrollTracker};
use crate::types::{OverlayKind, ViewKey};
use crate::ui::layout::ShellLayout;
use crate::ui::view::{self, RenderedView};
use crate::ui::Theme;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::time::Instant;

/// Rows moved per wheel notch
const WHEEL_STEP: i32 = 3;

/// Seconds a flash message stays on screen
const FLASH_SECONDS: u64 = 3;

/// Main application state
pub struct App {
    // Core state
    pub should_quit: bool,
    pub config: Config,
    pub theme: Theme,

    // View state
    pub current_view: ViewKey,
    pub view: RenderedView,
    pub nav_active: Option<ViewKey>,

    // Top rail and support button texts
    pub mode_indicator: String,
    pub support_label: String,

    // Overlays
    pub overlays: OverlayManager,

    // Content scroll; the tracker only exists when nav auto-hide is on
    pub content_scroll: u16,
    pub scroll: Option<ScrollTracker>,

    // Keyboard focus among the view's cards
    pub card_focus: Option<usize>,

    // Last known terminal area
    pub viewport: Rect,

    // Flash message (temporary feedback)
    pub flash_message: Option<(String, bool, Instant)>, // (message, is_error, timestamp)
}

impl App {
    /// Create the shell and run every init step in order
    pub fn new(config: Config) -> Self {
        let view = view::build(&config, ViewKey::Home);

        let mut app = Self {
            should_quit: false,
            config,
            theme: Theme::default(),

            current_view: ViewKey::Home,
            view,
            nav_active: None,

            mode_indicator: String::new(),
            support_label: String::new(),

            overlays: OverlayManager::default(),

            content_scroll: 0,
            scroll: None,

            card_focus: None,
            viewport: Rect::new(0, 0, 80, 24),
            flash_message: None,
        };

        app.theme.apply_skin(&app.config);
        app.init_top_rail();
        app.update_nav_active_state();
        app.overlays.close_all();
        app.init_support_button();
        app.init_scroll_behaviour();
        app.render_view();

        tracing::info!(
            skin = %app.config.active_skin,
            auto_hide = app.scroll.is_some(),
            "shell initialized"
        );
        app
    }

    fn init_top_rail(&mut self) {
        self.mode_indicator = self.config.top_mode_label.clone();
    }

    fn init_support_button(&mut self) {
        self.support_label = if self.config.support.label.is_empty() {
            "Support".to_string()
        } else {
            self.config.support.label.clone()
        };
    }

    fn init_scroll_behaviour(&mut self) {
        self.scroll = self
            .config
            .behaviour
            .nav_auto_hide
            .then(|| ScrollTracker::new(self.config.behaviour.nav_hide_threshold, 0));
    }

    /// Switch to a view by name. Unknown names are logged and ignored.
    pub fn navigate(&mut self, key: &str) -> bool {
        match key.parse::<ViewKey>() {
            Ok(key) => self.navigate_to(key),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring navigation");
                false
            }
        }
    }

    /// Switch to a view. Views without a page in the config are ignored.
    pub fn navigate_to(&mut self, key: ViewKey) -> bool {
        if self.config.page(key).is_none() {
            tracing::warn!(view = %key, "unknown view: no page config");
            return false;
        }

        self.current_view = key;
        self.render_view();
        self.update_nav_active_state();
        tracing::debug!(view = %key, "navigated");
        true
    }

    /// A nav bar button was pressed
    pub fn press_nav(&mut self, key: ViewKey) {
        self.navigate_to(key);
        match key {
            ViewKey::Home => {}
            ViewKey::Modes => self.overlays.open(OverlayKind::Modes),
            ViewKey::Settings => self.overlays.open(OverlayKind::Settings),
        }
    }

    pub fn press_support(&mut self) {
        self.overlays.open(OverlayKind::Support);
    }

    /// Rebuild the content of the current view
    fn render_view(&mut self) {
        self.view = view::build(&self.config, self.current_view);
        self.content_scroll = 0;
        self.card_focus = None;
        if let Some(tracker) = &mut self.scroll {
            tracker.reset(0);
        }
    }

    fn update_nav_active_state(&mut self) {
        self.nav_active = crate::ui::layout::NAV_ORDER
            .iter()
            .copied()
            .find(|key| *key == self.current_view);
    }

    pub fn nav_hidden(&self) -> bool {
        self.scroll.as_ref().is_some_and(ScrollTracker::nav_hidden)
    }

    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
    }

    pub fn layout(&self) -> ShellLayout {
        ShellLayout::new(self.viewport, self)
    }

    /// Height of the rebuilt content and of the region showing it
    fn scroll_extent(&self) -> (u16, u16) {
        let content = self.layout().content;
        (self.view.layout(content.width).height, content.height)
    }

    /// Move the content to `offset` (clamped). Fires a scroll event if it moved.
    pub fn scroll_to(&mut self, offset: u16) {
        let (document, viewport) = self.scroll_extent();
        let max = document.saturating_sub(viewport);
        let offset = offset.min(max);

        if offset == self.content_scroll {
            return;
        }
        self.content_scroll = offset;

        // The nav bar's rows count as viewport, so hiding it never moves the bottom
        let nav = self.layout().nav.height;
        if let Some(tracker) = &mut self.scroll {
            tracker.on_scroll(ScrollEvent {
                offset: offset as u32,
                viewport_height: (viewport + nav) as u32,
                document_height: document as u32,
            });
        }
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let target = (self.content_scroll as i32 + delta).clamp(0, u16::MAX as i32);
        self.scroll_to(target as u16);
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.clear_expired_flash();

        if self.overlays.is_open() {
            self.handle_overlay_key(key);
        } else {
            self.handle_normal_key(key);
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('x') => self.overlays.close_all(),
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        let page = self.layout().content.height as i32;

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') | KeyCode::Char('h') => self.press_nav(ViewKey::Home),
            KeyCode::Char('2') | KeyCode::Char('m') => self.press_nav(ViewKey::Modes),
            KeyCode::Char('3') | KeyCode::Char('s') => self.press_nav(ViewKey::Settings),
            KeyCode::Char('a') => self.press_support(),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::Char('g') | KeyCode::Home => self.scroll_to(0),
            KeyCode::Char('G') | KeyCode::End => self.scroll_to(u16::MAX),
            KeyCode::Tab => self.move_card_focus(1),
            KeyCode::BackTab => self.move_card_focus(-1),
            KeyCode::Enter => {
                if let Some(index) = self.card_focus {
                    self.activate_card(index);
                }
            }
            KeyCode::Esc => self.card_focus = None,
            _ => {}
        }
    }

    fn move_card_focus(&mut self, step: isize) {
        let count = self.view.cards().len() as isize;
        if count == 0 {
            return;
        }

        let next = match self.card_focus {
            Some(index) => (index as isize + step).rem_euclid(count),
            None if step < 0 => count - 1,
            None => 0,
        } as usize;
        self.card_focus = Some(next);
        self.reveal_card(next);
    }

    /// Scroll just enough to bring a card into view
    fn reveal_card(&mut self, index: usize) {
        let content = self.layout().content;
        let Some(rect) = self.view.layout(content.width).cards.get(index).copied() else {
            return;
        };

        if rect.y < self.content_scroll {
            self.scroll_to(rect.y);
        } else if rect.y + rect.height > self.content_scroll + content.height {
            self.scroll_to((rect.y + rect.height).saturating_sub(content.height));
        }
    }

    /// Press a card's button
    pub fn activate_card(&mut self, index: usize) {
        let message = self
            .view
            .cards()
            .get(index)
            .and_then(|card| card.activate())
            .map(str::to_string);

        if let Some(message) = message {
            tracing::info!(view = %self.view.key, card = index, "card opened");
            self.show_flash(&message, false);
        }
    }

    /// Handle a mouse event
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.click(Position::new(mouse.column, mouse.row));
            }
            MouseEventKind::ScrollDown if !self.overlays.is_open() => self.scroll_by(WHEEL_STEP),
            MouseEventKind::ScrollUp if !self.overlays.is_open() => self.scroll_by(-WHEEL_STEP),
            _ => {}
        }
    }

    fn click(&mut self, pos: Position) {
        let layout = self.layout();

        // The backdrop covers everything but the panel
        if self.overlays.backdrop_visible() {
            if layout.overlay_close.contains(pos) || !layout.overlay_panel.contains(pos) {
                self.overlays.close_all();
            }
            return;
        }

        if let Some(key) = layout.nav_button_at(pos) {
            self.press_nav(key);
        } else if layout.support_button.contains(pos) {
            self.press_support();
        } else if layout.content.contains(pos) {
            let x = pos.x - layout.content.x;
            let y = pos.y - layout.content.y + self.content_scroll;
            if let Some(index) = self.view.layout(layout.content.width).card_at(x, y) {
                self.card_focus = Some(index);
                self.activate_card(index);
            }
        }
    }

    /// Drop the flash message once it has been shown long enough
    pub fn clear_expired_flash(&mut self) {
        if let Some((_, _, instant)) = &self.flash_message {
            if instant.elapsed().as_secs() >= FLASH_SECONDS {
                self.flash_message = None;
            }
        }
    }

    /// Show a flash message
    fn show_flash(&mut self, message: &str, is_error: bool) {
        self.flash_message = Some((message.into(), is_error, Instant::now()));
    }
}
