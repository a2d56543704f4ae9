//! Reusable UI widgets
//!
//! Contains the building blocks shared by views and overlays:
//! - Cards and toggles (stateless factories + ratatui widgets)
//! - Overlay panels and the backdrop
//! - Flash message and status bar

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

/// Rows taken by a card, borders included
pub const CARD_HEIGHT: u16 = 7;

/// What a card's button does when pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    /// Show a placeholder acknowledgment
    Acknowledge(String),
}

/// A tile for modules, fields or apps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub summary: Option<String>,
    pub meta: Option<String>,
    pub button_label: String,
    pub on_open: Option<CardAction>,
}

impl Card {
    /// Press the card's button. Returns the acknowledgment to show, if any.
    pub fn activate(&self) -> Option<&str> {
        match &self.on_open {
            Some(CardAction::Acknowledge(message)) => Some(message),
            None => None,
        }
    }
}

/// Build a card. Empty summary/meta lines are left out, the button label defaults to "Open".
pub fn create_card(
    title: &str,
    summary: Option<&str>,
    meta: Option<&str>,
    button_label: Option<&str>,
    on_open: Option<CardAction>,
) -> Card {
    let present = |s: Option<&str>| s.filter(|s| !s.is_empty()).map(str::to_string);

    Card {
        title: title.to_string(),
        summary: present(summary),
        meta: present(meta),
        button_label: button_label
            .filter(|label| !label.is_empty())
            .unwrap_or("Open")
            .to_string(),
        on_open,
    }
}

/// A purely visual on/off pill. Nothing is wired to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub label: String,
    pub is_on: bool,
}

pub fn create_toggle(label: &str, is_on: bool) -> Toggle {
    Toggle {
        label: label.to_string(),
        is_on,
    }
}

impl Toggle {
    /// The pill drawn at the right end of the row
    pub fn pill(&self) -> &'static str {
        if self.is_on {
            "(   ●)"
        } else {
            "(●   )"
        }
    }
}

/// Renders a [`Card`] with the theme
pub struct CardWidget<'a> {
    pub card: &'a Card,
    pub theme: &'a Theme,
    pub focused: bool,
}

impl Widget for CardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if self.focused {
                theme.border_focused()
            } else {
                theme.border()
            })
            .style(theme.elevated());

        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Length(2), // Summary
            Constraint::Length(1), // Meta
            Constraint::Length(1), // Button
        ])
        .split(inner);

        Paragraph::new(self.card.title.as_str())
            .style(theme.elevated().fg(theme.text_main).add_modifier(Modifier::BOLD))
            .render(rows[0], buf);

        if let Some(summary) = &self.card.summary {
            Paragraph::new(summary.as_str())
                .style(theme.elevated().fg(theme.text_soft))
                .wrap(Wrap { trim: true })
                .render(rows[1], buf);
        }

        if let Some(meta) = &self.card.meta {
            Paragraph::new(meta.as_str())
                .style(theme.elevated().fg(theme.accent_muted))
                .render(rows[2], buf);
        }

        let button_style = if self.focused {
            theme.nav_active()
        } else {
            theme.button()
        };
        Paragraph::new(Line::from(Span::styled(
            format!(" {} ", self.card.button_label),
            button_style,
        )))
        .render(rows[3], buf);
    }
}

/// Renders a [`Toggle`] row: label on the left, pill on the right
pub struct ToggleWidget<'a> {
    pub toggle: &'a Toggle,
    pub theme: &'a Theme,
}

impl Widget for ToggleWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let pill_style = if self.toggle.is_on {
            Style::default().fg(theme.accent_strong).bg(theme.accent_soft)
        } else {
            Style::default().fg(theme.text_soft).bg(theme.bg_soft)
        };

        let pill = self.toggle.pill();
        let pill_width = pill.chars().count() as u16;
        let label_area = Rect {
            width: area.width.saturating_sub(pill_width + 1),
            ..area
        };
        let pill_area = Rect {
            x: area.x + area.width.saturating_sub(pill_width),
            width: pill_width.min(area.width),
            ..area
        };

        Paragraph::new(self.toggle.label.as_str())
            .style(theme.text())
            .render(label_area, buf);
        Paragraph::new(pill).style(pill_style).render(pill_area, buf);
    }
}

/// Dim everything under an open overlay
pub fn render_backdrop(frame: &mut Frame, theme: &Theme, area: Rect) {
    frame.buffer_mut().set_style(
        area,
        Style::default()
            .fg(theme.accent_muted)
            .bg(theme.bg)
            .add_modifier(Modifier::DIM),
    );
}

/// Render an overlay panel with a close control in its top-right corner
pub fn render_panel(
    frame: &mut Frame,
    title: &str,
    content: Vec<Line>,
    theme: &Theme,
    panel: Rect,
    close: Rect,
) {
    // Clear the area behind the panel
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.title().bg(theme.bg_elevated))
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.elevated());

    frame.render_widget(block, panel);

    // Inner area for content
    let inner = Rect {
        x: panel.x + 2,
        y: panel.y + 2,
        width: panel.width.saturating_sub(4),
        height: panel.height.saturating_sub(5),
    };

    let content_widget = Paragraph::new(content)
        .style(theme.elevated())
        .wrap(Wrap { trim: false });
    frame.render_widget(content_widget, inner);

    // Close controls
    frame.render_widget(
        Paragraph::new("[x]").style(theme.button()),
        close.intersection(panel),
    );

    let button_area = Rect {
        x: panel.x + 2,
        y: (panel.y + panel.height).saturating_sub(2),
        width: panel.width.saturating_sub(4),
        height: 1,
    };
    let buttons = Line::from(vec![
        Span::styled("[", theme.elevated().fg(theme.text_soft)),
        Span::styled("Esc", theme.button()),
        Span::styled("] ", theme.elevated().fg(theme.text_soft)),
        Span::styled("Close", theme.elevated()),
    ]);
    frame.render_widget(
        Paragraph::new(buttons).alignment(Alignment::Center),
        button_area.intersection(panel),
    );
}

/// Render a flash message (bottom of screen)
pub fn render_flash_message(
    frame: &mut Frame,
    message: &str,
    is_error: bool,
    theme: &Theme,
    area: Rect,
) {
    let style = if is_error { theme.error() } else { theme.success() };
    let prefix = if is_error { "✗ " } else { "✓ " };

    let flash_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: area.height.min(1),
    };

    frame.render_widget(Clear, flash_area);
    let flash = Paragraph::new(Line::from(vec![
        Span::styled(prefix, style),
        Span::styled(message, style),
    ]))
    .style(theme.block_style());

    frame.render_widget(flash, flash_area);
}

/// Render status bar at bottom
pub fn render_status_bar(
    frame: &mut Frame,
    left_content: &str,
    right_content: &str,
    theme: &Theme,
    area: Rect,
) {
    // Clear the line first
    frame.render_widget(Clear, area);

    // Left side
    let left_widget = Paragraph::new(left_content).style(theme.text_dim());

    // Right side
    let right_len = right_content.chars().count() as u16;
    let right_area = Rect {
        x: area.x + area.width.saturating_sub(right_len + 1),
        y: area.y,
        width: (right_len + 1).min(area.width),
        height: area.height,
    };
    let right_widget = Paragraph::new(right_content).style(theme.text_dim());

    frame.render_widget(left_widget, area);
    frame.render_widget(right_widget, right_area);
}

/// Helper: Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Helper: Number of rows `text` takes when word-wrapped to `width`
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let width = width as usize;
    let mut rows = 0u16;

    for line in text.lines() {
        let mut used = 0usize;
        rows += 1;
        for word in line.split_whitespace() {
            let len = word.chars().count();
            if used == 0 {
                used = len;
            } else if used + 1 + len <= width {
                used += 1 + len;
            } else {
                rows += 1;
                used = len;
            }
            // Words longer than the row spill over
            while used > width {
                rows += 1;
                used -= width;
            }
        }
    }

    rows.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(40, 20, area);

        assert_eq!(popup.x, 30);
        assert_eq!(popup.y, 15);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 20);
    }

    #[test]
    fn test_centered_rect_larger_than_area() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = centered_rect(40, 20, area);
        assert_eq!(popup, area);
    }

    #[test]
    fn test_create_card_optional_parts() {
        let card = create_card("Fieldwright", None, Some(""), None, None);
        assert_eq!(card.summary, None);
        assert_eq!(card.meta, None);
        assert_eq!(card.button_label, "Open");
        assert_eq!(card.activate(), None);

        let card = create_card(
            "Dream Mode",
            Some("Sandbox"),
            Some("Simulation"),
            Some("Details"),
            Some(CardAction::Acknowledge("hi".into())),
        );
        assert_eq!(card.summary.as_deref(), Some("Sandbox"));
        assert_eq!(card.meta.as_deref(), Some("Simulation"));
        assert_eq!(card.button_label, "Details");
        assert_eq!(card.activate(), Some("hi"));
    }

    #[test]
    fn test_toggle_knob_reflects_state() {
        let on = create_toggle("X", true);
        let off = create_toggle("X", false);

        assert!(on.is_on);
        assert!(on.pill().ends_with("●)"));
        assert!(!off.is_on);
        assert!(off.pill().starts_with("(●"));
        assert_ne!(on.pill(), off.pill());
    }

    #[test]
    fn test_card_widget_renders_text() {
        let theme = Theme::default();
        let card = create_card(
            "Farm OS",
            Some("Bridge between soil and sky."),
            Some("Module"),
            Some("Open"),
            None,
        );

        let mut buf = Buffer::empty(Rect::new(0, 0, 40, CARD_HEIGHT));
        CardWidget { card: &card, theme: &theme, focused: false }.render(buf.area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Farm OS"));
        assert!(text.contains("Bridge between soil and sky."));
        assert!(text.contains("Module"));
        assert!(text.contains(" Open "));
    }

    #[test]
    fn test_toggle_widget_renders_pill_at_right() {
        let theme = Theme::default();
        let toggle = create_toggle("Auto-hide nav", true);

        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 1));
        ToggleWidget { toggle: &toggle, theme: &theme }.render(buf.area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.starts_with("Auto-hide nav"));
        assert!(text.trim_end().ends_with("(   ●)"));
    }

    #[test]
    fn test_panel_draws_close_control() {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        let panel = Rect::new(2, 1, 36, 10);
        let close = Rect::new(panel.x + panel.width - 5, panel.y, 3, 1);

        terminal
            .draw(|frame| {
                render_panel(frame, "Support", vec![Line::raw("Hello")], &theme, panel, close)
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains(" Support "));
        assert!(text.contains("[x]"));
        assert!(text.contains("Hello"));
        assert!(text.contains("[Esc] Close"));
    }

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height("", 10), 1);
        assert_eq!(wrapped_height("short", 10), 1);
        assert_eq!(wrapped_height("one two three", 7), 2);
        assert_eq!(wrapped_height("abcdefghijkl", 5), 3);
        assert_eq!(wrapped_height("a\nb", 10), 2);
        assert_eq!(wrapped_height("anything", 0), 0);
    }
}
