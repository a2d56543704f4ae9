//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Top rail with the mode indicator
//! - Intro panel and the scrollable view container
//! - Nav bar and status line
//! - Overlays and flash messages

use crate::app::App;
use crate::types::{OverlayKind, MODES};
use crate::ui::layout::ShellLayout;
use crate::ui::view::ViewBody;
use crate::ui::{theme::Theme, widgets};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = ShellLayout::new(area, app);
    let theme = &app.theme;

    frame.render_widget(Block::default().style(theme.block_style()), area);

    render_top_rail(frame, app, layout.top_rail);
    render_intro(frame, app, layout.intro);
    render_content(frame, app, layout.content);
    render_nav(frame, app, &layout);

    widgets::render_status_bar(
        frame,
        " [1] Hub  [2] Modes  [3] Settings  [a] Support  [Tab] Focus  [Enter] Open  [j/k] Scroll  [q] Quit",
        &format!("{} ", app.config.active_skin),
        theme,
        layout.status,
    );

    render_overlay(frame, app, &layout, area);

    // Flash message (acknowledgments)
    if let Some((msg, is_error, _)) = &app.flash_message {
        widgets::render_flash_message(frame, msg, *is_error, theme, layout.status);
    }
}

/// Title on the left, mode indicator and clock on the right
fn render_top_rail(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let title = Paragraph::new(Line::from(vec![
        Span::styled(" One OS", theme.title()),
        Span::styled(format!(" · {}", app.view.header.title), theme.text_dim()),
    ]));
    frame.render_widget(title, area);

    let clock = chrono::Local::now().format("%H:%M").to_string();
    let indicator = Paragraph::new(Line::from(vec![
        Span::styled("◉ ", theme.title()),
        Span::styled(app.mode_indicator.as_str(), theme.text()),
        Span::styled(format!("  {} ", clock), theme.text_dim()),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(indicator, area);
}

fn render_intro(frame: &mut Frame, app: &App, area: Rect) {
    let intro = &app.view.intro;
    if !intro.visible || area.height == 0 {
        return;
    }
    let theme = &app.theme;

    let block = Block::default()
        .title(format!(" {} ", intro.title))
        .title_style(theme.title().bg(theme.bg_soft))
        .borders(Borders::BOTTOM)
        .border_style(theme.border())
        .style(theme.text_dim().bg(theme.bg_soft));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let body = Paragraph::new(intro.body.as_str())
        .style(theme.text_dim().bg(theme.bg_soft))
        .wrap(Wrap { trim: true });
    frame.render_widget(
        body,
        Rect {
            x: inner.x + 2,
            width: inner.width.saturating_sub(4),
            ..inner
        },
    );
}

/// Draw the whole view off-screen, then copy the visible rows
fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let document = render_document(app, area.width);
    let doc_area = document.area;
    let buf = frame.buffer_mut();

    for row in 0..area.height {
        let src_y = app.content_scroll.saturating_add(row);
        if src_y >= doc_area.height {
            break;
        }
        for col in 0..area.width {
            if let Some(cell) = document.cell((col, src_y)) {
                if let Some(target) = buf.cell_mut((area.x + col, area.y + row)) {
                    *target = cell.clone();
                }
            }
        }
    }
}

/// The current view laid out at its full height
pub fn render_document(app: &App, width: u16) -> Buffer {
    let theme = &app.theme;
    let layout = app.view.layout(width);
    let mut buf = Buffer::empty(Rect::new(0, 0, width, layout.height));
    Block::default().style(theme.block_style()).render(buf.area, &mut buf);

    let header = &app.view.header;
    Paragraph::new(vec![
        Line::styled(header.title.as_str(), theme.title()),
        Line::styled(header.subtitle.as_str(), theme.text_dim()),
    ])
    .render(layout.header, &mut buf);

    match &app.view.body {
        ViewBody::CardGrid(cards) => {
            for (i, (card, rect)) in cards.iter().zip(&layout.cards).enumerate() {
                widgets::CardWidget {
                    card,
                    theme,
                    focused: app.card_focus == Some(i),
                }
                .render(*rect, &mut buf);
            }
        }
        ViewBody::Settings { toggles, note } => {
            for (toggle, rect) in toggles.iter().zip(&layout.toggles) {
                widgets::ToggleWidget { toggle, theme }.render(*rect, &mut buf);
            }
            if let Some(rect) = layout.note {
                Paragraph::new(note.as_str())
                    .style(theme.text_dim())
                    .wrap(Wrap { trim: true })
                    .render(rect, &mut buf);
            }
        }
    }

    buf
}

fn render_nav(frame: &mut Frame, app: &App, layout: &ShellLayout) {
    if layout.nav.height == 0 {
        return;
    }
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.border())
        .style(theme.elevated());
    frame.render_widget(block, layout.nav);

    for (key, rect) in &layout.nav_buttons {
        let label = app
            .config
            .page(*key)
            .map(|page| page.label.as_str())
            .filter(|label| !label.is_empty())
            .unwrap_or(key.default_label());
        let style = if app.nav_active == Some(*key) {
            theme.nav_active()
        } else {
            theme.nav_inactive()
        };
        frame.render_widget(
            Paragraph::new(label).style(style).alignment(Alignment::Center),
            *rect,
        );
    }

    frame.render_widget(
        Paragraph::new(app.support_label.as_str())
            .style(theme.nav_inactive().add_modifier(Modifier::UNDERLINED))
            .alignment(Alignment::Center),
        layout.support_button,
    );
}

fn render_overlay(frame: &mut Frame, app: &App, layout: &ShellLayout, area: Rect) {
    if !app.overlays.backdrop_visible() {
        return;
    }
    let theme = &app.theme;
    widgets::render_backdrop(frame, theme, area);

    let Some(kind) = app.overlays.visible() else {
        return;
    };

    let (title, content) = match kind {
        OverlayKind::Modes => ("Modes".to_string(), modes_overlay(app, theme)),
        OverlayKind::Settings => ("Settings".to_string(), settings_overlay(app, theme)),
        OverlayKind::Support => (
            app.config.support.title.clone(),
            vec![Line::raw(app.config.support.body.clone())],
        ),
    };

    widgets::render_panel(
        frame,
        &title,
        content,
        theme,
        layout.overlay_panel,
        layout.overlay_close,
    );
}

fn modes_overlay<'a>(app: &'a App, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for mode in &MODES {
        let current =
            !app.mode_indicator.is_empty() && mode.title.starts_with(app.mode_indicator.as_str());
        let marker = if current { "● " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, theme.title().bg(theme.bg_elevated)),
            Span::styled(mode.title, theme.elevated().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", mode.meta), theme.elevated().fg(theme.text_soft)),
        ]));
    }
    lines
}

fn settings_overlay<'a>(app: &'a App, theme: &Theme) -> Vec<Line<'a>> {
    let config = &app.config;
    let dim = theme.elevated().fg(theme.text_soft);
    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<18}", label), dim),
            Span::styled(value, theme.elevated().fg(theme.accent)),
        ])
    };

    let config_path = crate::config::Config::path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "Unknown".into());

    vec![
        row("Skin", config.active_skin.clone()),
        row("Available skins", config.skin_names().join(", ")),
        row(
            "Nav auto-hide",
            if config.behaviour.nav_auto_hide { "on" } else { "off" }.to_string(),
        ),
        row("Hide threshold", format!("{} rows", config.behaviour.nav_hide_threshold)),
        Line::raw(""),
        Line::styled(format!("Config: {}", config_path), dim),
    ]
}
