//! Theme definitions for oneos
//!
//! A skin from the config is a set of color strings. Applying it resolves
//! each string into a terminal color and stores it in the matching style
//! variable. Translucent colors are blended over the skin's background,
//! since terminals have no alpha channel.

use crate::config::{Config, Palette, DEFAULT_SKIN};
use anyhow::{bail, Context, Result};
use ratatui::style::{Color, Modifier, Style};

/// Resolved style variables, written only by [`Theme::apply_skin`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Backgrounds
    pub bg: Color,
    pub bg_elevated: Color,
    pub bg_soft: Color,

    // Accent colors
    pub accent: Color,
    pub accent_soft: Color,
    pub accent_strong: Color,
    pub accent_muted: Color,

    // Text
    pub text_main: Color,
    pub text_soft: Color,

    // Borders
    pub border_soft: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette(&Palette::default())
    }
}

impl Theme {
    /// Build a theme from the config's active skin
    pub fn from_config(config: &Config) -> Self {
        let mut theme = Self::default();
        theme.apply_skin(config);
        theme
    }

    /// Write the active skin's palette into every style variable.
    ///
    /// Unknown skin names fall back to the default skin.
    pub fn apply_skin(&mut self, config: &Config) {
        let fallback = Palette::default();
        let palette = match config.skins.get(&config.active_skin) {
            Some(palette) => palette,
            None => {
                tracing::debug!(skin = %config.active_skin, "unknown skin, using default");
                config.skins.get(DEFAULT_SKIN).unwrap_or(&fallback)
            }
        };
        *self = Self::from_palette(palette);
    }

    fn from_palette(palette: &Palette) -> Self {
        let fallback = Palette::default();
        let bg = resolve(&palette.bg, &fallback.bg, None);
        let over = Some(rgb_of(bg));

        Self {
            bg,
            bg_elevated: resolve(&palette.bg_elevated, &fallback.bg_elevated, over),
            bg_soft: resolve(&palette.bg_soft, &fallback.bg_soft, over),
            accent: resolve(&palette.accent, &fallback.accent, over),
            accent_soft: resolve(&palette.accent_soft, &fallback.accent_soft, over),
            accent_strong: resolve(&palette.accent_strong, &fallback.accent_strong, over),
            accent_muted: resolve(&palette.accent_muted, &fallback.accent_muted, over),
            text_main: resolve(&palette.text_main, &fallback.text_main, over),
            text_soft: resolve(&palette.text_soft, &fallback.text_soft, over),
            border_soft: resolve(&palette.border_soft, &fallback.border_soft, over),
        }
    }

    /// All style variables with their names
    pub fn vars(&self) -> [(&'static str, Color); 10] {
        [
            ("--bg", self.bg),
            ("--bg-elevated", self.bg_elevated),
            ("--bg-soft", self.bg_soft),
            ("--accent", self.accent),
            ("--accent-soft", self.accent_soft),
            ("--accent-strong", self.accent_strong),
            ("--accent-muted", self.accent_muted),
            ("--text-main", self.text_main),
            ("--text-soft", self.text_soft),
            ("--border-soft", self.border_soft),
        ]
    }

    // Style helpers for common UI patterns

    /// Base style for filled regions
    pub fn block_style(&self) -> Style {
        Style::default().bg(self.bg)
    }

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_main).bg(self.bg)
    }

    /// Dimmed text style
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.text_soft).bg(self.bg)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Raised surface (cards, panels, nav bar)
    pub fn elevated(&self) -> Style {
        Style::default().fg(self.text_main).bg(self.bg_elevated)
    }

    /// Border style (unfocused)
    pub fn border(&self) -> Style {
        Style::default().fg(self.border_soft)
    }

    /// Border style (focused)
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.accent_muted)
    }

    /// Nav button (inactive)
    pub fn nav_inactive(&self) -> Style {
        Style::default().fg(self.text_soft).bg(self.bg_elevated)
    }

    /// Nav button (active)
    pub fn nav_active(&self) -> Style {
        Style::default()
            .fg(self.accent_strong)
            .bg(self.accent_soft)
            .add_modifier(Modifier::BOLD)
    }

    /// Card/overlay button
    pub fn button(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg_soft)
            .add_modifier(Modifier::BOLD)
    }

    /// Success message style
    pub fn success(&self) -> Style {
        Style::default().fg(self.accent_strong).bg(self.bg)
    }

    /// Error message style
    pub fn error(&self) -> Style {
        Style::default().fg(Color::Rgb(251, 73, 52)).bg(self.bg)
    }
}

/// A parsed color with its alpha in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

/// Parse `#rrggbb`, `#rgb` or `rgba(r, g, b, a)` / `rgb(r, g, b)`
pub fn parse_color(value: &str) -> Result<Rgba> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        if !hex.is_ascii() {
            bail!("invalid hex color {:?}", value);
        }
        let channel = |s: &str| {
            u8::from_str_radix(s, 16).with_context(|| format!("invalid hex color {:?}", value))
        };
        return match hex.len() {
            6 => Ok(Rgba {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
                a: 1.0,
            }),
            3 => {
                let short = |s: &str| channel(s).map(|c| c * 17);
                Ok(Rgba {
                    r: short(&hex[0..1])?,
                    g: short(&hex[1..2])?,
                    b: short(&hex[2..3])?,
                    a: 1.0,
                })
            }
            _ => bail!("invalid hex color {:?}", value),
        };
    }

    let args = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
        .with_context(|| format!("unsupported color {:?}", value))?;

    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let channel = |s: &str| {
        s.parse::<u8>()
            .with_context(|| format!("invalid channel {:?} in {:?}", s, value))
    };

    match parts.as_slice() {
        [r, g, b] => Ok(Rgba { r: channel(*r)?, g: channel(*g)?, b: channel(*b)?, a: 1.0 }),
        [r, g, b, a] => {
            let a: f32 = a
                .parse()
                .with_context(|| format!("invalid alpha {:?} in {:?}", a, value))?;
            if !(0.0..=1.0).contains(&a) {
                bail!("alpha out of range in {:?}", value);
            }
            Ok(Rgba { r: channel(*r)?, g: channel(*g)?, b: channel(*b)?, a })
        }
        _ => bail!("expected 3 or 4 channels in {:?}", value),
    }
}

/// Blend a translucent color over an opaque background
pub fn blend(color: Rgba, over: (u8, u8, u8)) -> Color {
    let mix = |fg: u8, bg: u8| {
        (fg as f32 * color.a + bg as f32 * (1.0 - color.a)).round() as u8
    };
    Color::Rgb(mix(color.r, over.0), mix(color.g, over.1), mix(color.b, over.2))
}

/// Resolve a palette value, falling back to the built-in one if it does not parse
fn resolve(value: &str, fallback: &str, over: Option<(u8, u8, u8)>) -> Color {
    let parsed = parse_color(value).or_else(|err| {
        tracing::warn!(value, error = %err, "bad skin color, using default");
        parse_color(fallback)
    });

    match parsed {
        Ok(color) => blend(color, over.unwrap_or((0, 0, 0))),
        Err(_) => Color::Reset,
    }
}

fn rgb_of(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => (0, 0, 0),
    }
}
