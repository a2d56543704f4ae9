//! User Interface layer
//!
//! This module contains all UI-related code:
//! - Theme (skin) resolution
//! - Reusable widgets (cards, toggles, panels)
//! - View content and screen layout
//! - Main render entry point

pub mod layout;
pub mod render;
pub mod theme;
pub mod view;
pub mod widgets;

pub use render::render;
pub use theme::Theme;
