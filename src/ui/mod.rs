//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library, including:
//! - Terminal layout (navigation bar, page, log panel, key hints)
//! - Theme management
//! - Widget components (styling, the scrolling page canvas)
//! - View rendering (profile, card sections, carousel, menu overlay)

type Frame<'a> = ratatui::Frame<'a>;

mod render;
mod theme;
mod widgets;

pub use render::render;
pub use theme::{ColorSpec, Theme};
