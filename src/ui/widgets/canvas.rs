//! Window onto the virtual page.
//!
//! The page is taller than the terminal. Elements are drawn one at a time
//! into a scratch buffer of their own size and copied onto the visible rows,
//! so partially scrolled-out cards keep their borders where they are cut.

use crate::state::RevealPhase;
use crate::ui::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

/// Rows an element travels while sliding up into place.
///
pub const REVEAL_SHIFT_ROWS: u16 = 2;

/// How a revealed element is drawn at one point of its animation.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub opacity: f32,
    pub shift: u16,
}

impl Appearance {
    pub const SOLID: Appearance = Appearance {
        opacity: 1.0,
        shift: 0,
    };

    /// Appearance for a reveal phase. Hidden elements are not drawn.
    ///
    pub fn of(phase: RevealPhase) -> Option<Appearance> {
        match phase {
            RevealPhase::Hidden => None,
            RevealPhase::Shown => Some(Appearance::SOLID),
            RevealPhase::Animating(progress) => {
                let eased = 1.0 - (1.0 - progress).powi(2);
                Some(Appearance {
                    opacity: eased,
                    shift: ((1.0 - eased) * REVEAL_SHIFT_ROWS as f32).round() as u16,
                })
            }
        }
    }

    /// The theme faded to this appearance's opacity.
    ///
    pub fn theme(&self, theme: &Theme) -> Theme {
        if self.opacity >= 1.0 {
            theme.clone()
        } else {
            theme.faded(self.opacity)
        }
    }
}

/// A blank buffer the size of `area`, filled with the page colors.
///
pub fn scratch(area: Rect, style: Style) -> Buffer {
    let local = Rect::new(0, 0, area.width, area.height);
    let mut buf = Buffer::empty(local);
    buf.set_style(local, style);
    buf
}

/// Visible window of the page, `top_row` rows down, drawn into `page`.
///
pub struct Canvas<'a> {
    buf: &'a mut Buffer,
    page: Rect,
    top_row: u16,
}

impl<'a> Canvas<'a> {
    pub fn new(buf: &'a mut Buffer, page: Rect, top_row: u16) -> Self {
        Canvas { buf, page, top_row }
    }

    pub fn page(&self) -> Rect {
        self.page
    }

    /// Screen rectangle covering the visible part of a page area.
    ///
    pub fn to_screen(&self, area: Rect) -> Option<Rect> {
        let top = area.y as i32 - self.top_row as i32;
        let bottom = top + area.height as i32;
        let visible_top = top.max(0);
        let visible_bottom = bottom.min(self.page.height as i32);
        if visible_bottom <= visible_top {
            return None;
        }
        let x = self.page.x.saturating_add(area.x);
        if x >= self.page.right() {
            return None;
        }
        Some(Rect::new(
            x,
            self.page.y + visible_top as u16,
            area.width.min(self.page.right() - x),
            (visible_bottom - visible_top) as u16,
        ))
    }

    /// Copy a scratch buffer drawn for `area` onto the screen, `shift` rows
    /// lower. Rows pushed past the bottom of `area` are dropped.
    ///
    pub fn blit(&mut self, scratch: &Buffer, area: Rect, shift: u16) {
        let frame = self.buf.area;
        for y in 0..area.height.saturating_sub(shift) {
            let row = area.y as i32 + (y + shift) as i32 - self.top_row as i32;
            if row < 0 || row >= self.page.height as i32 {
                continue;
            }
            let screen_y = self.page.y + row as u16;
            if screen_y >= frame.bottom() {
                continue;
            }
            for x in 0..area.width {
                let screen_x = self.page.x.saturating_add(area.x).saturating_add(x);
                if screen_x >= self.page.right() || screen_x >= frame.right() {
                    break;
                }
                *self.buf.get_mut(screen_x, screen_y) = scratch.get(x, y).clone();
            }
        }
    }
}
