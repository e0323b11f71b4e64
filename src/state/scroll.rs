//! Scroll state: the viewport over the page canvas and the back-to-top
//! watcher.
//!
//! Offsets are page units. One terminal row is `LINE_HEIGHT` units.

use log::*;
use std::time::Duration;

/// Page units per terminal row.
///
pub const LINE_HEIGHT: u32 = 16;

/// Default offset past which the back-to-top control is shown.
///
pub const BACK_TO_TOP_THRESHOLD: u32 = 200;

/// Lines moved per arrow key.
///
pub const LINE_SCROLL: u32 = 1;

/// Lines moved per mouse wheel notch.
///
pub const WHEEL_SCROLL: u32 = 3;

/// Fraction of the viewport moved by page up/down.
///
pub const PAGE_SCROLL_FACTOR: f32 = 0.9;

/// Time constant of the smooth scroll ease-out.
///
const SMOOTH_SCROLL_TAU_MS: f32 = 80.0;

/// How a scroll request is carried out.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Smooth,
    Instant,
}

/// The visible window over the page canvas.
///
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    offset: u32,
    height: u32,
    max_offset: u32,
    target: Option<u32>,
}

impl Viewport {
    pub fn new() -> Self {
        Viewport::default()
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn max_offset(&self) -> u32 {
        self.max_offset
    }

    pub fn is_smooth_scrolling(&self) -> bool {
        self.target.is_some()
    }

    /// First visible row of the canvas.
    ///
    pub fn top_row(&self) -> u16 {
        u16::try_from(self.offset / LINE_HEIGHT).unwrap_or(u16::MAX)
    }

    /// Set the visible height and the total content height, re-clamping the
    /// offset. Returns true if the offset moved.
    ///
    pub fn resize(&mut self, height: u32, content_height: u32) -> bool {
        self.height = height;
        self.max_offset = content_height.saturating_sub(height);
        if let Some(target) = self.target {
            self.target = Some(target.min(self.max_offset));
        }
        let clamped = self.offset.min(self.max_offset);
        let moved = clamped != self.offset;
        self.offset = clamped;
        moved
    }

    /// Move by a signed delta immediately, cancelling any smooth scroll.
    /// Returns true if the offset moved.
    ///
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        self.target = None;
        let next = (self.offset as i64 + delta).clamp(0, self.max_offset as i64) as u32;
        self.set_offset(next)
    }

    /// Request a scroll to an absolute offset. Smooth requests are carried out
    /// by `step`. Returns true if the offset moved right away.
    ///
    pub fn scroll_to(&mut self, offset: u32, behavior: Behavior) -> bool {
        let offset = offset.min(self.max_offset);
        match behavior {
            Behavior::Instant => {
                self.target = None;
                self.set_offset(offset)
            }
            Behavior::Smooth => {
                self.target = if offset == self.offset {
                    None
                } else {
                    Some(offset)
                };
                false
            }
        }
    }

    /// Advance a smooth scroll by `elapsed`. Each step covers at least one
    /// line and never overshoots. Returns true if the offset moved.
    ///
    pub fn step(&mut self, elapsed: Duration) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let distance = target.abs_diff(self.offset);
        let fraction = 1.0 - (-(elapsed.as_millis() as f32) / SMOOTH_SCROLL_TAU_MS).exp();
        let travel = ((distance as f32 * fraction).ceil() as u32)
            .max(LINE_HEIGHT)
            .min(distance);

        let next = if target > self.offset {
            self.offset + travel
        } else {
            self.offset - travel
        };
        if next == target {
            self.target = None;
        }
        self.set_offset(next)
    }

    fn set_offset(&mut self, offset: u32) -> bool {
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        true
    }
}

/// Read-only view of the scroll state for rendering.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSnapshot {
    pub offset: u32,
    pub past_threshold: bool,
}

/// Tracks whether the page has been scrolled far enough to offer a way back
/// to the top.
///
#[derive(Debug, Clone)]
pub struct ScrollWatcher {
    threshold: u32,
    past_threshold: bool,
}

impl Default for ScrollWatcher {
    fn default() -> Self {
        ScrollWatcher::new(BACK_TO_TOP_THRESHOLD)
    }
}

impl ScrollWatcher {
    pub fn new(threshold: u32) -> Self {
        ScrollWatcher {
            threshold,
            past_threshold: false,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn past_threshold(&self) -> bool {
        self.past_threshold
    }

    /// Offset at or below which a shown control is hidden again.
    ///
    pub fn hide_at(&self) -> u32 {
        self.threshold - self.threshold / 4
    }

    /// Recompute the flag for a new offset. Returns true if it flipped.
    ///
    /// The control appears once the offset exceeds the threshold and stays
    /// until the offset drops to `hide_at`, so it does not flicker while the
    /// page hovers around the threshold.
    ///
    pub fn on_scroll(&mut self, offset: u32) -> bool {
        let past = if self.past_threshold {
            offset > self.hide_at()
        } else {
            offset > self.threshold
        };
        if past == self.past_threshold {
            return false;
        }
        self.past_threshold = past;
        debug!(
            "Back-to-top control {}",
            if past { "shown" } else { "hidden" }
        );
        true
    }

    /// Smooth-scroll to the top. The flag itself only changes on later scroll
    /// events.
    ///
    pub fn activate(&self, viewport: &mut Viewport) {
        viewport.scroll_to(0, Behavior::Smooth);
    }

    pub fn snapshot(&self, viewport: &Viewport) -> ScrollSnapshot {
        ScrollSnapshot {
            offset: viewport.offset(),
            past_threshold: self.past_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(height: u32, content: u32) -> Viewport {
        let mut viewport = Viewport::new();
        viewport.resize(height, content);
        viewport
    }

    fn settle(viewport: &mut Viewport) -> usize {
        let mut steps = 0;
        while viewport.is_smooth_scrolling() {
            viewport.step(Duration::from_millis(16));
            steps += 1;
            assert!(steps < 1000, "smooth scroll never settled");
        }
        steps
    }

    #[test]
    fn threshold_flag_follows_offsets() {
        let mut watcher = ScrollWatcher::default();
        let flags: Vec<bool> = [0, 150, 250, 180, 50]
            .iter()
            .map(|offset| {
                watcher.on_scroll(*offset);
                watcher.past_threshold()
            })
            .collect();
        assert_eq!(flags, vec![false, false, true, true, false]);
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut watcher = ScrollWatcher::default();
        assert!(!watcher.on_scroll(200));
        assert!(watcher.on_scroll(201));
        assert!(!watcher.on_scroll(300));
    }

    #[test]
    fn shown_control_hides_at_three_quarters_of_the_threshold() {
        let mut watcher = ScrollWatcher::default();
        assert_eq!(watcher.hide_at(), 150);
        assert!(!watcher.on_scroll(180));
        assert!(watcher.on_scroll(260));
        assert!(!watcher.on_scroll(200));
        assert!(!watcher.on_scroll(151));
        assert!(watcher.on_scroll(150));
        assert!(!watcher.past_threshold());
        assert!(!watcher.on_scroll(190));
    }

    #[test]
    fn activate_scrolls_to_top_without_touching_the_flag() {
        let mut watcher = ScrollWatcher::default();
        let mut viewport = viewport(400, 4000);
        viewport.scroll_by(1000);
        watcher.on_scroll(viewport.offset());

        watcher.activate(&mut viewport);
        assert!(watcher.past_threshold());
        assert_eq!(viewport.offset(), 1000);

        settle(&mut viewport);
        assert_eq!(viewport.offset(), 0);
        watcher.on_scroll(viewport.offset());
        assert!(!watcher.past_threshold());
    }

    #[test]
    fn scroll_by_clamps_to_content() {
        let mut viewport = viewport(400, 1000);
        assert!(!viewport.scroll_by(-50));
        assert!(viewport.scroll_by(5000));
        assert_eq!(viewport.offset(), 600);
    }

    #[test]
    fn smooth_scroll_lands_exactly_on_target() {
        let mut viewport = viewport(400, 10_000);
        viewport.scroll_to(3000, Behavior::Smooth);
        assert_eq!(viewport.offset(), 0);
        let steps = settle(&mut viewport);
        assert_eq!(viewport.offset(), 3000);
        assert!(steps > 1);
    }

    #[test]
    fn smooth_scroll_target_is_clamped() {
        let mut viewport = viewport(400, 1000);
        viewport.scroll_to(5000, Behavior::Smooth);
        settle(&mut viewport);
        assert_eq!(viewport.offset(), 600);
    }

    #[test]
    fn manual_scroll_cancels_smooth_scroll() {
        let mut viewport = viewport(400, 10_000);
        viewport.scroll_to(3000, Behavior::Smooth);
        viewport.step(Duration::from_millis(16));
        viewport.scroll_by(16);
        assert!(!viewport.is_smooth_scrolling());
    }

    #[test]
    fn resize_reclamps_offset() {
        let mut viewport = viewport(400, 2000);
        viewport.scroll_by(1600);
        assert!(viewport.resize(800, 2000));
        assert_eq!(viewport.offset(), 1200);
    }

    #[test]
    fn top_row_uses_line_height() {
        let mut viewport = viewport(LINE_HEIGHT * 10, LINE_HEIGHT * 100);
        viewport.scroll_by((LINE_HEIGHT * 7 + 3) as i64);
        assert_eq!(viewport.top_row(), 7);
    }
}
