//! Carousel controller.
//!
//! Cycles a fixed list of slides. Autoplay is a repeating scheduler task that
//! is armed on mount and on unpause, and cancelled on pause and teardown.
//! Manual stepping never touches the autoplay cadence.

use super::error::StateError;
use crate::timer::{Scheduler, TimerId, TimerKind};
use log::*;
use std::time::Duration;

/// Default autoplay interval.
///
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5000);

/// Opaque image reference. Identity is the position in the list.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide(pub String);

/// Read-only view of the carousel for rendering.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselSnapshot {
    pub index: usize,
    pub len: usize,
    pub paused: bool,
}

impl CarouselSnapshot {
    /// Horizontal offset of the slide strip, in percent of one slide width.
    ///
    pub fn offset_percent(&self) -> i64 {
        -(self.index as i64 * 100)
    }
}

pub struct Carousel {
    slides: Vec<Slide>,
    index: usize,
    paused: bool,
    interval: Duration,
    timer: Option<TimerId>,
}

impl Carousel {
    pub fn new(slides: Vec<Slide>, interval: Duration) -> Self {
        Carousel {
            slides,
            index: 0,
            paused: false,
            interval,
            timer: None,
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.index)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            index: self.index,
            len: self.slides.len(),
            paused: self.paused,
        }
    }

    pub fn offset_percent(&self) -> i64 {
        self.snapshot().offset_percent()
    }

    /// Step forward, wrapping to the first slide. Returns true if the index
    /// moved.
    ///
    pub fn advance(&mut self) -> bool {
        let n = self.slides.len();
        if n <= 1 {
            return false;
        }
        self.index = (self.index + 1) % n;
        debug!("Carousel advanced to slide {}/{}", self.index + 1, n);
        true
    }

    /// Step backward, wrapping to the last slide. Returns true if the index
    /// moved.
    ///
    pub fn retreat(&mut self) -> bool {
        let n = self.slides.len();
        if n <= 1 {
            return false;
        }
        self.index = (self.index + n - 1) % n;
        debug!("Carousel retreated to slide {}/{}", self.index + 1, n);
        true
    }

    /// Show a specific slide.
    ///
    pub fn jump_to(&mut self, index: usize) -> Result<bool, StateError> {
        if index >= self.slides.len() {
            return Err(StateError::SlideOutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        let moved = self.index != index;
        self.index = index;
        Ok(moved)
    }

    /// Arm autoplay if it is not paused and not already armed.
    ///
    pub fn mount(&mut self, scheduler: &mut Scheduler) {
        if !self.paused {
            self.arm(scheduler);
        }
    }

    /// Pause or resume autoplay. Only an actual transition touches the timer,
    /// so repeated calls never stack timers. Returns true on a transition.
    ///
    pub fn set_paused(&mut self, paused: bool, scheduler: &mut Scheduler) -> bool {
        if self.paused == paused {
            return false;
        }
        self.paused = paused;
        if paused {
            self.disarm(scheduler);
        } else {
            self.arm(scheduler);
        }
        debug!("Carousel {}", if paused { "paused" } else { "resumed" });
        true
    }

    /// Handle a fired autoplay task. Tasks that are not the armed one are
    /// ignored.
    ///
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.timer != Some(id) || self.paused {
            return false;
        }
        self.advance()
    }

    /// Cancel autoplay for good.
    ///
    pub fn teardown(&mut self, scheduler: &mut Scheduler) {
        self.disarm(scheduler);
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    fn arm(&mut self, scheduler: &mut Scheduler) {
        if self.timer.is_none() {
            self.timer =
                Some(scheduler.schedule_repeating(self.interval, TimerKind::CarouselAutoplay));
        }
    }

    fn disarm(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.timer.take() {
            scheduler.cancel(id);
        }
    }
}
