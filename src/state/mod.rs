//! Application state management module.
//!
//! This module contains the interaction state of the page:
//! - Carousel controller (slides, autoplay, pause)
//! - Navigation controller (menu, anchor navigation)
//! - Visibility animator (reveal on first sight)
//! - Scroll watcher and viewport
//! - Main `State` struct composing them around one scheduler

mod carousel;
mod error;
mod navigation;
mod scroll;
mod visibility;

pub use carousel::{Carousel, CarouselSnapshot, Slide, AUTOPLAY_INTERVAL};
pub use error::StateError;
pub use navigation::{
    is_root_anchor, AnchorResolver, MenuSnapshot, MenuState, NavLink, Navigated, Navigation,
    MENU_CLOSE_DELAY, ROOT_ANCHOR,
};
pub use scroll::{
    Behavior, ScrollSnapshot, ScrollWatcher, Viewport, BACK_TO_TOP_THRESHOLD, LINE_HEIGHT,
    LINE_SCROLL, PAGE_SCROLL_FACTOR, WHEEL_SCROLL,
};
pub use visibility::{
    reveal_phase, ElementId, Group, RevealPhase, RevealPolicy, VisibilityAnimator,
    REVEAL_DURATION_MS, REVEAL_THRESHOLD,
};

// State struct and its methods are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::{HitTarget, State};
