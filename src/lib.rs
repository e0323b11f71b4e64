//! A terminal portfolio page.
//!
//! The page scrolls smoothly between sections, reveals its cards as they come
//! into view, cycles a carousel of web designs and collapses its navigation
//! into a menu on narrow terminals. All timing runs on a virtual clock driven
//! by the event loop's ticks.

pub mod app;
pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod layout;
pub mod logger;
pub mod notify;
pub mod state;
pub mod timer;
pub mod ui;
pub mod utils;
