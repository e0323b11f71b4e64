//! Reusable UI widget components.
//!
//! This module contains styling utilities and the scrolling canvas the page
//! is drawn through.

pub mod canvas;
pub mod styling;
