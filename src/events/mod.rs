//! Event handling module.
//!
//! This module contains the terminal event handler: keyboard, mouse and
//! resize input plus the periodic tick that drives the scheduler.

pub mod terminal;
