//! Navigation controller.
//!
//! Owns the collapsible menu and in-page anchor navigation. Closing the menu
//! from its close button is two-phase (Open -> Closing -> Closed after a
//! delay so the exit transition can play); closing because of a navigation is
//! immediate.

use super::error::StateError;
use super::scroll::{Behavior, Viewport};
use crate::timer::{Scheduler, TimerId, TimerKind};
use crate::utils::text_processing::anchor_for_label;
use log::*;
use std::time::Duration;

/// Default length of the menu's closing transition.
///
pub const MENU_CLOSE_DELAY: Duration = Duration::from_millis(300);

/// Anchor of the page root.
///
pub const ROOT_ANCHOR: &str = "#profile";

/// Finds the vertical position of an anchor on the page.
///
pub trait AnchorResolver {
    fn resolve(&self, anchor: &str) -> Result<u32, StateError>;
}

/// One entry of the navigation list.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    /// Build a link whose anchor is derived from its label.
    ///
    pub fn from_label(label: &str) -> Self {
        NavLink {
            label: label.to_string(),
            href: anchor_for_label(label),
        }
    }
}

/// Specifying the state of the collapsible menu.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
    Closing,
}

/// Read-only view of the menu for rendering.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSnapshot {
    pub open: bool,
    pub closing: bool,
    pub selected: usize,
}

/// Result of a navigation request.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigated {
    Top,
    Target(u32),
    Unresolved,
}

pub struct Navigation {
    links: Vec<NavLink>,
    menu: MenuState,
    close_delay: Duration,
    close_timer: Option<TimerId>,
    selected: usize,
}

/// Whether an anchor designates the page root.
///
pub fn is_root_anchor(anchor: &str) -> bool {
    matches!(anchor, "" | "#" | ROOT_ANCHOR)
}

impl Navigation {
    pub fn new(links: Vec<NavLink>, close_delay: Duration) -> Self {
        Navigation {
            links,
            menu: MenuState::Closed,
            close_delay,
            close_timer: None,
            selected: 0,
        }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu
    }

    pub fn is_open(&self) -> bool {
        matches!(self.menu, MenuState::Open | MenuState::Closing)
    }

    pub fn is_closing(&self) -> bool {
        self.menu == MenuState::Closing
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn snapshot(&self) -> MenuSnapshot {
        MenuSnapshot {
            open: self.is_open(),
            closing: self.is_closing(),
            selected: self.selected,
        }
    }

    /// Open the menu. Idempotent when open; ignored while closing.
    ///
    pub fn open_menu(&mut self) -> bool {
        if self.menu != MenuState::Closed {
            return false;
        }
        self.menu = MenuState::Open;
        debug!("Menu opened");
        true
    }

    /// Begin the two-phase close. Only one close task is ever scheduled.
    ///
    pub fn request_close(&mut self, scheduler: &mut Scheduler) -> bool {
        if self.menu != MenuState::Open {
            return false;
        }
        self.menu = MenuState::Closing;
        self.close_timer = Some(scheduler.schedule_once(self.close_delay, TimerKind::MenuClose));
        debug!("Menu closing");
        true
    }

    /// Handle a fired close task. Returns true if the menu closed.
    ///
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.close_timer != Some(id) {
            return false;
        }
        self.close_timer = None;
        self.menu = MenuState::Closed;
        debug!("Menu closed");
        true
    }

    /// Smooth-scroll to an anchor and close the menu. Unknown anchors leave
    /// both the viewport and the menu untouched.
    ///
    pub fn navigate_to<R>(&mut self, target: &str, resolver: &R, viewport: &mut Viewport) -> Navigated
    where
        R: AnchorResolver + ?Sized,
    {
        if is_root_anchor(target) {
            viewport.scroll_to(0, Behavior::Smooth);
            self.hard_close();
            return Navigated::Top;
        }
        match resolver.resolve(target) {
            Ok(offset) => {
                viewport.scroll_to(offset, Behavior::Smooth);
                self.hard_close();
                Navigated::Target(offset)
            }
            Err(e) => {
                debug!("Ignoring navigation: {}", e);
                Navigated::Unresolved
            }
        }
    }

    /// Activate the link at `index`.
    ///
    pub fn activate<R>(
        &mut self,
        index: usize,
        resolver: &R,
        viewport: &mut Viewport,
    ) -> Result<Navigated, StateError>
    where
        R: AnchorResolver + ?Sized,
    {
        let href = self
            .links
            .get(index)
            .map(|link| link.href.clone())
            .ok_or(StateError::LinkOutOfRange(index))?;
        self.selected = index;
        Ok(self.navigate_to(&href, resolver, viewport))
    }

    /// Activate the highlighted link.
    ///
    pub fn activate_selected<R>(
        &mut self,
        resolver: &R,
        viewport: &mut Viewport,
    ) -> Result<Navigated, StateError>
    where
        R: AnchorResolver + ?Sized,
    {
        self.activate(self.selected, resolver, viewport)
    }

    /// Move the highlight to the next link, wrapping.
    ///
    pub fn select_next(&mut self) -> bool {
        if self.links.is_empty() {
            return false;
        }
        self.selected = (self.selected + 1) % self.links.len();
        true
    }

    /// Move the highlight to the previous link, wrapping.
    ///
    pub fn select_prev(&mut self) -> bool {
        if self.links.is_empty() {
            return false;
        }
        self.selected = (self.selected + self.links.len() - 1) % self.links.len();
        true
    }

    /// Cancel a pending close.
    ///
    pub fn teardown(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.close_timer.take() {
            scheduler.cancel(id);
        }
        self.menu = MenuState::Closed;
    }

    fn hard_close(&mut self) {
        if self.menu == MenuState::Open {
            self.menu = MenuState::Closed;
            debug!("Menu closed by navigation");
        }
    }
}
