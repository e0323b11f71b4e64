use crate::config::{Config, InputMode, ViewHotkeys};
use crate::content::{Portfolio, NAV_LABELS};
use crate::layout::{screen_areas, PageLayout, ScreenAreas, NAV_COLLAPSE_WIDTH};
use crate::logger::LogBuffer;
use crate::notify::{Change, ChangeReceiver, Notifier};
use crate::timer::{Fired, Millis, Scheduler, TimerKind};
use crate::ui::Theme;
use log::*;
use ratatui::layout::Rect;
use std::time::Duration;

use super::carousel::Carousel;
use super::error::StateError;
use super::navigation::{MenuSnapshot, MenuState, NavLink, Navigated, Navigation};
use super::scroll::{Behavior, ScrollWatcher, Viewport, LINE_HEIGHT, PAGE_SCROLL_FACTOR};
use super::visibility::{reveal_phase, ElementId, RevealPhase, VisibilityAnimator};

/// Clickable regions registered by the renderer.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Menu overlay backdrop; swallows the pointer without an action
    Menu,
    NavLink(usize),
    Burger,
    CloseMenu,
    Carousel,
    CarouselPrev,
    CarouselNext,
    CarouselDot(usize),
    BackToTop,
}

impl HitTarget {
    fn is_carousel(&self) -> bool {
        matches!(
            self,
            HitTarget::Carousel
                | HitTarget::CarouselPrev
                | HitTarget::CarouselNext
                | HitTarget::CarouselDot(_)
        )
    }
}

fn contains(area: &Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

/// Houses the interaction state of the page.
///
/// The controllers own their own state; `State` owns the scheduler, the
/// viewport and the layout they are operated against, and reports every
/// change through the notifier.
pub struct State {
    scheduler: Scheduler,
    notifier: Notifier,
    carousel: Carousel,
    navigation: Navigation,
    visibility: VisibilityAnimator,
    watcher: ScrollWatcher,
    viewport: Viewport,
    layout: PageLayout,
    portfolio: Portfolio,
    theme: Theme,
    hotkeys: ViewHotkeys,
    logs: LogBuffer,
    log_revision: u64,
    show_log: bool,
    terminal_size: Rect,
    areas: ScreenAreas,
    hit_regions: Vec<(Rect, HitTarget)>,
    pointer: Option<(u16, u16)>,
    carousel_hovered: bool,
    mounted_at: Option<Millis>,
}

impl State {
    pub fn new(config: &Config, portfolio: Portfolio, logs: LogBuffer) -> Self {
        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using default", config.theme_name);
            Theme::default()
        });
        let links = NAV_LABELS
            .iter()
            .map(|label| NavLink::from_label(label))
            .collect();
        let timings = &config.timings;
        State {
            scheduler: Scheduler::new(),
            notifier: Notifier::new(),
            carousel: Carousel::new(portfolio.slides(), timings.autoplay_interval()),
            navigation: Navigation::new(links, timings.menu_close_delay()),
            visibility: VisibilityAnimator::new(timings.reveal_threshold),
            watcher: ScrollWatcher::new(timings.back_to_top_threshold),
            viewport: Viewport::new(),
            layout: PageLayout::default(),
            portfolio,
            theme,
            hotkeys: config.hotkeys.clone(),
            log_revision: logs.revision(),
            logs,
            show_log: false,
            terminal_size: Rect::default(),
            areas: ScreenAreas::default(),
            hit_regions: vec![],
            pointer: None,
            carousel_hovered: false,
            mounted_at: None,
        }
    }

    /// Lay the page out for `size`, start observing every card, arm autoplay
    /// and run the first visibility evaluation.
    ///
    pub fn mount(&mut self, size: Rect) {
        if self.mounted_at.is_some() {
            return;
        }
        self.mounted_at = Some(self.scheduler.now());
        self.apply_size(size, true);
        for element in self.layout.elements() {
            self.visibility.observe(element.id, element.id.group.policy());
        }
        self.carousel.mount(&mut self.scheduler);
        info!(
            "Page mounted with {} observed elements and {} slides",
            self.visibility.observed_count(),
            self.carousel.len()
        );
        self.on_scroll_changed();
    }

    /// Cancel every scheduled task and release all observation.
    ///
    pub fn teardown(&mut self) {
        self.carousel.teardown(&mut self.scheduler);
        self.navigation.teardown(&mut self.scheduler);
        self.scheduler.cancel_all();
        self.visibility.disconnect();
        self.mounted_at = None;
        info!("Page torn down");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted_at.is_some()
    }

    /// Register a new change subscriber.
    ///
    pub fn subscribe(&mut self) -> ChangeReceiver {
        self.notifier.subscribe()
    }

    /// Advance time by `elapsed`: fire due tasks in order, then step the
    /// smooth scroll.
    ///
    pub fn tick(&mut self, elapsed: Duration) {
        let elapsed_ms = Millis::try_from(elapsed.as_millis()).unwrap_or(Millis::MAX);
        let until = self.scheduler.now().saturating_add(elapsed_ms);
        while let Some(fired) = self.scheduler.pop_due(until) {
            self.dispatch(fired);
        }
        self.scheduler.advance_to(until);

        if self.viewport.step(elapsed) {
            self.on_scroll_changed();
        }

        let revision = self.logs.revision();
        if revision != self.log_revision {
            self.log_revision = revision;
            if self.show_log {
                self.notifier.emit(Change::Log);
            }
        }
    }

    fn dispatch(&mut self, fired: Fired) {
        match fired.kind {
            TimerKind::CarouselAutoplay => {
                if self.carousel.on_timer(fired.id) {
                    self.emit_carousel();
                }
            }
            TimerKind::MenuClose => {
                if self.navigation.on_timer(fired.id) {
                    self.emit_menu();
                }
            }
        }
    }

    /// Whether something on screen is moving without input.
    ///
    pub fn is_animating(&self) -> bool {
        let now = self.scheduler.now();
        self.viewport.is_smooth_scrolling()
            || self.navigation.is_closing()
            || self.visibility.is_animating(now)
            || matches!(self.profile_phase(), RevealPhase::Animating(_))
    }

    // Layout

    /// React to a terminal resize.
    ///
    pub fn resize(&mut self, size: Rect) {
        self.apply_size(size, false);
        if self.is_mounted() {
            self.on_scroll_changed();
        }
    }

    fn apply_size(&mut self, size: Rect, force_layout: bool) {
        self.terminal_size = size;
        self.areas = screen_areas(size, self.show_log);
        let width = self.areas.page.width;
        if force_layout || width != self.layout.width() {
            self.layout = PageLayout::compute(&self.portfolio, width);
            debug!(
                "Page laid out at {} columns, {} rows",
                width,
                self.layout.height()
            );
            self.notifier.emit(Change::Layout);
        }
        self.viewport.resize(
            self.areas.page.height as u32 * LINE_HEIGHT,
            self.layout.content_height(),
        );
    }

    pub fn terminal_size(&self) -> Rect {
        self.terminal_size
    }

    pub fn areas(&self) -> ScreenAreas {
        self.areas
    }

    /// Whether the navigation links collapse behind the burger button.
    ///
    pub fn is_compact(&self) -> bool {
        self.terminal_size.width < NAV_COLLAPSE_WIDTH
    }

    // Scrolling

    /// Every viewport move goes through here so the watcher, the animator and
    /// the subscribers all see it.
    ///
    fn on_scroll_changed(&mut self) {
        let offset = self.viewport.offset();
        if self.watcher.on_scroll(offset) {
            debug!(
                "Back-to-top {}",
                if self.watcher.past_threshold() {
                    "shown"
                } else {
                    "hidden"
                }
            );
        }
        self.notifier
            .emit(Change::Scroll(self.watcher.snapshot(&self.viewport)));

        let now = self.scheduler.now();
        let layout = &self.layout;
        let viewport = &self.viewport;
        let revealed = self
            .visibility
            .update(|id| layout.intersection_ratio(id, viewport), now);
        for id in revealed {
            self.notifier.emit(Change::Reveal(id));
        }
    }

    /// Scroll instantly by whole lines.
    ///
    pub fn scroll_by_lines(&mut self, lines: i64) {
        if self.viewport.scroll_by(lines * LINE_HEIGHT as i64) {
            self.on_scroll_changed();
        }
    }

    pub fn page_down(&mut self) {
        let step = (self.viewport.height() as f32 * PAGE_SCROLL_FACTOR) as u32;
        let target = self.viewport.offset().saturating_add(step);
        self.viewport.scroll_to(target, Behavior::Smooth);
    }

    pub fn page_up(&mut self) {
        let step = (self.viewport.height() as f32 * PAGE_SCROLL_FACTOR) as u32;
        let target = self.viewport.offset().saturating_sub(step);
        self.viewport.scroll_to(target, Behavior::Smooth);
    }

    pub fn scroll_to_bottom(&mut self) {
        let bottom = self.viewport.max_offset();
        self.viewport.scroll_to(bottom, Behavior::Smooth);
    }

    /// The back-to-top action: smooth-scroll to the top.
    ///
    pub fn back_to_top(&mut self) {
        self.watcher.activate(&mut self.viewport);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn watcher(&self) -> &ScrollWatcher {
        &self.watcher
    }

    // Menu and navigation

    pub fn input_mode(&self) -> InputMode {
        match self.navigation.menu_state() {
            MenuState::Open => InputMode::Menu,
            MenuState::Closed | MenuState::Closing => InputMode::Page,
        }
    }

    pub fn open_menu(&mut self) {
        if self.navigation.open_menu() {
            self.emit_menu();
        }
    }

    pub fn request_close_menu(&mut self) {
        if self.navigation.request_close(&mut self.scheduler) {
            self.emit_menu();
        }
    }

    pub fn menu_next(&mut self) {
        if self.navigation.select_next() {
            self.emit_menu();
        }
    }

    pub fn menu_prev(&mut self) {
        if self.navigation.select_prev() {
            self.emit_menu();
        }
    }

    /// Follow the navigation link at `index`.
    ///
    pub fn activate_link(&mut self, index: usize) {
        let before = self.navigation.snapshot();
        let result = self
            .navigation
            .activate(index, &self.layout, &mut self.viewport);
        self.after_navigation(before, result);
    }

    /// Follow the highlighted menu entry.
    ///
    pub fn activate_selected_link(&mut self) {
        let before = self.navigation.snapshot();
        let result = self
            .navigation
            .activate_selected(&self.layout, &mut self.viewport);
        self.after_navigation(before, result);
    }

    /// Navigate to an arbitrary anchor.
    ///
    pub fn navigate_to(&mut self, target: &str) -> Navigated {
        let before = self.navigation.snapshot();
        let navigated = self
            .navigation
            .navigate_to(target, &self.layout, &mut self.viewport);
        if self.navigation.snapshot() != before {
            self.emit_menu();
        }
        navigated
    }

    fn after_navigation(&mut self, before: MenuSnapshot, result: Result<Navigated, StateError>) {
        match result {
            Ok(navigated) => debug!("Navigation result: {:?}", navigated),
            Err(e) => debug!("Ignoring link activation: {}", e),
        }
        if self.navigation.snapshot() != before {
            self.emit_menu();
        }
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    // Carousel

    pub fn carousel_next(&mut self) {
        if self.carousel.advance() {
            self.emit_carousel();
        }
    }

    pub fn carousel_prev(&mut self) {
        if self.carousel.retreat() {
            self.emit_carousel();
        }
    }

    pub fn carousel_jump(&mut self, index: usize) {
        match self.carousel.jump_to(index) {
            Ok(true) => self.emit_carousel(),
            Ok(false) => (),
            Err(e) => debug!("Ignoring slide jump: {}", e),
        }
    }

    pub fn set_carousel_paused(&mut self, paused: bool) {
        if self.carousel.set_paused(paused, &mut self.scheduler) {
            self.emit_carousel();
        }
    }

    pub fn toggle_carousel_pause(&mut self) {
        let paused = !self.carousel.is_paused();
        self.set_carousel_paused(paused);
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    // Pointer

    /// Record the regions drawn in the last frame, topmost last.
    ///
    pub fn set_hit_regions(&mut self, regions: Vec<(Rect, HitTarget)>) {
        self.hit_regions = regions;
        // Content may have moved under a pointer that did not.
        if let Some((column, row)) = self.pointer {
            self.hover(column, row);
        }
    }

    /// Topmost target under a terminal cell.
    ///
    pub fn hit_target_at(&self, column: u16, row: u16) -> Option<HitTarget> {
        self.hit_regions
            .iter()
            .rev()
            .find(|(area, _)| contains(area, column, row))
            .map(|(_, target)| *target)
    }

    /// Pointer moved: pause the carousel while it is the topmost target
    /// under the pointer.
    ///
    pub fn hover(&mut self, column: u16, row: u16) {
        self.pointer = Some((column, row));
        let over_carousel = self
            .hit_target_at(column, row)
            .map_or(false, |target| target.is_carousel());
        if over_carousel != self.carousel_hovered {
            self.carousel_hovered = over_carousel;
            self.set_carousel_paused(over_carousel);
        }
    }

    /// Pointer clicked a terminal cell.
    ///
    pub fn click(&mut self, column: u16, row: u16) {
        let target = match self.hit_target_at(column, row) {
            Some(target) => target,
            None => return,
        };
        debug!("Clicked {:?}", target);
        match target {
            HitTarget::NavLink(index) => self.activate_link(index),
            HitTarget::Burger => self.open_menu(),
            HitTarget::CloseMenu => self.request_close_menu(),
            HitTarget::CarouselPrev => self.carousel_prev(),
            HitTarget::CarouselNext => self.carousel_next(),
            HitTarget::CarouselDot(index) => self.carousel_jump(index),
            HitTarget::BackToTop => self.back_to_top(),
            HitTarget::Menu | HitTarget::Carousel => (),
        }
    }

    // Reveal

    /// Animation phase of a card at the current time.
    ///
    pub fn element_phase(&self, id: ElementId) -> RevealPhase {
        self.visibility.phase(id, self.scheduler.now())
    }

    /// The profile card slides in once at mount.
    ///
    pub fn profile_phase(&self) -> RevealPhase {
        match self.mounted_at {
            Some(at) => reveal_phase(at, self.scheduler.now()),
            None => RevealPhase::Hidden,
        }
    }

    pub fn visibility(&self) -> &VisibilityAnimator {
        &self.visibility
    }

    // Log panel

    pub fn toggle_log(&mut self) {
        self.show_log = !self.show_log;
        debug!(
            "Log panel {}",
            if self.show_log { "shown" } else { "hidden" }
        );
        let size = self.terminal_size;
        self.resize(size);
        self.notifier.emit(Change::Log);
    }

    pub fn show_log(&self) -> bool {
        self.show_log
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    // Accessors

    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn hotkeys(&self) -> &ViewHotkeys {
        &self.hotkeys
    }

    fn emit_carousel(&mut self) {
        self.notifier
            .emit(Change::Carousel(self.carousel.snapshot()));
    }

    fn emit_menu(&mut self) {
        self.notifier.emit(Change::Menu(self.navigation.snapshot()));
    }
}
