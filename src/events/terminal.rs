use crate::config::{get_action_for_event, HotkeyAction};
use crate::state::{State, WHEEL_SCROLL, LINE_SCROLL};
use anyhow::{anyhow, Result};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use log::*;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// How long the input reader waits for an event before checking whether the
/// handler is still listening.
///
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event {
    Input(CrosstermEvent),
    Tick(Duration),
}

/// Specify struct for managing the terminal events channel.
///
pub struct Handler {
    rx: mpsc::UnboundedReceiver<CrosstermEvent>,
    ticker: Interval,
    last_tick: Instant,
}

impl Handler {
    /// Return new instance after spawning the blocking input reader. Must be
    /// called from within a tokio runtime.
    ///
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::task::spawn_blocking(move || loop {
            match event::poll(POLL_TIMEOUT) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => {
                    if tx.is_closed() {
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
        });
        let mut ticker = interval(tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Handler {
            rx,
            ticker,
            last_tick: Instant::now(),
        }
    }

    /// Wait for the next input or tick.
    ///
    pub async fn next(&mut self) -> Result<Event> {
        tokio::select! {
            event = self.rx.recv() => {
                event.map(Event::Input).ok_or_else(|| anyhow!("Terminal input reader stopped"))
            }
            _ = self.ticker.tick() => {
                let now = Instant::now();
                let elapsed = now.duration_since(self.last_tick);
                self.last_tick = now;
                Ok(Event::Tick(elapsed))
            }
        }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub async fn handle_next(&mut self, state: &mut State) -> Result<bool> {
        match self.next().await? {
            Event::Tick(elapsed) => {
                state.tick(elapsed);
                Ok(true)
            }
            Event::Input(event) => Ok(handle_input(&event, state)),
        }
    }
}

/// Apply one terminal event to the state. Returns false if exit was
/// requested.
///
pub fn handle_input(event: &CrosstermEvent, state: &mut State) -> bool {
    match event {
        CrosstermEvent::Key(key) => handle_key(key, state),
        CrosstermEvent::Mouse(mouse) => {
            handle_mouse(mouse, state);
            true
        }
        CrosstermEvent::Resize(width, height) => {
            debug!("Terminal resized to {}x{}", width, height);
            state.resize(Rect::new(0, 0, *width, *height));
            true
        }
        _ => true,
    }
}

fn handle_key(key: &KeyEvent, state: &mut State) -> bool {
    if key.kind != KeyEventKind::Press {
        return true;
    }
    if let KeyEvent {
        code: KeyCode::Char('c'),
        modifiers,
        ..
    } = key
    {
        if modifiers.contains(KeyModifiers::CONTROL) {
            debug!("Processing exit terminal event '{:?}'...", key);
            return false;
        }
    }

    if let KeyCode::Char(digit @ '1'..='9') = key.code {
        if key.modifiers.is_empty() {
            let index = digit as usize - '1' as usize;
            if index < state.navigation().links().len() {
                state.activate_link(index);
                return true;
            }
        }
    }

    let action = match get_action_for_event(key, state.input_mode(), state.hotkeys()) {
        Some(action) => action,
        None => return true,
    };
    debug!("Processing {:?} for key '{:?}'...", action, key.code);
    match action {
        HotkeyAction::Quit => return false,
        HotkeyAction::ScrollDown => state.scroll_by_lines(LINE_SCROLL as i64),
        HotkeyAction::ScrollUp => state.scroll_by_lines(-(LINE_SCROLL as i64)),
        HotkeyAction::PageDown => state.page_down(),
        HotkeyAction::PageUp => state.page_up(),
        HotkeyAction::ScrollBottom => state.scroll_to_bottom(),
        HotkeyAction::BackToTop => state.back_to_top(),
        HotkeyAction::OpenMenu => state.open_menu(),
        HotkeyAction::CarouselNext => state.carousel_next(),
        HotkeyAction::CarouselPrev => state.carousel_prev(),
        HotkeyAction::CarouselTogglePause => state.toggle_carousel_pause(),
        HotkeyAction::ToggleLog => state.toggle_log(),
        HotkeyAction::MenuNext => state.menu_next(),
        HotkeyAction::MenuPrev => state.menu_prev(),
        HotkeyAction::MenuSelect => state.activate_selected_link(),
        HotkeyAction::CloseMenu => state.request_close_menu(),
    }
    true
}

fn handle_mouse(mouse: &MouseEvent, state: &mut State) {
    match mouse.kind {
        MouseEventKind::ScrollDown => {
            state.scroll_by_lines(WHEEL_SCROLL as i64);
            state.hover(mouse.column, mouse.row);
        }
        MouseEventKind::ScrollUp => {
            state.scroll_by_lines(-(WHEEL_SCROLL as i64));
            state.hover(mouse.column, mouse.row);
        }
        MouseEventKind::Down(MouseButton::Left) => state.click(mouse.column, mouse.row),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => state.hover(mouse.column, mouse.row),
        _ => (),
    }
}
