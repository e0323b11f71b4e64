use crate::config::Config;
use crate::content::Portfolio;
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{self, LogBuffer};
use crate::notify::ChangeReceiver;
use crate::state::State;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, stdout, Stdout};

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: State,
    changes: ChangeReceiver,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config, portfolio: Portfolio) -> Result<()> {
        let logs = LogBuffer::default();
        logger::init(config.level_filter(), logs.clone())?;

        info!("Starting application...");
        let mut state = State::new(&config, portfolio, logs);
        let changes = state.subscribe();
        let mut app = App {
            state,
            changes,
            config,
        };
        let result = app.start_ui().await;

        app.state.teardown();
        info!("Exiting application...");
        result
    }

    /// Set up the terminal, run the render loop until an exit request or an
    /// unrecoverable error, then restore the terminal either way.
    ///
    async fn start_ui(&mut self) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        enable_raw_mode()?;

        let result = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(mut terminal) => self.run(&mut terminal).await,
            Err(e) => Err(e.into()),
        };

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

        result
    }

    async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        terminal.hide_cursor()?;
        let size = terminal.size()?;
        self.state.mount(size);

        let mut terminal_event_handler =
            TerminalEventHandler::new(self.config.timings.tick_rate());
        let mut dirty = true;
        loop {
            // Drain pending notifications; any of them means the frame is stale.
            if self.changes.try_iter().count() > 0 {
                dirty = true;
            }
            if dirty || self.state.is_animating() {
                if let Ok(size) = terminal.backend().size() {
                    if size != self.state.terminal_size() {
                        self.state.resize(size);
                    }
                }
                terminal.draw(|frame| crate::ui::render(frame, &mut self.state))?;
                dirty = false;
            }
            if !terminal_event_handler.handle_next(&mut self.state).await? {
                debug!("Received application exit request.");
                break;
            }
        }
        terminal.show_cursor()?;
        Ok(())
    }
}
