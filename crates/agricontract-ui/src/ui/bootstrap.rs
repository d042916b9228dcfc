use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use agricontract_app::frontend::ui_boundary::{AppController, UiViewConfig};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::input::intent_for_key;
use super::render::draw;

const MIN_TICK_RATE: Duration = Duration::from_millis(16);

/// Owns the terminal for the lifetime of the app. Dropping it restores the
/// user's terminal even when the loop exits with an error.
pub struct Ui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
}

impl Ui {
    pub fn init_with_view_config(config: &UiViewConfig) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            tick_rate: Duration::from_millis(config.tick_rate_ms).max(MIN_TICK_RATE),
        })
    }

    pub fn run(&mut self, controller: &mut AppController) -> io::Result<()> {
        let mut force_draw = true;
        let mut last_tick = Instant::now();
        loop {
            if force_draw {
                self.terminal.draw(|frame| draw(frame, controller))?;
                force_draw = false;
            }

            let timeout = self.tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(intent) = intent_for_key(key, controller.screen()) {
                            force_draw |= controller.apply(intent);
                        }
                    }
                    Event::Resize(_, _) => force_draw = true,
                    _ => {}
                }
            }

            if last_tick.elapsed() >= self.tick_rate {
                force_draw |= controller.tick();
                last_tick = Instant::now();
            }

            if controller.should_quit() {
                tracing::info!("leaving terminal ui");
                break;
            }
        }
        Ok(())
    }
}

impl Drop for Ui {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
    }
}
