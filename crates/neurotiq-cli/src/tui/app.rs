//! TUI application state and event loop.
//!
//! The stream driver ticks on its own runtime thread; the UI thread only
//! polls keys and redraws from the driver's window.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use neurotiq_core::{Band, DriverState, Sample, StreamConfig, StreamDriver, StreamReader};

/// Redraw cadence, independent of the tick interval.
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    // Dropped before the runtime so the timer task is cancelled first.
    driver: StreamDriver,
    reader: StreamReader,
    runtime: tokio::runtime::Runtime,
    focus: Band,
    running: bool,
    started: Instant,
}

impl App {
    pub fn new(config: StreamConfig) -> io::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let driver = StreamDriver::new(config).map_err(io::Error::other)?;
        let reader = driver.reader();
        Ok(Self {
            driver,
            reader,
            runtime,
            focus: Band::Alpha,
            running: true,
            started: Instant::now(),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.resume()?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook that restores terminal before printing the panic.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error.
        let _ = std::panic::take_hook();
        self.driver.stop();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        let window = self.snapshot();
        println!(
            "Stopped after {} ticks (window t={}..={})",
            self.reader.ticks(),
            window.first().map_or(0, |s| s.time),
            window.last().map_or(0, |s| s.time),
        );

        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while self.running {
            terminal.draw(|f| super::ui::draw(f, self))?;

            if event::poll(FRAME_INTERVAL)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code)?;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) -> io::Result<()> {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                if self.is_paused() {
                    self.resume()?;
                } else {
                    self.driver.stop();
                }
            }
            KeyCode::Char('b') | KeyCode::Tab => self.focus = self.focus.next(),
            _ => {}
        }
        Ok(())
    }

    fn resume(&mut self) -> io::Result<()> {
        let _guard = self.runtime.enter();
        self.driver.start().map_err(io::Error::other)
    }

    // -----------------------------------------------------------------------
    // Accessors for the renderer
    // -----------------------------------------------------------------------

    pub fn snapshot(&self) -> Vec<Sample> {
        self.reader.snapshot()
    }

    pub fn state(&self) -> DriverState {
        self.driver.state()
    }

    pub fn is_paused(&self) -> bool {
        self.state() == DriverState::Idle
    }

    pub fn ticks(&self) -> u64 {
        self.reader.ticks()
    }

    pub fn capacity(&self) -> usize {
        self.reader.capacity()
    }

    pub fn tick_interval(&self) -> Duration {
        self.driver.tick_interval()
    }

    pub fn focus(&self) -> Band {
        self.focus
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(StreamConfig::default().with_capacity(5).with_seed(Some(1))).unwrap()
    }

    // -----------------------------------------------------------------------
    // Key handling
    // -----------------------------------------------------------------------

    #[test]
    fn quit_keys_stop_the_loop() {
        for key in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = app();
            app.handle_key(key).unwrap();
            assert!(!app.running);
        }
    }

    #[test]
    fn b_cycles_focus_through_all_bands() {
        let mut app = app();
        let mut seen = vec![app.focus()];
        for _ in 0..4 {
            app.handle_key(KeyCode::Char('b')).unwrap();
            seen.push(app.focus());
        }
        assert_eq!(
            seen,
            vec![Band::Alpha, Band::Beta, Band::Theta, Band::Delta, Band::Alpha]
        );
    }

    #[test]
    fn p_toggles_driver() {
        let mut app = app();
        assert!(app.is_paused());

        app.handle_key(KeyCode::Char('p')).unwrap();
        assert_eq!(app.state(), DriverState::Running);

        app.handle_key(KeyCode::Char('p')).unwrap();
        assert_eq!(app.state(), DriverState::Idle);
    }

    #[test]
    fn paused_window_is_frozen() {
        let mut app = app();
        app.handle_key(KeyCode::Char('p')).unwrap();
        app.handle_key(KeyCode::Char('p')).unwrap();
        let frozen = app.snapshot();
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(app.snapshot(), frozen);
        assert_eq!(app.snapshot().len(), app.capacity());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut app = app();
        app.handle_key(KeyCode::Char('z')).unwrap();
        assert!(app.running);
        assert_eq!(app.focus(), Band::Alpha);
    }
}
