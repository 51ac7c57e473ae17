//! App: terminal init, main loop, tick pacing and key handling.

use crate::Args;
use crate::input::{Action, IntentCollector};
use crate::theme::Theme;
use crate::ui::{self, ViewState};
use anyhow::{Result, bail};
use crossterm::event::{self, Event};
use log::info;
use ratatui::DefaultTerminal;
use shricktris::{Game, GameConfig, GameState, TickOutcome};
use std::time::{Duration, Instant};

/// Render frame budget (~60 FPS); ticks run on their own cadence.
const FRAME_DURATION: Duration = Duration::from_millis(16);

pub struct App {
    config: GameConfig,
    theme: Theme,
    game: Game,
    tick_interval: Duration,
    last_tick: Instant,
    input: IntentCollector,
    view: ViewState,
}

impl App {
    pub fn new(args: &Args, config: GameConfig, theme: Theme) -> Result<Self> {
        if !(args.tick_rate.is_finite() && args.tick_rate > 0.0) {
            bail!("tick rate must be a positive number, got {}", args.tick_rate);
        }
        let game = Game::new(&config)?;
        Ok(Self {
            config,
            theme,
            game,
            tick_interval: Duration::from_secs_f64(1.0 / args.tick_rate),
            last_tick: Instant::now(),
            input: IntentCollector::default(),
            view: ViewState::default(),
        })
    }

    fn reset_game(&mut self) -> Result<()> {
        info!("Restarting");
        self.game = Game::new(&self.config)?;
        self.view.reset();
        self.last_tick = Instant::now();
        Ok(())
    }

    /// Shrink the grid so board and sidebar fit the terminal.
    fn fit_to_terminal(&mut self, term_cols: u16, term_rows: u16) -> Result<()> {
        let (max_cols, max_rows) = ui::max_grid_for_terminal(term_cols, term_rows);
        let columns = self.config.columns.min(max_cols);
        let rows = self.config.rows.min(max_rows);
        if (columns, rows) != (self.config.columns, self.config.rows) {
            info!(
                "Playfield {}x{} shrunk to {}x{} to fit the terminal",
                self.config.columns, self.config.rows, columns, rows
            );
            self.config.columns = columns;
            self.config.rows = rows;
            self.game = Game::new(&self.config)?;
        }
        Ok(())
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{
                EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
                size,
            },
        };

        let (term_cols, term_rows) = size()?;
        self.fit_to_terminal(term_cols, term_rows)?;

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal);

        // Restore
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        if result.is_ok() {
            println!("{}", self.game.score().final_summary());
        }
        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let now = Instant::now();
            terminal.draw(|f| ui::draw(f, &self.game, &self.theme, &mut self.view, now))?;

            let timeout = FRAME_DURATION.saturating_sub(now.elapsed());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        let action = self.input.record(key);
                        if action == Action::Restart && self.game.state() == GameState::Stopped {
                            self.reset_game()?;
                        }
                    }
                }
            }

            if self.last_tick.elapsed() >= self.tick_interval {
                self.last_tick = Instant::now();
                let intents = self.input.take();
                if self.game.tick(&intents) == TickOutcome::Quit {
                    return Ok(());
                }
            }
        }
    }
}
