//! Game controller: pause/run/stop state machine, gravity cadence, spawning and scoring.

use crate::bag::PieceGenerator;
use crate::brick::ColorKey;
use crate::config::GameConfig;
use crate::error::EngineError;
use crate::field::Field;
use crate::figure::Figure;
use crate::score::Score;
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Waiting for the first pause toggle.
    NotStarted,
    Paused,
    Running,
    /// Game over. Terminal.
    Stopped,
}

/// Intents requested during one tick. Level-triggered: a held key repeats every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub quit: bool,
    pub pause: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub soft_drop: bool,
    pub hard_drop: bool,
    pub rotate: bool,
    pub speed_up: bool,
    pub speed_down: bool,
}

impl Intents {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Owns the field, score, generator and the current and next figures.
#[derive(Debug, Clone)]
pub struct Game {
    field: Field,
    score: Score,
    generator: PieceGenerator,
    figure: Figure,
    next_figure: Figure,
    state: GameState,
    step_interval: u32,
    ticks: u32,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let field = Field::new(config.columns, config.rows);
        let generator = match config.seed {
            Some(seed) => PieceGenerator::seeded(field.columns(), seed),
            None => PieceGenerator::new(field.columns()),
        };
        Ok(Self::from_parts(field, generator, config.step_interval))
    }

    fn from_parts(field: Field, mut generator: PieceGenerator, step_interval: u32) -> Self {
        let figure = generator.next();
        let next_figure = generator.next();
        debug!("Next figure: {}", next_figure.name());
        Self {
            field,
            score: Score::new(),
            generator,
            figure,
            next_figure,
            state: GameState::NotStarted,
            step_interval,
            ticks: 0,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    /// The falling figure; after game over, the figure that could not spawn.
    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn next_figure(&self) -> &Figure {
        &self.next_figure
    }

    pub fn step_interval(&self) -> u32 {
        self.step_interval
    }

    /// Every grid cell as (x, y, colour key or `None` when empty).
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Option<ColorKey>)> + '_ {
        self.field.iter().map(|(x, y, cell)| (x, y, cell.color_key()))
    }

    /// Advances the game by one tick.
    pub fn tick(&mut self, intents: &Intents) -> TickOutcome {
        if intents.speed_up {
            self.set_step_interval(self.step_interval.saturating_sub(1));
        }
        if intents.speed_down {
            self.set_step_interval(self.step_interval.saturating_add(1));
        }
        if intents.pause {
            self.toggle_pause();
        }
        if intents.quit {
            info!("Quitting...");
            return TickOutcome::Quit;
        }

        if self.state == GameState::Running {
            self.move_figure(intents);
            self.ticks = (self.ticks + 1) % self.step_interval;
            if self.ticks == 0 {
                self.advance();
            }
        }
        TickOutcome::Continue
    }

    fn set_step_interval(&mut self, step_interval: u32) {
        let step_interval = step_interval.max(1);
        if step_interval != self.step_interval {
            self.step_interval = step_interval;
            debug!("game_stepover = {}", self.step_interval);
        }
    }

    fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::NotStarted => {
                info!("Game started");
                GameState::Running
            }
            GameState::Paused => {
                info!("Resumed");
                GameState::Running
            }
            GameState::Running => {
                info!("Paused");
                GameState::Paused
            }
            GameState::Stopped => GameState::Stopped,
        };
    }

    fn move_figure(&mut self, intents: &Intents) {
        if intents.move_left {
            self.figure.move_left(&self.field);
        }
        if intents.move_right {
            self.figure.move_right(&self.field);
        }
        if intents.soft_drop {
            self.figure.step_down(&mut self.field);
        }
        if intents.hard_drop {
            self.figure.fall_to_bottom(&mut self.field);
        }
        if intents.rotate {
            self.figure.rotate(&self.field);
        }
    }

    /// Forced gravity step, line resolution and, once locked, the next spawn.
    fn advance(&mut self) {
        self.figure.step_down(&mut self.field);

        let lines = self.field.resolve_lines();
        if lines > 0 {
            self.score.add_lines(lines);
            info!("{}", self.score.current_summary());
            self.set_step_interval(self.step_interval - 1);
        }

        if self.figure.is_frozen() {
            self.spawn_next();
        }
    }

    fn spawn_next(&mut self) {
        self.figure = std::mem::replace(&mut self.next_figure, self.generator.next());
        if self.field.collides(self.figure.cells()) {
            self.state = GameState::Stopped;
            info!("Game finished. {}", self.score.final_summary());
        } else {
            debug!("Next figure: {}", self.next_figure.name());
        }
    }
}
