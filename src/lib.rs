//! Shricktris engine: a tick-driven falling-block game state.
//!
//! The host owns the clock. Each tick it builds an [`Intents`] snapshot from its
//! input layer, calls [`Game::tick`], then renders from the read-only queries
//! ([`Game::cells`], [`Game::figure`], [`Game::next_figure`], [`Game::score`],
//! [`Game::state`]).

pub mod bag;
pub mod brick;
pub mod config;
pub mod error;
pub mod field;
pub mod figure;
pub mod game;
pub mod score;

pub use bag::PieceGenerator;
pub use brick::{Brick, BrickKind, ColorKey};
pub use config::GameConfig;
pub use error::EngineError;
pub use field::{Cell, Field};
pub use figure::Figure;
pub use game::{Game, GameState, Intents, TickOutcome};
pub use score::{FinalSummary, Score, ScoreSummary};
