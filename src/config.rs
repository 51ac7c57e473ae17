//! Construction parameters for a [`Game`](crate::game::Game).

use crate::brick::DIMENSION;
use crate::error::EngineError;

/// Grid columns of the reference game.
pub const DEFAULT_COLUMNS: u16 = 16;
/// Grid rows of the reference game.
pub const DEFAULT_ROWS: u16 = 30;
/// Ticks between gravity steps at the start of a game.
pub const DEFAULT_STEP_INTERVAL: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub columns: u16,
    pub rows: u16,
    /// Initial ticks per gravity step.
    pub step_interval: u32,
    /// Fixed seed for the bag shuffle; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            step_interval: DEFAULT_STEP_INTERVAL,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        let min = u16::from(DIMENSION);
        if self.columns < min || self.rows < min {
            return Err(EngineError::FieldTooSmall {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.step_interval == 0 {
            return Err(EngineError::ZeroStepInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_narrow_field() {
        let config = GameConfig {
            columns: 3,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(EngineError::FieldTooSmall { columns: 3, rows: 30 })
        );
    }

    #[test]
    fn test_rejects_zero_step_interval() {
        let config = GameConfig {
            step_interval: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(EngineError::ZeroStepInterval));
    }
}
