//! Construction-time errors of the engine.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("field of {columns}x{rows} cells cannot hold a {min}x{min} brick box", min = crate::brick::DIMENSION)]
    FieldTooSmall { columns: u16, rows: u16 },
    #[error("step interval must be at least one tick")]
    ZeroStepInterval,
}
