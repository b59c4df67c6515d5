use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid difficulty: dimensions must be nonzero and mines must leave at least one safe cell")]
    InvalidDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
