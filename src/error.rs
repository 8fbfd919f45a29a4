use std::io;
use thiserror::Error;

/// Failures surfaced by the game engine
#[derive(Debug, Error)]
pub enum GameError {
    /// Bad configuration or an unusable display surface
    #[error("setup failed: {0}")]
    Setup(String),

    #[error("display failed: {0}")]
    Display(#[source] io::Error),

    #[error("key input failed: {0}")]
    Input(#[source] io::Error),

    /// The engine was driven in an order it does not support
    #[error("engine misuse: {0}")]
    Misuse(&'static str),
}

impl GameError {
    /// Fatal errors end the session even after a round has been played.
    /// Without working input there is no way to ask for a replay.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::Input(_) | GameError::Misuse(_))
    }
}
