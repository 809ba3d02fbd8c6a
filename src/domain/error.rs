use thiserror::Error;

/// Failures of the game lifecycle (new game, attribute-driven reset)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// Reasons a submitted move is refused. State is never mutated when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Square is outside the board")]
    OutOfBoard,
    #[error("Unknown promotion piece {0:?}")]
    InvalidPromotion(char),
    #[error("Illegal move {from}{to}")]
    Illegal { from: String, to: String },
    #[error("No programmatic move is expected, the side to move is human-controlled")]
    NotExpected,
    #[error("The game is over")]
    GameOver,
    #[error("Rules engine refused validated move {from}{to}")]
    EngineRejected { from: String, to: String },
}
