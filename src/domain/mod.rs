pub mod chess;
pub mod config;
pub mod coords;
pub mod error;
pub mod outcome;
pub mod uci;

pub use chess::{
    MoveRequest, Piece, PieceColor, PieceKind, PromotionPiece, SquareCoord, shakmaty_to_color,
    shakmaty_to_piece,
};
pub use config::{BoardAttributes, BoardConfiguration, RgbaColor};
pub use coords::{BoardGeometry, CellIndex, Orientation, PixelPoint};
pub use error::{GameError, MoveError};
pub use outcome::{GameEvent, GameOutcome};
