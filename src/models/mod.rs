mod board;
mod engine;
mod game;
pub mod gate;

pub use board::{BoardModel, DragState, Interaction, LastMove, PendingPromotion, Redraw};
pub use engine::{EngineModel, EngineReply};
pub use game::{GameModel, MoveCandidate};
