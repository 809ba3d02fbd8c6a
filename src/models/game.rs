//! Game state facade - the single owner of the rules engine.
//!
//! Everything outside this module sees the position only through accessors
//! returning domain types, so the engine behind it can be swapped.

use shakmaty::fen::Fen;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, EnPassantMode, File, Move, Position, Role, Square};

use crate::domain::{
    GameError, GameOutcome, MoveError, Piece, PieceColor, PromotionPiece, SquareCoord,
    shakmaty_to_color, shakmaty_to_piece,
};

/// A move as expressed by the board: origin, destination, optional promotion piece
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveCandidate {
    pub from: SquareCoord,
    pub to: SquareCoord,
    /// Ignored for non-promotion moves; queen when absent on a promotion
    pub promotion: Option<PromotionPiece>,
}

impl MoveCandidate {
    pub fn new(from: SquareCoord, to: SquareCoord) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(mut self, piece: PromotionPiece) -> Self {
        self.promotion = Some(piece);
        self
    }
}

/// The live game: current position plus the history needed for repetition draws
#[derive(Clone, Debug)]
pub struct GameModel {
    position: Chess,
    /// Repetition keys of every position reached, current one last
    history: Vec<Zobrist64>,
}

impl GameModel {
    pub fn new() -> Self {
        Self::with_position(Chess::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let invalid = |reason: String| GameError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };
        let parsed = Fen::from_ascii(fen.trim().as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(e.to_string()))?;
        Ok(Self::with_position(position))
    }

    fn with_position(position: Chess) -> Self {
        let history = vec![repetition_key(&position)];
        Self { position, history }
    }

    /// Replace the game with the position described by `fen`. On error the game is unchanged.
    pub fn reset(&mut self, fen: &str) -> Result<(), GameError> {
        *self = Self::from_fen(fen)?;
        Ok(())
    }

    pub fn turn(&self) -> PieceColor {
        shakmaty_to_color(self.position.turn())
    }

    /// FEN of the current position
    pub fn fen(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }

    pub fn get(&self, square: SquareCoord) -> Option<Piece> {
        self.position
            .board()
            .piece_at(square.to_square())
            .map(shakmaty_to_piece)
    }

    /// Play `candidate` on this game. Illegal moves leave it untouched.
    pub fn make_move(&mut self, candidate: &MoveCandidate) -> Result<(), MoveError> {
        let Some(legal) = self.find_legal(candidate) else {
            return Err(MoveError::Illegal {
                from: candidate.from.to_algebraic(),
                to: candidate.to.to_algebraic(),
            });
        };

        match self.position.clone().play(legal) {
            Ok(next) => {
                self.history.push(repetition_key(&next));
                self.position = next;
                Ok(())
            }
            Err(_) => Err(MoveError::EngineRejected {
                from: candidate.from.to_algebraic(),
                to: candidate.to.to_algebraic(),
            }),
        }
    }

    /// Match a candidate against the legal moves of the current position.
    ///
    /// Castling is entered by dragging the king to its destination (g/c file).
    fn find_legal(&self, candidate: &MoveCandidate) -> Option<Move> {
        let from_sq = candidate.from.to_square();
        let to_sq = candidate.to.to_square();
        let wanted_promotion = candidate.promotion.unwrap_or_default().role();

        self.position.legal_moves().into_iter().find(|m| {
            let (move_from, move_to) = match m {
                Move::Normal { from, to, .. } => (*from, *to),
                Move::EnPassant { from, to } => (*from, *to),
                Move::Castle { king, rook } => {
                    let king_dest = if rook.file() == File::H {
                        Square::from_coords(File::G, rook.rank())
                    } else {
                        Square::from_coords(File::C, rook.rank())
                    };
                    (*king, king_dest)
                }
                Move::Put { .. } => return false,
            };
            if move_from != from_sq || move_to != to_sq {
                return false;
            }
            match m.promotion() {
                Some(role) => role == wanted_promotion,
                None => true,
            }
        })
    }

    /// Whether the piece on `from` is a pawn of the side to move
    pub(crate) fn is_pawn_of_side_to_move(&self, from: SquareCoord) -> bool {
        self.position
            .board()
            .piece_at(from.to_square())
            .is_some_and(|p| p.role == Role::Pawn && p.color == self.position.turn())
    }

    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    /// The current position has occurred at least three times
    pub fn is_threefold_repetition(&self) -> bool {
        let Some(current) = self.history.last() else {
            return false;
        };
        self.history.iter().filter(|key| *key == current).count() >= 3
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.position.halfmoves() >= 100
    }

    /// First game-ending condition that holds, if any
    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.is_checkmate() {
            Some(GameOutcome::Checkmate)
        } else if self.is_stalemate() {
            Some(GameOutcome::Stalemate)
        } else if self.is_threefold_repetition() {
            Some(GameOutcome::ThreefoldRepetition)
        } else if self.is_insufficient_material() {
            Some(GameOutcome::InsufficientMaterial)
        } else if self.is_fifty_move_draw() {
            Some(GameOutcome::FiftyMoveRule)
        } else {
            None
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }
}

impl Default for GameModel {
    fn default() -> Self {
        Self::new()
    }
}

fn repetition_key(position: &Chess) -> Zobrist64 {
    position.zobrist_hash(EnPassantMode::Legal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PieceKind;
    use crate::domain::config::STANDARD_START_FEN;

    fn sq(name: &str) -> SquareCoord {
        name.parse().unwrap()
    }

    fn play(game: &mut GameModel, from: &str, to: &str) {
        game.make_move(&MoveCandidate::new(sq(from), sq(to)))
            .unwrap_or_else(|e| panic!("{from}{to}: {e}"));
    }

    #[test]
    fn test_default_is_standard_start() {
        let game = GameModel::new();
        assert_eq!(game.fen(), STANDARD_START_FEN);
        assert_eq!(game.turn(), PieceColor::White);
        assert_eq!(
            game.get(sq("e1")),
            Some(Piece::new(PieceKind::King, PieceColor::White))
        );
        assert_eq!(game.get(sq("e4")), None);
    }

    #[test]
    fn test_invalid_fen_leaves_game_untouched() {
        let mut game = GameModel::new();
        play(&mut game, "e2", "e4");
        let before = game.fen();
        let err = game.reset("not a fen").unwrap_err();
        assert!(matches!(err, GameError::InvalidFen { .. }));
        assert_eq!(game.fen(), before);

        // no kings
        assert!(GameModel::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
    }

    #[test]
    fn test_move_flips_turn_and_updates_fen() {
        let mut game = GameModel::new();
        play(&mut game, "e2", "e4");
        assert_eq!(game.turn(), PieceColor::Black);
        assert!(game.fen().starts_with("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"));
        assert!(game.get(sq("e2")).is_none());
    }

    #[test]
    fn test_illegal_move_is_rejected() {
        let mut game = GameModel::new();
        let before = game.fen();
        let err = game
            .make_move(&MoveCandidate::new(sq("e2"), sq("e5")))
            .unwrap_err();
        assert_eq!(
            err,
            MoveError::Illegal {
                from: "e2".into(),
                to: "e5".into()
            }
        );
        assert_eq!(game.fen(), before);
    }

    #[test]
    fn test_castling_by_king_destination() {
        let mut game =
            GameModel::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        play(&mut game, "e1", "g1");
        assert_eq!(
            game.get(sq("f1")),
            Some(Piece::new(PieceKind::Rook, PieceColor::White))
        );
        play(&mut game, "e8", "c8");
        assert_eq!(
            game.get(sq("d8")),
            Some(Piece::new(PieceKind::Rook, PieceColor::Black))
        );
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let mut game = GameModel::from_fen("8/P7/8/8/8/8/8/4K2k w - - 0 1").unwrap();
        assert!(game.is_pawn_of_side_to_move(sq("a7")));
        play(&mut game, "a7", "a8");
        assert_eq!(
            game.get(sq("a8")),
            Some(Piece::new(PieceKind::Queen, PieceColor::White))
        );
    }

    #[test]
    fn test_threefold_repetition() {
        let mut game = GameModel::new();
        for _ in 0..2 {
            assert!(!game.is_threefold_repetition());
            play(&mut game, "g1", "f3");
            play(&mut game, "g8", "f6");
            play(&mut game, "f3", "g1");
            play(&mut game, "f6", "g8");
        }
        assert!(game.is_threefold_repetition());
        assert_eq!(game.outcome(), Some(GameOutcome::ThreefoldRepetition));
    }

    #[test]
    fn test_outcome_queries() {
        let mate = GameModel::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        assert_eq!(mate.outcome(), Some(GameOutcome::Checkmate));

        let stalemate = GameModel::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(stalemate.outcome(), Some(GameOutcome::Stalemate));

        let bare_kings = GameModel::from_fen("7k/8/8/8/8/8/8/K7 w - - 0 1").unwrap();
        assert_eq!(bare_kings.outcome(), Some(GameOutcome::InsufficientMaterial));

        let fifty = GameModel::from_fen("7k/8/8/8/8/8/1R6/K7 b - - 100 80").unwrap();
        assert_eq!(fifty.outcome(), Some(GameOutcome::FiftyMoveRule));

        assert_eq!(GameModel::new().outcome(), None);
        assert!(!GameModel::new().is_game_over());
    }
}
