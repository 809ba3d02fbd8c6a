//! Move submission gate - checks candidate moves before they touch the live game.

use crate::domain::MoveError;
use crate::models::game::{GameModel, MoveCandidate};

/// Whether `candidate` is legal, decided by playing it on a throwaway copy of the game
pub fn validate(game: &GameModel, candidate: &MoveCandidate) -> bool {
    let mut preview = game.clone();
    preview.make_move(candidate).is_ok()
}

/// True iff a pawn of the side to move lands on its far rank
pub fn is_promotion_candidate(game: &GameModel, candidate: &MoveCandidate) -> bool {
    game.is_pawn_of_side_to_move(candidate.from)
        && candidate.to.rank() == game.turn().promotion_rank()
}

/// Apply a validated move to the live game.
///
/// A refusal here means validation and the engine disagree; it is logged and the game is left as it was.
pub fn commit(game: &mut GameModel, candidate: &MoveCandidate) -> Result<(), MoveError> {
    game.make_move(candidate).inspect_err(|err| {
        log::error!(
            "rules engine refused {}{} after validation: {}",
            candidate.from,
            candidate.to,
            err
        );
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PieceColor, PromotionPiece, SquareCoord};

    fn candidate(from: &str, to: &str) -> MoveCandidate {
        MoveCandidate::new(from.parse().unwrap(), to.parse().unwrap())
    }

    #[test]
    fn test_validate_does_not_touch_live_game() {
        let game = GameModel::new();
        let before = game.fen();
        assert!(validate(&game, &candidate("e2", "e4")));
        assert!(!validate(&game, &candidate("e2", "e5")));
        assert_eq!(game.fen(), before);
    }

    #[test]
    fn test_commit_changes_turn_for_every_legal_reply() {
        let game = GameModel::new();
        let mut legal = 0;
        for from in SquareCoord::all() {
            for to in SquareCoord::all() {
                let c = MoveCandidate::new(from, to);
                if !validate(&game, &c) {
                    continue;
                }
                legal += 1;
                let mut live = game.clone();
                commit(&mut live, &c).unwrap();
                assert_eq!(live.turn(), PieceColor::Black);
                assert_ne!(live.fen(), game.fen());
            }
        }
        assert_eq!(legal, 20);
    }

    #[test]
    fn test_promotion_candidate() {
        let game = GameModel::from_fen("8/P7/8/8/8/8/7p/4K2k w - - 0 1").unwrap();
        assert!(is_promotion_candidate(&game, &candidate("a7", "a8")));
        assert!(!is_promotion_candidate(&game, &candidate("e1", "e2")));
        // black pawn, but white to move
        assert!(!is_promotion_candidate(&game, &candidate("h2", "h1")));
    }

    #[test]
    fn test_commit_with_chosen_promotion() {
        let mut game = GameModel::from_fen("8/P7/8/8/8/8/8/4K2k w - - 0 1").unwrap();
        let c = candidate("a7", "a8").with_promotion(PromotionPiece::Rook);
        commit(&mut game, &c).unwrap();
        assert!(game.fen().starts_with("R7/"));
    }

    #[test]
    fn test_commit_rejects_illegal_without_mutation() {
        let mut game = GameModel::new();
        let before = game.fen();
        assert!(commit(&mut game, &candidate("a1", "a5")).is_err());
        assert_eq!(game.fen(), before);
    }
}
