//! Game-end outcomes and the events the board reports to its host.

use schemars::JsonSchema;
use serde::Serialize;

use crate::domain::chess::{PieceColor, SquareCoord};

/// Why a game ended, in the order the checks are made
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameOutcome {
    Checkmate,
    Stalemate,
    ThreefoldRepetition,
    InsufficientMaterial,
    FiftyMoveRule,
}

/// Notifications emitted by the board
#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new game was set up; no move has been played yet
    GameStarted {
        side_to_move: PieceColor,
        fen: String,
    },
    Checkmate {
        side_to_move: PieceColor,
        white_turn_before_move: bool,
    },
    Stalemate {
        side_to_move: PieceColor,
    },
    PerpetualDraw {
        side_to_move: PieceColor,
    },
    MissingMaterialDraw {
        side_to_move: PieceColor,
    },
    FiftyMovesDraw {
        side_to_move: PieceColor,
    },
    MovePlayed {
        from: SquareCoord,
        to: SquareCoord,
        fen: String,
    },
    ExternalMoveExpected {
        side_to_move: PieceColor,
        fen: String,
    },
}

impl GameEvent {
    /// Event announcing `outcome`, with `side_to_move` being the side that can no longer move
    pub fn for_outcome(outcome: GameOutcome, side_to_move: PieceColor) -> Self {
        match outcome {
            GameOutcome::Checkmate => GameEvent::Checkmate {
                side_to_move,
                white_turn_before_move: side_to_move == PieceColor::Black,
            },
            GameOutcome::Stalemate => GameEvent::Stalemate { side_to_move },
            GameOutcome::ThreefoldRepetition => GameEvent::PerpetualDraw { side_to_move },
            GameOutcome::InsufficientMaterial => GameEvent::MissingMaterialDraw { side_to_move },
            GameOutcome::FiftyMoveRule => GameEvent::FiftyMovesDraw { side_to_move },
        }
    }

    pub fn is_game_end(&self) -> bool {
        !matches!(
            self,
            GameEvent::GameStarted { .. }
                | GameEvent::MovePlayed { .. }
                | GameEvent::ExternalMoveExpected { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkmate_records_mover() {
        let event = GameEvent::for_outcome(GameOutcome::Checkmate, PieceColor::Black);
        assert_eq!(
            event,
            GameEvent::Checkmate {
                side_to_move: PieceColor::Black,
                white_turn_before_move: true,
            }
        );
        assert!(event.is_game_end());
    }

    #[test]
    fn test_each_outcome_has_distinct_event() {
        let outcomes = [
            GameOutcome::Checkmate,
            GameOutcome::Stalemate,
            GameOutcome::ThreefoldRepetition,
            GameOutcome::InsufficientMaterial,
            GameOutcome::FiftyMoveRule,
        ];
        let events: Vec<_> = outcomes
            .iter()
            .map(|o| GameEvent::for_outcome(*o, PieceColor::White))
            .collect();
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                assert_ne!(std::mem::discriminant(a), std::mem::discriminant(b));
            }
        }
    }

    #[test]
    fn test_game_end_wire_format() {
        let draw = GameEvent::PerpetualDraw {
            side_to_move: PieceColor::White,
        };
        assert_eq!(
            serde_json::to_value(&draw).unwrap(),
            serde_json::json!({"type": "perpetual_draw", "side_to_move": "white"})
        );

        let mate = GameEvent::for_outcome(GameOutcome::Checkmate, PieceColor::Black);
        assert_eq!(
            serde_json::to_value(&mate).unwrap(),
            serde_json::json!({
                "type": "checkmate",
                "side_to_move": "black",
                "white_turn_before_move": true,
            })
        );

        let names: Vec<_> = [
            GameOutcome::Stalemate,
            GameOutcome::InsufficientMaterial,
            GameOutcome::FiftyMoveRule,
        ]
        .iter()
        .map(|o| serde_json::to_value(GameEvent::for_outcome(*o, PieceColor::White)).unwrap())
        .map(|value| value["type"].as_str().unwrap().to_string())
        .collect();
        assert_eq!(
            names,
            ["stalemate", "missing_material_draw", "fifty_moves_draw"]
        );
    }

    #[test]
    fn test_move_events_wire_format() {
        let played = GameEvent::MovePlayed {
            from: "e2".parse().unwrap(),
            to: "e4".parse().unwrap(),
            fen: "fen".into(),
        };
        let value = serde_json::to_value(&played).unwrap();
        assert_eq!(value["type"], "move_played");
        assert_eq!(value["fen"], "fen");
        assert!(!played.is_game_end());

        let started = GameEvent::GameStarted {
            side_to_move: PieceColor::White,
            fen: "fen".into(),
        };
        assert_eq!(serde_json::to_value(&started).unwrap()["type"], "game_started");
        assert!(!started.is_game_end());
    }
}
