//! UCI (Universal Chess Interface) protocol types used to drive an engine opponent.
//!
//! Only the subset needed to ask an engine for a reply move is covered: the
//! handshake, setting a position, a timed search and the `bestmove` answer.
//! Process spawning lives in the models layer.

use crate::domain::chess::MoveRequest;

/// UCI commands that can be sent to an engine
#[derive(Debug, Clone, PartialEq)]
pub enum UciCommand {
    /// Initialize UCI mode
    Uci,
    /// Check if engine is ready
    IsReady,
    /// Set a new game
    UciNewGame,
    /// Set position from a FEN
    Position { fen: String },
    /// Search for a fixed time in milliseconds
    GoMovetime(u64),
    /// Stop searching
    Stop,
    /// Quit the engine
    Quit,
}

impl UciCommand {
    /// Convert command to UCI protocol string
    pub fn to_uci_string(&self) -> String {
        match self {
            UciCommand::Uci => "uci".to_string(),
            UciCommand::IsReady => "isready".to_string(),
            UciCommand::UciNewGame => "ucinewgame".to_string(),
            UciCommand::Position { fen } => format!("position fen {}", fen),
            UciCommand::GoMovetime(ms) => format!("go movetime {}", ms),
            UciCommand::Stop => "stop".to_string(),
            UciCommand::Quit => "quit".to_string(),
        }
    }
}

/// Categorized engine output line
#[derive(Debug, Clone, PartialEq)]
pub enum UciOutputKind {
    /// "uciok" - engine is ready for UCI
    UciOk,
    /// "readyok" - engine is ready
    ReadyOk,
    /// "bestmove ..." - best move found
    BestMove(String),
    /// "info ..." - search progress
    Info(String),
    /// Engine identification
    Id(String),
    /// Unknown/other output
    Other(String),
}

impl UciOutputKind {
    /// Parse a raw UCI output line into a categorized type
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        if line == "uciok" {
            UciOutputKind::UciOk
        } else if line == "readyok" {
            UciOutputKind::ReadyOk
        } else if let Some(rest) = line.strip_prefix("bestmove ") {
            UciOutputKind::BestMove(rest.to_string())
        } else if let Some(rest) = line.strip_prefix("info ") {
            UciOutputKind::Info(rest.to_string())
        } else if let Some(rest) = line.strip_prefix("id ") {
            UciOutputKind::Id(rest.to_string())
        } else {
            UciOutputKind::Other(line.to_string())
        }
    }

    /// The move of a `bestmove` line; `None` for other lines and for "(none)"
    pub fn best_move(&self) -> Option<MoveRequest> {
        match self {
            UciOutputKind::BestMove(rest) => {
                rest.split_whitespace().next().and_then(MoveRequest::from_uci)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_fen() {
        let cmd = UciCommand::Position {
            fen: "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1".to_string(),
        };
        assert_eq!(
            cmd.to_uci_string(),
            "position fen rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn test_go_movetime() {
        assert_eq!(UciCommand::GoMovetime(500).to_uci_string(), "go movetime 500");
    }

    #[test]
    fn test_parse_handshake() {
        assert_eq!(UciOutputKind::parse("uciok"), UciOutputKind::UciOk);
        assert_eq!(UciOutputKind::parse("readyok\n"), UciOutputKind::ReadyOk);
        assert!(matches!(
            UciOutputKind::parse("id name Stockfish 16"),
            UciOutputKind::Id(_)
        ));
    }

    #[test]
    fn test_parse_bestmove() {
        let output = UciOutputKind::parse("bestmove e7e5 ponder g1f3");
        let request = output.best_move().unwrap();
        assert_eq!((request.start_file, request.start_rank), (4, 6));
        assert_eq!((request.end_file, request.end_rank), (4, 4));
        assert_eq!(request.promotion, None);
    }

    #[test]
    fn test_parse_bestmove_promotion() {
        let request = UciOutputKind::parse("bestmove b2b1n").best_move().unwrap();
        assert_eq!(request.promotion, Some('n'));
    }

    #[test]
    fn test_bestmove_none() {
        assert!(UciOutputKind::parse("bestmove (none)").best_move().is_none());
        assert!(UciOutputKind::parse("info depth 20 pv e2e4").best_move().is_none());
    }
}
