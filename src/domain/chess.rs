//! Pure chess vocabulary for the widget.
//! No GPUI dependencies - this is the domain layer.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shakmaty::{Color as SColor, File, Rank, Role, Square};

use crate::domain::error::MoveError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    /// Rank a pawn of this color promotes on
    pub fn promotion_rank(self) -> u8 {
        match self {
            PieceColor::White => 7,
            PieceColor::Black => 0,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    /// Asset path of the glyph for this piece
    pub fn svg_path(&self) -> &'static str {
        match (self.kind, self.color) {
            (PieceKind::Pawn, PieceColor::White) => "assets/pawn-white.svg",
            (PieceKind::Pawn, PieceColor::Black) => "assets/pawn-black.svg",
            (PieceKind::Rook, PieceColor::White) => "assets/rook-white.svg",
            (PieceKind::Rook, PieceColor::Black) => "assets/rook-black.svg",
            (PieceKind::Knight, PieceColor::White) => "assets/knight-white.svg",
            (PieceKind::Knight, PieceColor::Black) => "assets/knight-black.svg",
            (PieceKind::Bishop, PieceColor::White) => "assets/bishop-white.svg",
            (PieceKind::Bishop, PieceColor::Black) => "assets/bishop-black.svg",
            (PieceKind::Queen, PieceColor::White) => "assets/queen-white.svg",
            (PieceKind::Queen, PieceColor::Black) => "assets/queen-black.svg",
            (PieceKind::King, PieceColor::White) => "assets/king-white.svg",
            (PieceKind::King, PieceColor::Black) => "assets/king-black.svg",
        }
    }

    /// Unicode chess symbol, drawn when the SVG asset is missing
    pub fn symbol(&self) -> char {
        let white = match self.kind {
            PieceKind::King => '\u{2654}',
            PieceKind::Queen => '\u{2655}',
            PieceKind::Rook => '\u{2656}',
            PieceKind::Bishop => '\u{2657}',
            PieceKind::Knight => '\u{2658}',
            PieceKind::Pawn => '\u{2659}',
        };
        match self.color {
            // black symbols follow the white ones
            PieceColor::White => white,
            PieceColor::Black => char::from_u32(white as u32 + 6).unwrap_or(white),
        }
    }
}

/// Piece a pawn may promote to
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PromotionPiece {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionPiece {
    /// Order of the choices in the promotion dialog
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Queen,
        PromotionPiece::Rook,
        PromotionPiece::Bishop,
        PromotionPiece::Knight,
    ];

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'q' => Some(PromotionPiece::Queen),
            'r' => Some(PromotionPiece::Rook),
            'b' => Some(PromotionPiece::Bishop),
            'n' => Some(PromotionPiece::Knight),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            PromotionPiece::Queen => 'q',
            PromotionPiece::Rook => 'r',
            PromotionPiece::Bishop => 'b',
            PromotionPiece::Knight => 'n',
        }
    }

    pub fn kind(self) -> PieceKind {
        match self {
            PromotionPiece::Queen => PieceKind::Queen,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Knight => PieceKind::Knight,
        }
    }

    pub fn role(self) -> Role {
        match self {
            PromotionPiece::Queen => Role::Queen,
            PromotionPiece::Rook => Role::Rook,
            PromotionPiece::Bishop => Role::Bishop,
            PromotionPiece::Knight => Role::Knight,
        }
    }
}

/// Zero-based board coordinate: file 0 = "a", rank 0 = "1".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, JsonSchema)]
pub struct SquareCoord {
    file: u8,
    rank: u8,
}

impl SquareCoord {
    /// Returns `None` when either axis is outside 0..=7
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    pub fn file(&self) -> u8 {
        self.file
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Algebraic name such as "e4"
    pub fn to_algebraic(&self) -> String {
        let file = char::from(b'a' + self.file);
        let rank = char::from(b'1' + self.rank);
        format!("{}{}", file, rank)
    }

    /// All 64 squares, a1 first
    pub fn all() -> impl Iterator<Item = SquareCoord> {
        (0..8).flat_map(|rank| (0..8).map(move |file| SquareCoord { file, rank }))
    }

    pub fn to_square(self) -> Square {
        Square::from_coords(File::new(self.file as u32), Rank::new(self.rank as u32))
    }
}

impl fmt::Display for SquareCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_algebraic())
    }
}

impl FromStr for SquareCoord {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(MoveError::OutOfBoard);
        }
        let file = bytes[0].to_ascii_lowercase().wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        SquareCoord::new(file, rank).ok_or(MoveError::OutOfBoard)
    }
}

/// A move submitted by the host, expressed as raw file/rank indices.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveRequest {
    pub start_file: i32,
    pub start_rank: i32,
    pub end_file: i32,
    pub end_rank: i32,
    /// Promotion letter (`q`, `r`, `b`, `n`); queen when absent
    pub promotion: Option<char>,
}

impl MoveRequest {
    pub fn new(from: SquareCoord, to: SquareCoord, promotion: Option<char>) -> Self {
        Self {
            start_file: from.file as i32,
            start_rank: from.rank as i32,
            end_file: to.file as i32,
            end_rank: to.rank as i32,
            promotion,
        }
    }

    /// Parse long algebraic notation ("e2e4", "a7a8n")
    pub fn from_uci(text: &str) -> Option<Self> {
        let text = text.trim();
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return None;
        }
        let from: SquareCoord = text[0..2].parse().ok()?;
        let to: SquareCoord = text[2..4].parse().ok()?;
        let promotion = text[4..].chars().next();
        if let Some(letter) = promotion {
            PromotionPiece::from_letter(letter)?;
        }
        Some(Self::new(from, to, promotion))
    }
}

/// Convert shakmaty piece to our domain Piece
pub fn shakmaty_to_piece(piece: shakmaty::Piece) -> Piece {
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };
    Piece {
        kind,
        color: shakmaty_to_color(piece.color),
    }
}

pub fn shakmaty_to_color(color: SColor) -> PieceColor {
    match color {
        SColor::White => PieceColor::White,
        SColor::Black => PieceColor::Black,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algebraic_corners() {
        assert_eq!(SquareCoord::new(0, 0).unwrap().to_algebraic(), "a1");
        assert_eq!(SquareCoord::new(7, 7).unwrap().to_algebraic(), "h8");
        assert_eq!(SquareCoord::new(4, 3).unwrap().to_algebraic(), "e4");
    }

    #[test]
    fn test_square_rejects_out_of_range() {
        assert!(SquareCoord::new(8, 0).is_none());
        assert!(SquareCoord::new(0, 8).is_none());
    }

    #[test]
    fn test_parse_square() {
        let sq: SquareCoord = "e4".parse().unwrap();
        assert_eq!((sq.file(), sq.rank()), (4, 3));
        assert!("i4".parse::<SquareCoord>().is_err());
        assert!("e9".parse::<SquareCoord>().is_err());
        assert!("e".parse::<SquareCoord>().is_err());
    }

    #[test]
    fn test_square_matches_shakmaty() {
        for sq in SquareCoord::all() {
            assert_eq!(sq.to_square().to_string(), sq.to_algebraic());
        }
        assert_eq!(SquareCoord::all().count(), 64);
    }

    #[test]
    fn test_move_request_from_uci() {
        let req = MoveRequest::from_uci("e7e8q").unwrap();
        assert_eq!((req.start_file, req.start_rank), (4, 6));
        assert_eq!((req.end_file, req.end_rank), (4, 7));
        assert_eq!(req.promotion, Some('q'));

        assert!(MoveRequest::from_uci("e2e4").unwrap().promotion.is_none());
        assert!(MoveRequest::from_uci("e2").is_none());
        assert!(MoveRequest::from_uci("e7e8x").is_none());
        assert!(MoveRequest::from_uci("(none)").is_none());
    }

    #[test]
    fn test_promotion_letters() {
        for piece in PromotionPiece::ALL {
            assert_eq!(PromotionPiece::from_letter(piece.letter()), Some(piece));
        }
        assert_eq!(PromotionPiece::from_letter('N'), Some(PromotionPiece::Knight));
        assert_eq!(PromotionPiece::from_letter('k'), None);
    }

    #[test]
    fn test_piece_symbols() {
        assert_eq!(Piece::new(PieceKind::King, PieceColor::White).symbol(), '♔');
        assert_eq!(Piece::new(PieceKind::Pawn, PieceColor::Black).symbol(), '♟');
        assert_eq!(Piece::new(PieceKind::Knight, PieceColor::Black).symbol(), '♞');
    }
}
