//! Coordinate mapping between board-local pixels, screen cells and squares.
//!
//! The board is drawn as a 9x9 grid of `board_size / 9` cells: a half-cell
//! margin on every side holds the coordinate labels and the 8x8 playing area
//! sits in between. Pixel points are relative to the board's top-left corner.

use crate::domain::chess::SquareCoord;

/// Viewing side of the board
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Orientation {
    /// White at the bottom, a1 in the bottom-left corner
    #[default]
    Normal,
    /// Black at the bottom, a1 in the top-right corner
    Reversed,
}

impl Orientation {
    pub fn from_reversed(reversed: bool) -> Self {
        if reversed {
            Orientation::Reversed
        } else {
            Orientation::Normal
        }
    }

    pub fn is_reversed(self) -> bool {
        self == Orientation::Reversed
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Screen cell of the playing area: column 0 is leftmost, row 0 is topmost
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellIndex {
    col: u8,
    row: u8,
}

impl CellIndex {
    /// Create a cell, returning None if either index is outside 0..=7
    pub fn new(col: u8, row: u8) -> Option<Self> {
        if col < 8 && row < 8 {
            Some(Self { col, row })
        } else {
            None
        }
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    /// All 64 cells, row by row from the top
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| CellIndex { col, row }))
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BoardGeometry {
    board_size: f32,
    orientation: Orientation,
}

impl BoardGeometry {
    pub fn new(board_size: f32, orientation: Orientation) -> Self {
        Self {
            board_size,
            orientation,
        }
    }

    pub fn board_size(&self) -> f32 {
        self.board_size
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn cell_size(&self) -> f32 {
        self.board_size / 9.0
    }

    /// Width of the label border around the playing area
    pub fn margin(&self) -> f32 {
        self.cell_size() * 0.5
    }

    /// Screen cell under a point, if it falls inside the 8x8 area
    pub fn pixel_to_cell(&self, point: PixelPoint) -> Option<CellIndex> {
        let cell_size = self.cell_size();
        if !point.x.is_finite() || !point.y.is_finite() || cell_size <= 0.0 {
            return None;
        }
        let col = ((point.x - self.margin()) / cell_size).floor();
        let row = ((point.y - self.margin()) / cell_size).floor();
        if (0.0..8.0).contains(&col) && (0.0..8.0).contains(&row) {
            Some(CellIndex {
                col: col as u8,
                row: row as u8,
            })
        } else {
            None
        }
    }

    pub fn cell_to_square(&self, cell: CellIndex) -> SquareCoord {
        let (file, rank) = match self.orientation {
            Orientation::Normal => (cell.col, 7 - cell.row),
            Orientation::Reversed => (7 - cell.col, cell.row),
        };
        // CellIndex::new keeps both indices in 0..=7
        SquareCoord::new(file, rank).unwrap_or_else(|| unreachable!("cell out of range"))
    }

    pub fn square_to_cell(&self, square: SquareCoord) -> CellIndex {
        match self.orientation {
            Orientation::Normal => CellIndex {
                col: square.file(),
                row: 7 - square.rank(),
            },
            Orientation::Reversed => CellIndex {
                col: 7 - square.file(),
                row: square.rank(),
            },
        }
    }

    pub fn pixel_to_square(&self, point: PixelPoint) -> Option<SquareCoord> {
        self.pixel_to_cell(point).map(|cell| self.cell_to_square(cell))
    }

    /// Top-left corner of a screen cell
    pub fn cell_origin(&self, cell: CellIndex) -> PixelPoint {
        let cell_size = self.cell_size();
        PixelPoint::new(
            self.margin() + cell.col as f32 * cell_size,
            self.margin() + cell.row as f32 * cell_size,
        )
    }

    pub fn square_origin(&self, square: SquareCoord) -> PixelPoint {
        self.cell_origin(self.square_to_cell(square))
    }

    pub fn square_center(&self, square: SquareCoord) -> PixelPoint {
        let origin = self.square_origin(square);
        let half = self.cell_size() * 0.5;
        PixelPoint::new(origin.x + half, origin.y + half)
    }

    /// Whether the point lies on the board rectangle (margins included)
    pub fn contains(&self, point: PixelPoint) -> bool {
        (0.0..=self.board_size).contains(&point.x) && (0.0..=self.board_size).contains(&point.y)
    }

    /// Top-left corner for a glyph held at `point`, kept inside the board.
    /// `None` once the pointer has left the board rectangle.
    pub fn clamp_drag(&self, point: PixelPoint) -> Option<PixelPoint> {
        if !self.contains(point) {
            return None;
        }
        let cell_size = self.cell_size();
        let upper = (self.board_size - cell_size).max(0.0);
        Some(PixelPoint::new(
            (point.x - cell_size * 0.5).clamp(0.0, upper),
            (point.y - cell_size * 0.5).clamp(0.0, upper),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> SquareCoord {
        name.parse().unwrap()
    }

    #[test]
    fn test_center_round_trip_both_orientations() {
        for orientation in [Orientation::Normal, Orientation::Reversed] {
            let geometry = BoardGeometry::new(450.0, orientation);
            for square in SquareCoord::all() {
                let center = geometry.square_center(square);
                assert_eq!(geometry.pixel_to_square(center), Some(square));
            }
        }
    }

    #[test]
    fn test_normal_orientation_corners() {
        let geometry = BoardGeometry::new(900.0, Orientation::Normal);
        // cell 100, margin 50
        assert_eq!(geometry.pixel_to_square(PixelPoint::new(60.0, 60.0)), Some(sq("a8")));
        assert_eq!(geometry.pixel_to_square(PixelPoint::new(840.0, 840.0)), Some(sq("h1")));
        assert_eq!(geometry.pixel_to_square(PixelPoint::new(60.0, 840.0)), Some(sq("a1")));
    }

    #[test]
    fn test_reversed_orientation_corners() {
        let geometry = BoardGeometry::new(900.0, Orientation::Reversed);
        assert_eq!(geometry.pixel_to_square(PixelPoint::new(60.0, 60.0)), Some(sq("h1")));
        assert_eq!(geometry.pixel_to_square(PixelPoint::new(840.0, 840.0)), Some(sq("a8")));
    }

    #[test]
    fn test_margin_is_out_of_bounds() {
        let geometry = BoardGeometry::new(900.0, Orientation::Normal);
        assert_eq!(geometry.pixel_to_square(PixelPoint::new(49.0, 400.0)), None);
        assert_eq!(geometry.pixel_to_square(PixelPoint::new(400.0, 851.0)), None);
        assert_eq!(geometry.pixel_to_square(PixelPoint::new(-10.0, -10.0)), None);
        assert_eq!(geometry.pixel_to_square(PixelPoint::new(f32::NAN, 400.0)), None);
    }

    #[test]
    fn test_clamp_drag_keeps_glyph_on_board() {
        let geometry = BoardGeometry::new(900.0, Orientation::Normal);
        let clamped = geometry.clamp_drag(PixelPoint::new(10.0, 895.0)).unwrap();
        assert_eq!(clamped, PixelPoint::new(0.0, 800.0));

        let centered = geometry.clamp_drag(PixelPoint::new(450.0, 450.0)).unwrap();
        assert_eq!(centered, PixelPoint::new(400.0, 400.0));

        assert!(geometry.clamp_drag(PixelPoint::new(901.0, 450.0)).is_none());
        assert!(geometry.clamp_drag(PixelPoint::new(450.0, -1.0)).is_none());
    }

    #[test]
    fn test_orientation_from_flag() {
        assert!(Orientation::from_reversed(true).is_reversed());
        assert!(!Orientation::from_reversed(false).is_reversed());
    }

    #[test]
    fn test_cell_index_rejects_out_of_range() {
        assert!(CellIndex::new(0, 9).is_none());
        assert!(CellIndex::new(8, 0).is_none());
        assert!(CellIndex::new(u8::MAX, u8::MAX).is_none());
        let corner = CellIndex::new(7, 7).unwrap();
        assert_eq!((corner.col(), corner.row()), (7, 7));
        assert_eq!(CellIndex::all().count(), 64);
    }

    #[test]
    fn test_cell_square_round_trip() {
        for orientation in [Orientation::Normal, Orientation::Reversed] {
            let geometry = BoardGeometry::new(450.0, orientation);
            for cell in CellIndex::all() {
                let square = geometry.cell_to_square(cell);
                assert_eq!(geometry.square_to_cell(square), cell);
            }
        }
    }
}
