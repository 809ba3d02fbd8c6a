//! Board layout calculations - decoration geometry in board-local pixels.
//!
//! Everything here is derived from a [`BoardGeometry`]: label slots around
//! the 8x8 area, the turn indicator, the drag cross-hair, the last-move
//! arrow polygons and the promotion dialog frame.

use std::f32::consts::PI;

use crate::domain::{BoardGeometry, CellIndex, PixelPoint, SquareCoord};
use crate::ui::theme::{LABEL_SCALE, PIECE_SCALE};

const ARROW_HALF_THICKNESS: f32 = 0.08; // relative to cell size
const ARROW_HEAD_LENGTH: f32 = 0.4; // relative to shaft length
const ARROW_HEAD_ANGLE: f32 = 3.0 * PI / 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub origin: PixelPoint,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: PixelPoint::new(x, y),
            width,
            height,
        }
    }

    pub fn contains(&self, point: PixelPoint) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.width
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.height
    }
}

pub type Quad = [PixelPoint; 4];

/// Last-move arrow: a shaft, two head barbs and a joint at the tip
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowShape {
    pub shaft: Quad,
    pub barbs: [Quad; 2],
    pub tip: Quad,
}

impl ArrowShape {
    pub fn polygons(&self) -> [&Quad; 4] {
        [&self.shaft, &self.barbs[0], &self.barbs[1], &self.tip]
    }
}

/// Drag feedback: origin cell, the target's row and column bands, target cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossHair {
    pub origin: Rect,
    pub row: Rect,
    pub column: Rect,
    pub target: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialogLayout {
    pub frame: Rect,
    pub title: Rect,
    /// Choice slots in display order
    pub choices: [Rect; 4],
    pub font_size: f32,
}

/// Handles all layout calculations for the board decorations
#[derive(Clone, Copy, Debug)]
pub struct BoardLayout {
    pub geometry: BoardGeometry,
}

impl BoardLayout {
    pub fn new(geometry: BoardGeometry) -> Self {
        Self { geometry }
    }

    pub fn square_size(&self) -> f32 {
        self.geometry.cell_size()
    }

    pub fn piece_size(&self) -> f32 {
        self.square_size() * PIECE_SCALE
    }

    pub fn label_font_size(&self) -> f32 {
        self.square_size() * LABEL_SCALE
    }

    pub fn board_total_size(&self) -> f32 {
        self.geometry.board_size()
    }

    /// Screen cell rectangle
    pub fn cell_rect(&self, cell: CellIndex) -> Rect {
        let origin = self.geometry.cell_origin(cell);
        let size = self.square_size();
        Rect::new(origin.x, origin.y, size, size)
    }

    pub fn square_rect(&self, square: SquareCoord) -> Rect {
        self.cell_rect(self.geometry.square_to_cell(square))
    }

    /// Label slot above (`top`) or below a screen column
    pub fn file_label_rect(&self, col: u8, top: bool) -> Rect {
        let cell = self.square_size();
        let margin = self.geometry.margin();
        let y = if top { 0.0 } else { margin + 8.0 * cell };
        Rect::new(margin + col as f32 * cell, y, cell, margin)
    }

    /// Label slot left (`left`) or right of a screen row
    pub fn rank_label_rect(&self, row: u8, left: bool) -> Rect {
        let cell = self.square_size();
        let margin = self.geometry.margin();
        let x = if left { 0.0 } else { margin + 8.0 * cell };
        Rect::new(x, margin + row as f32 * cell, margin, cell)
    }

    /// Bottom-right corner slot
    pub fn turn_indicator_rect(&self) -> Rect {
        let margin = self.geometry.margin();
        let start = margin + 8.0 * self.square_size();
        Rect::new(start, start, margin, margin)
    }

    /// `None` while the pointer is outside the 8x8 area
    pub fn cross_hair(&self, origin: SquareCoord, pointer: PixelPoint) -> Option<CrossHair> {
        let target = self.geometry.pixel_to_cell(pointer)?;
        let cell = self.square_size();
        let margin = self.geometry.margin();
        let target_rect = self.cell_rect(target);
        Some(CrossHair {
            origin: self.square_rect(origin),
            row: Rect::new(margin, target_rect.origin.y, 8.0 * cell, cell),
            column: Rect::new(target_rect.origin.x, margin, cell, 8.0 * cell),
            target: target_rect,
        })
    }

    /// Arrow from the center of `from` to the center of `to`
    pub fn arrow(&self, from: SquareCoord, to: SquareCoord) -> Option<ArrowShape> {
        let a = self.geometry.square_center(from);
        let b = self.geometry.square_center(to);
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let length = dx.hypot(dy);
        if length <= f32::EPSILON {
            return None;
        }

        let half = self.square_size() * ARROW_HALF_THICKNESS;
        let heading = dy.atan2(dx);
        let barb_length = length * ARROW_HEAD_LENGTH;
        let barb = |angle: f32| {
            let end = PixelPoint::new(b.x + barb_length * angle.cos(), b.y + barb_length * angle.sin());
            bar(b, end, half)
        };

        Some(ArrowShape {
            shaft: bar(a, b, half),
            barbs: [barb(heading + ARROW_HEAD_ANGLE), barb(heading - ARROW_HEAD_ANGLE)],
            tip: [
                PixelPoint::new(b.x + half, b.y),
                PixelPoint::new(b.x, b.y + half),
                PixelPoint::new(b.x - half, b.y),
                PixelPoint::new(b.x, b.y - half),
            ],
        })
    }

    /// Dialog centered on the board: 4x2 cells of content plus half-cell padding
    pub fn promotion_dialog(&self) -> DialogLayout {
        let cell = self.square_size();
        let padding = cell * 0.5;
        let frame = Rect::new(2.0 * cell, 3.0 * cell, 5.0 * cell, 3.0 * cell);
        let content = PixelPoint::new(frame.origin.x + padding, frame.origin.y + padding);
        let choice = |index: usize| {
            Rect::new(content.x + index as f32 * cell, content.y + cell, cell, cell)
        };
        DialogLayout {
            frame,
            title: Rect::new(content.x, content.y, 4.0 * cell, cell),
            choices: [choice(0), choice(1), choice(2), choice(3)],
            font_size: cell * LABEL_SCALE,
        }
    }
}

/// Rectangle of half-width `half` around the segment `a`-`b`
fn bar(a: PixelPoint, b: PixelPoint, half: f32) -> Quad {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let length = dx.hypot(dy).max(f32::EPSILON);
    let (nx, ny) = (-dy / length * half, dx / length * half);
    [
        PixelPoint::new(a.x + nx, a.y + ny),
        PixelPoint::new(b.x + nx, b.y + ny),
        PixelPoint::new(b.x - nx, b.y - ny),
        PixelPoint::new(a.x - nx, a.y - ny),
    ]
}
