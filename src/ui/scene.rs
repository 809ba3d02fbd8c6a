//! Board scene - a pure description of everything the board draws.
//!
//! The scene is rebuilt on every discrete state change. During a drag only
//! the overlay part (floating glyph and cross-hair) is refreshed through
//! [`BoardScene::update_overlay`].

use crate::domain::{
    BoardConfiguration, CellIndex, Piece, PieceColor, PixelPoint, PromotionPiece, RgbaColor,
    SquareCoord,
};
use crate::models::{BoardModel, GameModel, Interaction, LastMove};
use crate::ui::board_layout::{ArrowShape, BoardLayout, CrossHair, DialogLayout, Rect};

#[derive(Clone, Debug, PartialEq)]
pub struct CellScene {
    pub square: SquareCoord,
    pub rect: Rect,
    pub color: RgbaColor,
    /// Empty for the origin of an active drag
    pub piece: Option<Piece>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelScene {
    pub text: char,
    pub rect: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingPiece {
    pub piece: Piece,
    pub top_left: PixelPoint,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PromotionScene {
    pub title: String,
    pub color: PieceColor,
    pub layout: DialogLayout,
    pub choices: [(PromotionPiece, Piece); 4],
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoardScene {
    pub size: f32,
    pub square_size: f32,
    pub piece_size: f32,
    pub label_font_size: f32,
    pub background: RgbaColor,
    pub coordinates_color: RgbaColor,
    pub cells: Vec<CellScene>,
    pub labels: Vec<LabelScene>,
    pub turn_indicator: (Rect, RgbaColor),
    pub last_move: Option<ArrowShape>,
    pub move_highlight_color: RgbaColor,
    pub cross_hair: Option<CrossHair>,
    pub origin_cell_color: RgbaColor,
    pub target_cell_color: RgbaColor,
    pub dnd_cross_color: RgbaColor,
    pub floating: Option<FloatingPiece>,
    pub promotion: Option<PromotionScene>,
}

impl BoardScene {
    pub fn build(
        config: &BoardConfiguration,
        game: &GameModel,
        interaction: Interaction,
        last_move: Option<LastMove>,
    ) -> Self {
        let layout = BoardLayout::new(config.geometry());
        let drag_origin = match interaction {
            Interaction::Dragging(drag) => Some(drag.origin),
            _ => None,
        };

        let cells = CellIndex::all()
            .map(|cell| {
                let square = layout.geometry.cell_to_square(cell);
                let color = if (cell.col() + cell.row()) % 2 == 0 {
                    config.white_cell_color
                } else {
                    config.black_cell_color
                };
                let piece = if drag_origin == Some(square) {
                    None
                } else {
                    game.get(square)
                };
                CellScene {
                    square,
                    rect: layout.cell_rect(cell),
                    color,
                    piece,
                }
            })
            .collect();

        let turn_color = match game.turn() {
            PieceColor::White => RgbaColor::WHITE,
            PieceColor::Black => RgbaColor::BLACK,
        };

        let promotion = match interaction {
            Interaction::AwaitingPromotion(pending) => Some(PromotionScene {
                title: config.promotion_dialog_title.clone(),
                color: pending.color,
                layout: layout.promotion_dialog(),
                choices: PromotionPiece::ALL
                    .map(|choice| (choice, Piece::new(choice.kind(), pending.color))),
            }),
            _ => None,
        };

        let mut scene = Self {
            size: layout.board_total_size(),
            square_size: layout.square_size(),
            piece_size: layout.piece_size(),
            label_font_size: layout.label_font_size(),
            background: config.background,
            coordinates_color: config.coordinates_color,
            cells,
            labels: labels(&layout),
            turn_indicator: (layout.turn_indicator_rect(), turn_color),
            last_move: last_move.and_then(|m| layout.arrow(m.from, m.to)),
            move_highlight_color: config.move_highlight_color,
            cross_hair: None,
            origin_cell_color: config.origin_cell_color,
            target_cell_color: config.target_cell_color,
            dnd_cross_color: config.dnd_cross_color,
            floating: None,
            promotion,
        };
        scene.refresh_overlay(&layout, interaction);
        scene
    }

    pub fn from_board(board: &BoardModel) -> Self {
        Self::build(
            board.config(),
            board.game(),
            board.interaction(),
            board.last_move(),
        )
    }

    /// Recompute only the drag overlay
    pub fn update_overlay(&mut self, board: &BoardModel) {
        let layout = BoardLayout::new(board.config().geometry());
        self.refresh_overlay(&layout, board.interaction());
    }

    fn refresh_overlay(&mut self, layout: &BoardLayout, interaction: Interaction) {
        let Interaction::Dragging(drag) = interaction else {
            self.cross_hair = None;
            self.floating = None;
            return;
        };
        self.cross_hair = layout.cross_hair(drag.origin, drag.pointer);
        self.floating = layout
            .geometry
            .clamp_drag(drag.pointer)
            .map(|top_left| FloatingPiece {
                piece: drag.piece,
                top_left,
            });
    }
}

/// Files above and below the cells, ranks on both sides
fn labels(layout: &BoardLayout) -> Vec<LabelScene> {
    let geometry = layout.geometry;
    let mut labels = Vec::with_capacity(32);
    for cell in (0..8u8).filter_map(|index| CellIndex::new(index, index)) {
        let square = geometry.cell_to_square(cell);
        let file = char::from(b'A' + square.file());
        let rank = char::from(b'1' + square.rank());
        for top in [true, false] {
            labels.push(LabelScene {
                text: file,
                rect: layout.file_label_rect(cell.col(), top),
            });
        }
        for left in [true, false] {
            labels.push(LabelScene {
                text: rank,
                rect: layout.rank_label_rect(cell.row(), left),
            });
        }
    }
    labels
}
