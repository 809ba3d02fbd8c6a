//! Piece rendering component.

use crate::domain::Piece;
use gpui::{StyledImage, div, img, prelude::*, px, rgb};

const SYMBOL_COLOR: u32 = 0x000000;

/// Render a chess piece centered in its container
pub fn render_piece(piece: Piece, piece_size: f32) -> impl IntoElement {
    div()
        .size_full()
        .flex()
        .items_center()
        .justify_center()
        .child(
            img(piece.svg_path())
                .size(px(piece_size))
                .with_fallback(move || render_symbol(piece, piece_size).into_any_element()),
        )
}

/// Text glyph used when no SVG is installed for the piece
fn render_symbol(piece: Piece, piece_size: f32) -> impl IntoElement {
    div()
        .size(px(piece_size))
        .flex()
        .items_center()
        .justify_center()
        .text_size(px(piece_size * 0.8))
        .text_color(rgb(SYMBOL_COLOR))
        .child(piece.symbol().to_string())
}
