//! Square rendering component.

use crate::ui::board_layout::Rect;
use crate::ui::components::render_piece;
use crate::ui::scene::CellScene;
use crate::ui::theme::to_rgba;
use gpui::{Div, Rgba, div, prelude::*, px};

/// Absolutely positioned, filled rectangle in board-local pixels
pub fn render_rect(rect: &Rect, color: Rgba) -> Div {
    div()
        .absolute()
        .left(px(rect.origin.x))
        .top(px(rect.origin.y))
        .w(px(rect.width))
        .h(px(rect.height))
        .bg(color)
}

/// Render a single board square with optional piece
pub fn render_square(cell: &CellScene, piece_size: f32) -> impl IntoElement {
    render_rect(&cell.rect, to_rgba(cell.color))
        .flex()
        .items_center()
        .justify_center()
        .when_some(cell.piece, |el, p| el.child(render_piece(p, piece_size)))
}
