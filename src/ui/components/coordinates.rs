//! Coordinate labels and the turn indicator around the cells.

use crate::ui::board_layout::Rect;
use crate::ui::components::render_rect;
use crate::ui::scene::LabelScene;
use gpui::{Rgba, div, prelude::*, px};

pub fn render_label(label: &LabelScene, font_size: f32, color: Rgba) -> impl IntoElement {
    let rect = label.rect;
    div()
        .absolute()
        .left(px(rect.origin.x))
        .top(px(rect.origin.y))
        .w(px(rect.width))
        .h(px(rect.height))
        .flex()
        .items_center()
        .justify_center()
        .text_size(px(font_size))
        .text_color(color)
        .child(label.text.to_string())
}

/// Disc in the color of the side to move
pub fn render_turn_indicator(rect: &Rect, color: Rgba) -> impl IntoElement {
    render_rect(rect, color).rounded_full()
}
