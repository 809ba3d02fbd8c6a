//! Promotion dialog component.
//!
//! A scrim covering the board with the dialog on top. Choosing a piece or
//! clicking the scrim is reported through the given view callbacks.

use gpui::{Context, MouseButton, MouseDownEvent, div, prelude::*, px, rgba};

use crate::domain::PromotionPiece;
use crate::ui::components::{render_piece, render_rect};
use crate::ui::scene::PromotionScene;
use crate::ui::theme::{DIALOG_BG, DIALOG_SCRIM, DIALOG_TITLE, PIECE_SCALE};

pub fn render_promotion_dialog<V: 'static>(
    scene: &PromotionScene,
    board_size: f32,
    cx: &mut Context<V>,
    on_choose: fn(&mut V, PromotionPiece, &mut Context<V>),
    on_dismiss: fn(&mut V, &mut Context<V>),
) -> impl IntoElement + use<V> {
    let layout = scene.layout;
    let title = render_rect(&layout.title, rgba(DIALOG_BG))
        .flex()
        .items_center()
        .text_size(px(layout.font_size))
        .font_weight(gpui::FontWeight::BOLD)
        .text_color(rgba(DIALOG_TITLE))
        .child(scene.title.clone());

    let choices = scene.choices.iter().zip(layout.choices).map(|(&(choice, piece), rect)| {
        render_rect(&rect, rgba(DIALOG_BG))
            .cursor_pointer()
            .child(render_piece(piece, rect.width * PIECE_SCALE))
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(move |view, _: &MouseDownEvent, _, cx| {
                    cx.stop_propagation();
                    on_choose(view, choice, cx);
                }),
            )
    });

    div()
        .id("promotion-overlay")
        .absolute()
        .top_0()
        .left_0()
        .size(px(board_size))
        .bg(rgba(DIALOG_SCRIM))
        .on_mouse_down(
            MouseButton::Left,
            cx.listener(move |view, _: &MouseDownEvent, _, cx| {
                cx.stop_propagation();
                on_dismiss(view, cx);
            }),
        )
        .child(
            render_rect(&layout.frame, rgba(DIALOG_BG)).on_mouse_down(
                MouseButton::Left,
                |_: &MouseDownEvent, _, cx| cx.stop_propagation(),
            ),
        )
        .child(title)
        .children(choices)
}
