//! Chess board view - the board with drag-and-drop piece movement.

use gpui::{
    Context, Entity, FocusHandle, Focusable, MouseButton, MouseDownEvent, MouseMoveEvent,
    MouseUpEvent, Pixels, Point, Subscription, Window, actions, canvas, div, point, prelude::*,
    px,
};

use crate::domain::{PixelPoint, PromotionPiece};
use crate::models::{BoardModel, Redraw};
use crate::ui::components::{
    render_arrow, render_label, render_piece, render_promotion_dialog, render_rect, render_square,
    render_turn_indicator,
};
use crate::ui::scene::BoardScene;
use crate::ui::theme::{DRAG_HIGHLIGHT_OPACITY, LAST_MOVE_OPACITY, to_hsla, to_rgba};

actions!(chessboard, [NewGame, FlipBoard]);

/// The board view; keeps a scene of its BoardModel and forwards pointer input to it
pub struct ChessBoardView {
    board: Entity<BoardModel>,
    scene: BoardScene,
    /// Window position of the board's top-left corner, measured during prepaint
    origin: Point<Pixels>,
    focus_handle: FocusHandle,
    _subscription: Subscription,
}

impl ChessBoardView {
    pub fn new(board: Entity<BoardModel>, cx: &mut Context<Self>) -> Self {
        let _subscription = cx.observe(&board, |this, board, cx| {
            this.scene = BoardScene::from_board(board.read(cx));
            cx.notify();
        });
        let scene = BoardScene::from_board(board.read(cx));
        Self {
            board,
            scene,
            origin: point(px(0.0), px(0.0)),
            focus_handle: cx.focus_handle(),
            _subscription,
        }
    }

    fn local(&self, position: Point<Pixels>) -> PixelPoint {
        let offset = position - self.origin;
        PixelPoint::new(offset.x.into(), offset.y.into())
    }

    /// Run a board handler and redraw as much as it asks for
    fn apply(
        &mut self,
        cx: &mut Context<Self>,
        handler: impl FnOnce(&mut BoardModel) -> Redraw,
    ) {
        let board = self.board.clone();
        let redraw = board.update(cx, |board, cx| {
            let redraw = handler(board);
            if redraw == Redraw::Full {
                // observer rebuilds the scene
                board.publish(cx);
            }
            redraw
        });
        if redraw == Redraw::Overlay {
            self.scene.update_overlay(board.read(cx));
            cx.notify();
        }
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, _: &mut Window, cx: &mut Context<Self>) {
        let point = self.local(ev.position);
        self.apply(cx, |board| board.pointer_down(point));
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, _: &mut Window, cx: &mut Context<Self>) {
        let point = self.local(ev.position);
        self.apply(cx, |board| board.pointer_move(point));
    }

    fn on_mouse_up(&mut self, ev: &MouseUpEvent, _: &mut Window, cx: &mut Context<Self>) {
        let point = self.local(ev.position);
        self.apply(cx, |board| board.pointer_up(point));
    }

    fn on_hover(&mut self, hovered: &bool, _: &mut Window, cx: &mut Context<Self>) {
        if !*hovered {
            self.apply(cx, |board| board.pointer_leave());
        }
    }

    fn choose_promotion(&mut self, piece: PromotionPiece, cx: &mut Context<Self>) {
        self.apply(cx, |board| board.select_promotion(piece));
    }

    fn dismiss_promotion(&mut self, cx: &mut Context<Self>) {
        self.apply(cx, |board| board.dismiss_promotion());
    }

    fn new_game(&mut self, _: &NewGame, _: &mut Window, cx: &mut Context<Self>) {
        self.apply(cx, |board| match board.new_game(None) {
            Ok(()) => Redraw::Full,
            Err(err) => {
                log::error!("{}", err);
                Redraw::None
            }
        });
    }

    fn flip_board(&mut self, _: &FlipBoard, _: &mut Window, cx: &mut Context<Self>) {
        self.apply(cx, |board| board.toggle_side());
    }
}

impl Focusable for ChessBoardView {
    fn focus_handle(&self, _: &gpui::App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for ChessBoardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let scene = &self.scene;
        let size = scene.size;

        let cells = scene
            .cells
            .iter()
            .map(|cell| render_square(cell, scene.piece_size));
        let coordinates_color = to_rgba(scene.coordinates_color);
        let labels = scene
            .labels
            .iter()
            .map(|label| render_label(label, scene.label_font_size, coordinates_color));
        let (indicator_rect, indicator_color) = scene.turn_indicator;

        let last_move = scene.last_move.map(|shape| {
            div()
                .absolute()
                .top_0()
                .left_0()
                .size_full()
                .opacity(LAST_MOVE_OPACITY)
                .child(render_arrow(shape, to_hsla(scene.move_highlight_color)))
        });

        let cross_hair = scene.cross_hair.map(|cross| {
            div()
                .absolute()
                .top_0()
                .left_0()
                .size_full()
                .opacity(DRAG_HIGHLIGHT_OPACITY)
                .child(render_rect(&cross.origin, to_rgba(scene.origin_cell_color)))
                .child(render_rect(&cross.row, to_rgba(scene.dnd_cross_color)))
                .child(render_rect(&cross.column, to_rgba(scene.dnd_cross_color)))
                .child(render_rect(&cross.target, to_rgba(scene.target_cell_color)))
        });

        // Floating piece follows the cursor during a drag
        let floating_piece = scene.floating.map(|floating| {
            div()
                .absolute()
                .left(px(floating.top_left.x))
                .top(px(floating.top_left.y))
                .size(px(scene.square_size))
                .child(render_piece(floating.piece, scene.piece_size))
        });

        let promotion = scene.promotion.as_ref().map(|promotion| {
            render_promotion_dialog(
                promotion,
                size,
                cx,
                Self::choose_promotion,
                Self::dismiss_promotion,
            )
        });

        // Canvas to measure where the board sits in the window
        let view = cx.entity();
        let measure_canvas = canvas(
            move |bounds, _window, cx| {
                view.update(cx, |this, _| {
                    this.origin = bounds.origin;
                });
            },
            |_, _, _, _| {},
        )
        .absolute()
        .top_0()
        .left_0()
        .size_full();

        div()
            .id("chessboard")
            .key_context("Chessboard")
            .track_focus(&self.focus_handle)
            .on_action(cx.listener(Self::new_game))
            .on_action(cx.listener(Self::flip_board))
            .relative()
            .flex_shrink_0()
            .size(px(size))
            .overflow_hidden()
            .bg(to_rgba(scene.background))
            .child(measure_canvas)
            .children(cells)
            .children(labels)
            .child(render_turn_indicator(&indicator_rect, to_rgba(indicator_color)))
            .children(last_move)
            .children(cross_hair)
            .children(floating_piece)
            .children(promotion)
            .on_mouse_down(MouseButton::Left, cx.listener(Self::on_mouse_down))
            .on_mouse_move(cx.listener(Self::on_mouse_move))
            .on_mouse_up(MouseButton::Left, cx.listener(Self::on_mouse_up))
            .on_mouse_up_out(MouseButton::Left, cx.listener(Self::on_mouse_up))
            .on_hover(cx.listener(Self::on_hover))
    }
}
