//! Last-move arrow, painted as filled polygons.

use gpui::{Bounds, Hsla, PathBuilder, Pixels, Point, canvas, point, prelude::*, px};

use crate::domain::PixelPoint;
use crate::ui::board_layout::ArrowShape;

pub fn render_arrow(shape: ArrowShape, color: Hsla) -> impl IntoElement {
    canvas(
        |_, _, _| {},
        move |bounds: Bounds<Pixels>, _, window, _| {
            for quad in shape.polygons() {
                let mut builder = PathBuilder::fill();
                builder.move_to(to_window(bounds.origin, quad[0]));
                for corner in &quad[1..] {
                    builder.line_to(to_window(bounds.origin, *corner));
                }
                builder.close();
                match builder.build() {
                    Ok(path) => window.paint_path(path, color),
                    Err(err) => log::error!("could not build arrow path: {}", err),
                }
            }
        },
    )
    .absolute()
    .top_0()
    .left_0()
    .size_full()
}

fn to_window(origin: Point<Pixels>, local: PixelPoint) -> Point<Pixels> {
    point(origin.x + px(local.x), origin.y + px(local.y))
}
