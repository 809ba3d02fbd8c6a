mod arrow;
mod coordinates;
mod piece;
mod promotion;
mod square;

pub use arrow::render_arrow;
pub use coordinates::{render_label, render_turn_indicator};
pub use piece::render_piece;
pub use promotion::render_promotion_dialog;
pub use square::{render_rect, render_square};
