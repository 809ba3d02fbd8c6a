//! Theme constants and colors for the chessboard UI.

use gpui::{Hsla, Rgba, rgba};

use crate::domain::RgbaColor;

// Layout constants
pub const BOARD_PADDING: f32 = 20.0;
pub const PIECE_SCALE: f32 = 0.98; // piece size relative to square
pub const LABEL_SCALE: f32 = 0.5; // label and dialog title font relative to square

// Layer opacities
pub const LAST_MOVE_OPACITY: f32 = 0.9;
pub const DRAG_HIGHLIGHT_OPACITY: f32 = 0.8;

// Promotion dialog
pub const DIALOG_BG: u32 = 0xffffffff;
pub const DIALOG_TITLE: u32 = 0x000000ff;
pub const DIALOG_SCRIM: u32 = 0x00000066;

// Host window
pub const WINDOW_BG: u32 = 0x2a2a2aff;

pub fn to_rgba(color: RgbaColor) -> Rgba {
    rgba(color.0)
}

pub fn to_hsla(color: RgbaColor) -> Hsla {
    Hsla::from(to_rgba(color))
}
