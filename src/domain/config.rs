//! Host-facing attributes and the resolved board configuration.
//!
//! Attributes arrive as raw strings, one per name. They are resolved into a
//! [`BoardConfiguration`] in one go; every unparseable value falls back to its
//! documented default instead of failing.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::chess::PieceColor;
use crate::domain::coords::{BoardGeometry, Orientation};

pub const DEFAULT_SIZE: f32 = 100.0;
pub const DEFAULT_BACKGROUND: &str = "#124589";
pub const DEFAULT_COORDINATES_COLOR: &str = "DarkOrange";
pub const DEFAULT_WHITE_CELL_COLOR: &str = "GoldenRod";
pub const DEFAULT_BLACK_CELL_COLOR: &str = "brown";
pub const DEFAULT_ORIGIN_CELL_COLOR: &str = "crimson";
pub const DEFAULT_TARGET_CELL_COLOR: &str = "ForestGreen";
pub const DEFAULT_DND_CROSS_COLOR: &str = "DimGrey";
pub const DEFAULT_MOVE_HIGHLIGHT_COLOR: &str = "CadetBlue";
pub const DEFAULT_PROMOTION_DIALOG_TITLE: &str = "Select the promotion piece";
pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Raw attribute values as set by the host. `None` means "use the default".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BoardAttributes {
    /// Board width and height in pixels
    pub size: Option<String>,
    pub background: Option<String>,
    pub coordinates_color: Option<String>,
    pub white_cell_color: Option<String>,
    pub black_cell_color: Option<String>,
    /// "true" draws the board from black's side
    pub reversed: Option<String>,
    pub origin_cell_color: Option<String>,
    pub target_cell_color: Option<String>,
    pub dnd_cross_color: Option<String>,
    pub promotion_dialog_title: Option<String>,
    pub white_player_human: Option<String>,
    pub black_player_human: Option<String>,
    pub move_highlight_color: Option<String>,
    /// FEN of the position a new game starts from
    pub start_position: Option<String>,
}

/// Attribute names understood by [`BoardAttributes::set`]
pub const ATTRIBUTE_NAMES: [&str; 14] = [
    "size",
    "background",
    "coordinates_color",
    "white_cell_color",
    "black_cell_color",
    "reversed",
    "origin_cell_color",
    "target_cell_color",
    "dnd_cross_color",
    "promotion_dialog_title",
    "white_player_human",
    "black_player_human",
    "move_highlight_color",
    "start_position",
];

impl BoardAttributes {
    /// Build from `name=value` pairs, skipping unknown names
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut attributes = Self::default();
        for (name, value) in pairs {
            if !attributes.set(name, Some(value)) {
                log::warn!("ignoring unknown board attribute {:?}", name);
            }
        }
        attributes
    }

    /// Set (or clear with `None`) one attribute. Returns false for unknown names.
    pub fn set(&mut self, name: &str, value: Option<&str>) -> bool {
        let Some(slot) = self.slot_mut(name) else {
            return false;
        };
        *slot = value.map(str::to_string);
        true
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        let slot = match name {
            "size" => &mut self.size,
            "background" => &mut self.background,
            "coordinates_color" => &mut self.coordinates_color,
            "white_cell_color" => &mut self.white_cell_color,
            "black_cell_color" => &mut self.black_cell_color,
            "reversed" => &mut self.reversed,
            "origin_cell_color" => &mut self.origin_cell_color,
            "target_cell_color" => &mut self.target_cell_color,
            "dnd_cross_color" => &mut self.dnd_cross_color,
            "promotion_dialog_title" => &mut self.promotion_dialog_title,
            "white_player_human" => &mut self.white_player_human,
            "black_player_human" => &mut self.black_player_human,
            "move_highlight_color" => &mut self.move_highlight_color,
            "start_position" => &mut self.start_position,
            _ => return None,
        };
        Some(slot)
    }
}

/// Color as 0xRRGGBBAA
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RgbaColor(pub u32);

impl RgbaColor {
    pub const WHITE: RgbaColor = RgbaColor(0xffffffff);
    pub const BLACK: RgbaColor = RgbaColor(0x000000ff);

    /// Parse any CSS color: hex forms, named colors, `rgb()`, `hsl()` and friends
    pub fn parse(text: &str) -> Option<Self> {
        let [r, g, b, a] = csscolorparser::parse(text.trim()).ok()?.to_rgba8();
        Some(RgbaColor(u32::from_be_bytes([r, g, b, a])))
    }
}

/// Resolved, immutable board settings. Replaced wholesale when an attribute changes.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardConfiguration {
    pub size: f32,
    pub background: RgbaColor,
    pub coordinates_color: RgbaColor,
    pub white_cell_color: RgbaColor,
    pub black_cell_color: RgbaColor,
    pub orientation: Orientation,
    pub origin_cell_color: RgbaColor,
    pub target_cell_color: RgbaColor,
    pub dnd_cross_color: RgbaColor,
    pub move_highlight_color: RgbaColor,
    pub promotion_dialog_title: String,
    pub white_player_human: bool,
    pub black_player_human: bool,
    pub start_position: String,
}

impl BoardConfiguration {
    pub fn from_attributes(attributes: &BoardAttributes) -> Self {
        Self {
            size: parse_size(attributes.size.as_deref()),
            background: color_or_default(
                "background",
                attributes.background.as_deref(),
                DEFAULT_BACKGROUND,
            ),
            coordinates_color: color_or_default(
                "coordinates_color",
                attributes.coordinates_color.as_deref(),
                DEFAULT_COORDINATES_COLOR,
            ),
            white_cell_color: color_or_default(
                "white_cell_color",
                attributes.white_cell_color.as_deref(),
                DEFAULT_WHITE_CELL_COLOR,
            ),
            black_cell_color: color_or_default(
                "black_cell_color",
                attributes.black_cell_color.as_deref(),
                DEFAULT_BLACK_CELL_COLOR,
            ),
            orientation: Orientation::from_reversed(bool_or_default(
                "reversed",
                attributes.reversed.as_deref(),
                false,
            )),
            origin_cell_color: color_or_default(
                "origin_cell_color",
                attributes.origin_cell_color.as_deref(),
                DEFAULT_ORIGIN_CELL_COLOR,
            ),
            target_cell_color: color_or_default(
                "target_cell_color",
                attributes.target_cell_color.as_deref(),
                DEFAULT_TARGET_CELL_COLOR,
            ),
            dnd_cross_color: color_or_default(
                "dnd_cross_color",
                attributes.dnd_cross_color.as_deref(),
                DEFAULT_DND_CROSS_COLOR,
            ),
            move_highlight_color: color_or_default(
                "move_highlight_color",
                attributes.move_highlight_color.as_deref(),
                DEFAULT_MOVE_HIGHLIGHT_COLOR,
            ),
            promotion_dialog_title: attributes
                .promotion_dialog_title
                .clone()
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| DEFAULT_PROMOTION_DIALOG_TITLE.to_string()),
            white_player_human: bool_or_default(
                "white_player_human",
                attributes.white_player_human.as_deref(),
                true,
            ),
            black_player_human: bool_or_default(
                "black_player_human",
                attributes.black_player_human.as_deref(),
                true,
            ),
            start_position: attributes
                .start_position
                .clone()
                .filter(|fen| !fen.trim().is_empty())
                .unwrap_or_else(|| STANDARD_START_FEN.to_string()),
        }
    }

    pub fn geometry(&self) -> BoardGeometry {
        BoardGeometry::new(self.size, self.orientation)
    }

    pub fn is_human(&self, color: PieceColor) -> bool {
        match color {
            PieceColor::White => self.white_player_human,
            PieceColor::Black => self.black_player_human,
        }
    }
}

impl Default for BoardConfiguration {
    fn default() -> Self {
        Self::from_attributes(&BoardAttributes::default())
    }
}

fn parse_size(value: Option<&str>) -> f32 {
    let Some(text) = value else {
        return DEFAULT_SIZE;
    };
    match text.trim().parse::<f32>() {
        Ok(size) if size.is_finite() && size > 0.0 => size,
        _ => {
            log::warn!("invalid size attribute {:?}, using {}", text, DEFAULT_SIZE);
            DEFAULT_SIZE
        }
    }
}

fn bool_or_default(name: &str, value: Option<&str>, default: bool) -> bool {
    let Some(text) = value else {
        return default;
    };
    match text.trim().to_ascii_lowercase().as_str() {
        "true" => true,
        "false" => false,
        _ => {
            log::warn!("invalid boolean for {}: {:?}, using {}", name, text, default);
            default
        }
    }
}

fn color_or_default(name: &str, value: Option<&str>, default: &str) -> RgbaColor {
    let fallback = RgbaColor::parse(default).unwrap_or(RgbaColor::BLACK);
    let Some(text) = value else {
        return fallback;
    };
    RgbaColor::parse(text).unwrap_or_else(|| {
        log::warn!("invalid color for {}: {:?}, using {}", name, text, default);
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoardConfiguration::default();
        assert_eq!(config.size, DEFAULT_SIZE);
        assert_eq!(config.orientation, Orientation::Normal);
        assert!(config.white_player_human);
        assert!(config.black_player_human);
        assert_eq!(config.background, RgbaColor(0x124589ff));
        assert_eq!(config.white_cell_color, RgbaColor(0xdaa520ff));
        assert_eq!(config.promotion_dialog_title, DEFAULT_PROMOTION_DIALOG_TITLE);
        assert_eq!(config.start_position, STANDARD_START_FEN);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let attributes = BoardAttributes::from_pairs([
            ("size", "huge"),
            ("reversed", "yes"),
            ("background", "#12"),
            ("black_player_human", "FALSE"),
        ]);
        let config = BoardConfiguration::from_attributes(&attributes);
        assert_eq!(config.size, DEFAULT_SIZE);
        assert_eq!(config.orientation, Orientation::Normal);
        assert_eq!(config.background, RgbaColor(0x124589ff));
        assert!(!config.black_player_human);
    }

    #[test]
    fn test_rejects_non_positive_size() {
        for text in ["0", "-40", "inf", "NaN"] {
            assert_eq!(parse_size(Some(text)), DEFAULT_SIZE);
        }
        assert_eq!(parse_size(Some(" 450.5 ")), 450.5);
    }

    #[test]
    fn test_parse_colors() {
        assert_eq!(RgbaColor::parse("#fff"), Some(RgbaColor(0xffffffff)));
        assert_eq!(RgbaColor::parse("#102030"), Some(RgbaColor(0x102030ff)));
        assert_eq!(RgbaColor::parse("#10203040"), Some(RgbaColor(0x10203040)));
        assert_eq!(RgbaColor::parse("ForestGreen"), Some(RgbaColor(0x228b22ff)));
        assert_eq!(RgbaColor::parse("LightSeaGreen"), Some(RgbaColor(0x20b2aaff)));
        assert_eq!(RgbaColor::parse("RebeccaPurple"), Some(RgbaColor(0x663399ff)));
        assert_eq!(RgbaColor::parse("rgb(255, 0, 0)"), Some(RgbaColor(0xff0000ff)));
        assert_eq!(RgbaColor::parse("#ggg"), None);
        assert_eq!(RgbaColor::parse("notacolor"), None);
    }

    #[test]
    fn test_uncommon_css_colors_are_kept() {
        let attributes = BoardAttributes::from_pairs([
            ("white_cell_color", "Khaki"),
            ("black_cell_color", "rgb(139, 69, 19)"),
        ]);
        let config = BoardConfiguration::from_attributes(&attributes);
        assert_eq!(config.white_cell_color, RgbaColor(0xf0e68cff));
        assert_eq!(config.black_cell_color, RgbaColor(0x8b4513ff));
    }

    #[test]
    fn test_set_attributes() {
        let mut attributes = BoardAttributes::default();
        assert!(attributes.set("reversed", Some("true")));
        assert_eq!(attributes.reversed.as_deref(), Some("true"));
        assert!(attributes.set("reversed", None));
        assert_eq!(attributes.reversed, None);
        assert!(!attributes.set("flavour", Some("mint")));
        for name in ATTRIBUTE_NAMES {
            assert!(attributes.set(name, Some("x")), "{name} should be known");
        }
    }

    #[test]
    fn test_schema_lists_attributes() {
        let schema = schemars::schema_for!(BoardAttributes);
        let properties = schema
            .get("properties")
            .and_then(|p| p.as_object())
            .expect("object schema");
        for name in ATTRIBUTE_NAMES {
            assert!(properties.contains_key(name), "missing {name}");
        }
    }
}
