//! Shared geometry for signboard rendering
//!
//! Every board dimension is a proportion of the panel size, so the same
//! layout works for the display-sized preview and the native-sized export.

use crate::config::HexColor;
use crate::domain::{BoardVariant, NativeRect, Point, SignboardContent};

/// Signboard proportions
pub mod board {
    /// Header band height as a fraction of panel height
    pub const HEADER_RATIO: f32 = 0.30;
    /// Label column width as a fraction of panel width
    pub const LABEL_COLUMN_RATIO: f32 = 0.20;
    /// Space kept clear on each side of a label, as a fraction of panel width
    pub const LABEL_PADDING_RATIO: f32 = 0.01;
    /// Outer border width as a fraction of panel width
    pub const BORDER_RATIO: f32 = 0.01;
    /// Divider line width as a fraction of panel width
    pub const DIVIDER_RATIO: f32 = 0.005;
    /// Fixed label font size as a fraction of panel height
    pub const LABEL_FONT_RATIO: f32 = 0.06;
    /// Header value font size as a fraction of panel height (before field scale)
    pub const HEADER_FONT_RATIO: f32 = 0.07;
    /// Body font size as a fraction of panel height (before field scale)
    pub const BODY_FONT_RATIO: f32 = 0.08;
    /// Body line advance as a fraction of panel height (before field scale)
    pub const BODY_LINE_RATIO: f32 = 0.10;
    /// Left edge of header values as a fraction of panel width
    pub const VALUE_INSET_RATIO: f32 = 0.22;
    /// Body padding as a fraction of panel width (x) and height (y)
    pub const BODY_INSET_RATIO: f32 = 0.03;
}

/// Background, text and line colours of a board variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardPalette {
    pub background: HexColor,
    pub text: HexColor,
    pub line: HexColor,
}

impl BoardPalette {
    pub fn for_variant(variant: BoardVariant) -> Self {
        match variant {
            BoardVariant::DarkBoard => Self {
                background: HexColor::rgb(0x00, 0x4d, 0x40),
                text: HexColor::WHITE,
                line: HexColor::WHITE,
            },
            BoardVariant::LightBoard => {
                let slate = HexColor::rgb(0x0f, 0x17, 0x2a);
                Self {
                    background: HexColor::WHITE,
                    text: slate,
                    line: slate,
                }
            }
        }
    }
}

/// Resolved positions and sizes of everything drawn on a board
#[derive(Clone, Debug, PartialEq)]
pub struct BoardLayout {
    pub panel: NativeRect,
    pub border_width: f32,
    pub divider_width: f32,
    pub header_height: f32,
    pub row_height: f32,
    /// X of the vertical divider between labels and values
    pub divider_x: f32,
    /// Horizontal centre of the label column
    pub label_center_x: f32,
    /// Widest a label may be drawn without touching the border or divider
    pub label_max_width: f32,
    /// Left edge of header values
    pub value_x: f32,
    /// Vertical centres of the two header rows
    pub row_centers: [f32; 2],
    pub label_font_px: f32,
    pub title_font_px: f32,
    pub details_font_px: f32,
    pub body_font_px: f32,
    pub body_origin: Point,
    pub body_line_height: f32,
}

impl BoardLayout {
    pub fn new(panel: NativeRect, content: &SignboardContent) -> Self {
        let (x, y, w, h) = (panel.x, panel.y, panel.width, panel.height);
        let header_height = h * board::HEADER_RATIO;
        let row_height = header_height / 2.0;

        Self {
            panel,
            border_width: w * board::BORDER_RATIO,
            divider_width: w * board::DIVIDER_RATIO,
            header_height,
            row_height,
            divider_x: x + w * board::LABEL_COLUMN_RATIO,
            label_center_x: x + w * board::LABEL_COLUMN_RATIO / 2.0,
            label_max_width: w * (board::LABEL_COLUMN_RATIO - 2.0 * board::LABEL_PADDING_RATIO),
            value_x: x + w * board::VALUE_INSET_RATIO,
            row_centers: [y + row_height * 0.5, y + header_height - row_height * 0.5],
            label_font_px: font_px(h, board::LABEL_FONT_RATIO, 1.0),
            title_font_px: font_px(h, board::HEADER_FONT_RATIO, content.title_scale),
            details_font_px: font_px(h, board::HEADER_FONT_RATIO, content.details_scale),
            body_font_px: font_px(h, board::BODY_FONT_RATIO, content.body_scale),
            body_origin: Point::new(
                x + w * board::BODY_INSET_RATIO,
                y + header_height + h * board::BODY_INSET_RATIO,
            ),
            body_line_height: h * board::BODY_LINE_RATIO * content.body_scale,
        }
    }

    /// Top-left of the `index`th body line
    pub fn body_line_origin(&self, index: usize) -> Point {
        Point::new(
            self.body_origin.x,
            self.body_origin.y + index as f32 * self.body_line_height,
        )
    }
}

/// Whole-pixel font size proportional to the panel height
#[inline]
fn font_px(panel_height: f32, ratio: f32, scale: f32) -> f32 {
    (panel_height * ratio * scale).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> NativeRect {
        NativeRect {
            x: 100.0,
            y: 100.0,
            width: 1200.0,
            height: 900.0,
        }
    }

    #[test]
    fn test_header_split() {
        let layout = BoardLayout::new(panel(), &SignboardContent::default());
        assert_eq!(layout.header_height, 270.0);
        assert_eq!(layout.row_height, 135.0);
        assert_eq!(layout.divider_x, 340.0);
        assert_eq!(layout.row_centers, [167.5, 302.5]);
        assert_eq!(layout.border_width, 12.0);
        assert!((layout.label_max_width - 216.0).abs() < 1e-3);
    }

    #[test]
    fn test_font_sizes_follow_scale() {
        let content = SignboardContent {
            title_scale: 2.0,
            body_scale: 0.5,
            ..Default::default()
        };
        let layout = BoardLayout::new(panel(), &content);
        assert_eq!(layout.label_font_px, 54.0);
        assert_eq!(layout.title_font_px, 126.0);
        assert_eq!(layout.details_font_px, 63.0);
        assert_eq!(layout.body_font_px, 36.0);
        assert_eq!(layout.body_line_height, 45.0);
    }

    #[test]
    fn test_body_lines_stack_downwards() {
        let layout = BoardLayout::new(panel(), &SignboardContent::default());
        assert_eq!(layout.body_line_origin(0), Point::new(136.0, 397.0));
        assert_eq!(layout.body_line_origin(2), Point::new(136.0, 577.0));
    }

    #[test]
    fn test_palettes() {
        let dark = BoardPalette::for_variant(BoardVariant::DarkBoard);
        assert_eq!(dark.background.to_string(), "#004d40");
        assert_eq!(dark.text, HexColor::WHITE);

        let light = BoardPalette::for_variant(BoardVariant::LightBoard);
        assert_eq!(light.background, HexColor::WHITE);
        assert_eq!(light.line.to_string(), "#0f172a");
    }
}
