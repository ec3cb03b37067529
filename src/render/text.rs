//! Glyph rasterization for board text using ab_glyph

use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use image::RgbaImage;

use crate::config::HexColor;
use crate::error::{Error, Result};

/// DejaVu Sans, used when no font is configured
const BUNDLED_FONT: &[u8] = include_bytes!("../../data/fonts/DejaVuSans.ttf");

/// Font used for all board text
#[derive(Clone, Debug)]
pub struct BoardFont {
    font: FontArc,
}

impl BoardFont {
    /// The font shipped with the crate
    pub fn bundled() -> Result<Self> {
        let font = FontArc::try_from_slice(BUNDLED_FONT).map_err(|_| Error::InvalidFont)?;
        Ok(Self { font })
    }

    /// Parse TTF/OTF bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = FontArc::try_from_vec(bytes).map_err(|_| Error::InvalidFont)?;
        Ok(Self { font })
    }

    /// Read and parse a font file
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Advance width of a single line at `size` pixels
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(size));
        let mut width = 0.0;
        let mut prev = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width
    }

    /// Largest whole-pixel size, at most `size`, at which `text` fits in `max_width`
    ///
    /// Bold runs count their extra offset. Never returns less than 1.
    pub fn fit_size(&self, text: &str, size: f32, max_width: f32, bold: bool) -> f32 {
        let width_at = |size: f32| {
            let extra = if bold { bold_offset(size) } else { 0.0 };
            self.measure(text, size) + extra
        };

        let full = width_at(size);
        if full <= max_width || full <= 0.0 {
            return size;
        }
        // Advance widths scale linearly, so one proportional step lands close
        let mut fitted = (size * max_width / full).floor().max(1.0);
        while fitted > 1.0 && width_at(fitted) > max_width {
            fitted -= 1.0;
        }
        fitted
    }
}

/// Horizontal shift of the second pass of a faux-bold run
fn bold_offset(size: f32) -> f32 {
    (size / 24.0).max(1.0)
}

/// Horizontal anchor of a text run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
}

/// Vertical anchor of a text run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    /// `y` is the top of the line box
    Top,
    /// `y` is the middle of the line box
    Middle,
}

/// How to place and paint a text run
#[derive(Clone, Copy, Debug)]
pub struct TextStyle {
    pub size: f32,
    pub color: HexColor,
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// Faux bold: the run is painted a second time, offset horizontally
    pub bold: bool,
}

/// Draw a single line of text anchored at (`x`, `y`)
pub fn draw_text(img: &mut RgbaImage, font: &BoardFont, x: f32, y: f32, text: &str, style: TextStyle) {
    if text.is_empty() || style.size < 1.0 {
        return;
    }

    let scaled = font.font.as_scaled(PxScale::from(style.size));
    let left = match style.h_align {
        HAlign::Left => x,
        HAlign::Center => x - font.measure(text, style.size) / 2.0,
    };
    let baseline = match style.v_align {
        VAlign::Top => y + scaled.ascent(),
        VAlign::Middle => y + (scaled.ascent() + scaled.descent()) / 2.0,
    };

    draw_run(img, &font.font, left, baseline, text, style);
    if style.bold {
        draw_run(img, &font.font, left + bold_offset(style.size), baseline, text, style);
    }
}

fn draw_run(img: &mut RgbaImage, font: &FontArc, left: f32, baseline: f32, text: &str, style: TextStyle) {
    let scaled = font.as_scaled(PxScale::from(style.size));
    let mut caret = point(left, baseline);
    let mut prev = None;

    for ch in text.chars() {
        let mut glyph = scaled.scaled_glyph(ch);
        if let Some(prev) = prev {
            caret.x += scaled.kern(prev, glyph.id);
        }
        glyph.position = caret;
        caret.x += scaled.h_advance(glyph.id);
        prev = Some(glyph.id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let px = gx as i32 + bounds.min.x as i32;
            let py = gy as i32 + bounds.min.y as i32;
            if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
                blend_pixel(img, px as u32, py as u32, style.color, coverage);
            }
        });
    }
}

/// Blend an opaque colour over a pixel with the given coverage (0..=1)
pub(crate) fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: HexColor, coverage: f32) {
    let a = (coverage.clamp(0.0, 1.0) * 255.0).round() as u32;
    if a == 0 {
        return;
    }
    let px = img.get_pixel_mut(x, y);
    let src = color.to_rgba_u8();
    for c in 0..3 {
        px[c] = ((src[c] as u32 * a + px[c] as u32 * (255 - a) + 127) / 255) as u8;
    }
    px[3] = px[3].max(a as u8);
}
