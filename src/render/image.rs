//! Compositing the photo, brush strokes and signboard using tiny-skia
//!
//! Everything here works in native pixels: callers project display-space
//! geometry through a [`GeometryFrame`] first.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform};

use super::export::{self, ExportedImage};
use super::geometry::{BoardLayout, BoardPalette};
use super::text::{self, BoardFont, HAlign, TextStyle, VAlign};
use crate::config::{CompositorConfig, HexColor};
use crate::domain::{
    BrushEffect, DisplayRect, GeometryFrame, Overlay, Point, ProjectedStroke, Stroke, StrokeLog,
};
use crate::error::{Error, Result};
use crate::photo::SitePhoto;

/// Largest sigma blurred at full resolution; beyond it the region is downsampled
const MAX_WORKING_SIGMA: f32 = 4.0;

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let (w, h) = (img.width(), img.height());
    let Some(size) = tiny_skia::IntSize::from_wh(w, h) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    // Copy back
    img.copy_from_slice(pixmap.data());
}

/// Build one continuous polyline through all points
///
/// A two-point path with identical points still gets round caps, which
/// paints a dot.
fn build_polyline(points: &[Point], dx: f32, dy: f32) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x + dx, first.y + dy);
    if rest.is_empty() {
        pb.line_to(first.x + dx, first.y + dy);
    }
    for p in rest {
        pb.line_to(p.x + dx, p.y + dy);
    }
    pb.finish()
}

fn brush_stroke(width: f32) -> tiny_skia::Stroke {
    tiny_skia::Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

fn solid_paint(color: HexColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = true;
    paint
}

/// Paint a fill stroke as one solid path
pub fn draw_fill_stroke(img: &mut RgbaImage, stroke: &ProjectedStroke) {
    let Some(path) = build_polyline(&stroke.points, 0.0, 0.0) else {
        return;
    };
    with_pixmap(img, |pixmap| {
        pixmap.stroke_path(
            &path,
            &solid_paint(stroke.fill_color),
            &brush_stroke(stroke.width()),
            Transform::identity(),
            None,
        );
    });
}

/// Integer pixel rectangle clamped to an image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PixelRect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl PixelRect {
    /// Bounding box of `points` grown by `margin`, clamped to `width` x `height`
    fn around(points: &[Point], margin: f32, width: u32, height: u32) -> Option<Self> {
        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let left = (min_x - margin).floor().max(0.0);
        let top = (min_y - margin).floor().max(0.0);
        let right = (max_x + margin).ceil().min(width as f32);
        let bottom = (max_y + margin).ceil().min(height as f32);
        if !(left < right && top < bottom) {
            return None;
        }
        Some(Self {
            x: left as u32,
            y: top as u32,
            w: (right - left) as u32,
            h: (bottom - top) as u32,
        })
    }

    fn grow(self, by: u32, width: u32, height: u32) -> Self {
        let x = self.x.saturating_sub(by);
        let y = self.y.saturating_sub(by);
        let right = (self.x + self.w).saturating_add(by).min(width);
        let bottom = (self.y + self.h).saturating_add(by).min(height);
        Self {
            x,
            y,
            w: right - x,
            h: bottom - y,
        }
    }
}

/// Blur the photo under a stroke
///
/// The stroke is rasterized into a coverage mask; pixels under the mask are
/// replaced by a Gaussian-blurred copy of the surrounding region, weighted by
/// coverage so the brush edge stays soft.
pub fn draw_blur_stroke(img: &mut RgbaImage, stroke: &ProjectedStroke, strength: f32) {
    let width = stroke.width();
    let sigma = (width * strength).max(1.0);
    let (img_w, img_h) = img.dimensions();

    let Some(region) = PixelRect::around(&stroke.points, width / 2.0 + 1.0, img_w, img_h) else {
        return;
    };
    // Sample beyond the mask so the kernel sees real neighbours at the edge
    let source = region.grow((sigma * 3.0).ceil() as u32, img_w, img_h);

    let Some(mut mask) = Pixmap::new(region.w, region.h) else {
        return;
    };
    let Some(path) = build_polyline(&stroke.points, -(region.x as f32), -(region.y as f32)) else {
        return;
    };
    mask.stroke_path(
        &path,
        &solid_paint(HexColor::WHITE),
        &brush_stroke(width),
        Transform::identity(),
        None,
    );

    let crop = imageops::crop_imm(img, source.x, source.y, source.w, source.h).to_image();
    let blurred = blur_region(&crop, sigma);
    let (ox, oy) = (region.x - source.x, region.y - source.y);

    let coverage = mask.data();
    for my in 0..region.h {
        for mx in 0..region.w {
            let a = coverage[((my * region.w + mx) * 4 + 3) as usize] as u32;
            if a == 0 {
                continue;
            }
            let src = blurred.get_pixel(mx + ox, my + oy);
            let dst = img.get_pixel_mut(region.x + mx, region.y + my);
            for c in 0..4 {
                dst[c] = ((src[c] as u32 * a + dst[c] as u32 * (255 - a) + 127) / 255) as u8;
            }
        }
    }
}

/// Gaussian blur whose cost does not grow with `sigma`
///
/// Sigmas above [`MAX_WORKING_SIGMA`] are applied to a downsampled copy that is
/// scaled back up, which keeps the redaction strength of the full-size kernel.
fn blur_region(region: &RgbaImage, sigma: f32) -> RgbaImage {
    let factor = sigma / MAX_WORKING_SIGMA;
    if factor <= 1.0 {
        return imageops::blur(region, sigma);
    }

    let (w, h) = region.dimensions();
    let small_w = ((w as f32 / factor).round() as u32).clamp(1, w);
    let small_h = ((h as f32 / factor).round() as u32).clamp(1, h);
    let small = imageops::thumbnail(region, small_w, small_h);
    let small = imageops::blur(&small, MAX_WORKING_SIGMA);
    imageops::resize(&small, w, h, FilterType::Triangle)
}

/// Draw the signboard panel: background, border, header grid and text
///
/// Fails with [`Error::FontUnavailable`] when there is text to draw but no
/// font; the panel itself is drawn first either way.
pub fn draw_signboard(
    img: &mut RgbaImage,
    layout: &BoardLayout,
    overlay: &Overlay,
    font: Option<&BoardFont>,
    config: &CompositorConfig,
) -> Result<()> {
    let palette = BoardPalette::for_variant(overlay.variant());
    let panel = layout.panel;

    with_pixmap(img, |pixmap| {
        if let Some(rect) = tiny_skia::Rect::from_xywh(panel.x, panel.y, panel.width, panel.height)
        {
            pixmap.fill_rect(rect, &solid_paint(palette.background), Transform::identity(), None);
        }

        let line_paint = solid_paint(palette.line);

        // Outer border, centred on the panel edge
        let mut pb = PathBuilder::new();
        pb.move_to(panel.x, panel.y);
        pb.line_to(panel.right(), panel.y);
        pb.line_to(panel.right(), panel.bottom());
        pb.line_to(panel.x, panel.bottom());
        pb.close();
        if let Some(path) = pb.finish() {
            let border = tiny_skia::Stroke {
                width: layout.border_width,
                ..Default::default()
            };
            pixmap.stroke_path(&path, &line_paint, &border, Transform::identity(), None);
        }

        // Header grid: bottom of header, row split, label column
        let mut pb = PathBuilder::new();
        let header_bottom = panel.y + layout.header_height;
        pb.move_to(panel.x, header_bottom);
        pb.line_to(panel.right(), header_bottom);
        pb.move_to(panel.x, panel.y + layout.row_height);
        pb.line_to(panel.right(), panel.y + layout.row_height);
        pb.move_to(layout.divider_x, panel.y);
        pb.line_to(layout.divider_x, header_bottom);
        if let Some(path) = pb.finish() {
            let divider = tiny_skia::Stroke {
                width: layout.divider_width,
                ..Default::default()
            };
            pixmap.stroke_path(&path, &line_paint, &divider, Transform::identity(), None);
        }
    });

    let content = overlay.content();
    let Some(font) = font else {
        let has_text = [
            config.title_label.as_str(),
            config.location_label.as_str(),
            content.title.as_str(),
            content.location_details.as_str(),
            content.body.as_str(),
        ]
        .iter()
        .any(|t| !t.trim().is_empty());
        return if has_text {
            Err(Error::FontUnavailable)
        } else {
            Ok(())
        };
    };

    let style = |size: f32, h_align, v_align, bold| TextStyle {
        size,
        color: palette.text,
        h_align,
        v_align,
        bold,
    };

    // Both labels share one size, shrunk until the longer one fits its column
    let label_px = [&config.title_label, &config.location_label]
        .iter()
        .map(|label| font.fit_size(label, layout.label_font_px, layout.label_max_width, true))
        .fold(layout.label_font_px, f32::min);
    let label_style = style(label_px, HAlign::Center, VAlign::Middle, true);
    text::draw_text(
        img,
        font,
        layout.label_center_x,
        layout.row_centers[0],
        &config.title_label,
        label_style,
    );
    text::draw_text(
        img,
        font,
        layout.label_center_x,
        layout.row_centers[1],
        &config.location_label,
        label_style,
    );

    text::draw_text(
        img,
        font,
        layout.value_x,
        layout.row_centers[0],
        &content.title,
        style(layout.title_font_px, HAlign::Left, VAlign::Middle, false),
    );
    text::draw_text(
        img,
        font,
        layout.value_x,
        layout.row_centers[1],
        &content.location_details,
        style(layout.details_font_px, HAlign::Left, VAlign::Middle, false),
    );

    let body_style = style(layout.body_font_px, HAlign::Left, VAlign::Top, false);
    for (i, line) in content.body.split('\n').enumerate() {
        let origin = layout.body_line_origin(i);
        text::draw_text(img, font, origin.x, origin.y, line.trim_end_matches('\r'), body_style);
    }
    Ok(())
}

/// Deterministic renderer of the flattened photo
#[derive(Clone, Debug)]
pub struct Compositor {
    config: CompositorConfig,
    font: Option<BoardFont>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(CompositorConfig::default(), None)
    }
}

impl Compositor {
    /// Create a compositor; without an explicit font the bundled one is used
    pub fn new(config: CompositorConfig, font: Option<BoardFont>) -> Self {
        let font = font.or_else(|| match BoardFont::bundled() {
            Ok(font) => Some(font),
            Err(err) => {
                log::warn!("Bundled board font unavailable: {err}");
                None
            }
        });
        Self { config, font }
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    pub fn set_font(&mut self, font: Option<BoardFont>) {
        self.font = font;
    }

    /// Composite at native resolution
    ///
    /// Strokes are painted in iteration order, then the overlay on top when
    /// visible.
    pub fn composite<'a>(
        &self,
        photo: &SitePhoto,
        overlay: &Overlay,
        strokes: impl IntoIterator<Item = &'a Stroke>,
        frame: &GeometryFrame,
    ) -> Result<RgbaImage> {
        let mut img = photo.rgba.clone();

        for stroke in strokes {
            let projected = stroke.to_native(frame);
            match projected.effect {
                BrushEffect::Fill => draw_fill_stroke(&mut img, &projected),
                BrushEffect::Blur => {
                    draw_blur_stroke(&mut img, &projected, self.config.blur_strength)
                }
            }
        }

        if overlay.is_visible() {
            let layout = BoardLayout::new(overlay.bounds().to_native(frame), overlay.content());
            draw_signboard(&mut img, &layout, overlay, self.font.as_ref(), &self.config)?;
        }

        Ok(img)
    }

    /// Render committed strokes and the overlay, then encode for download
    pub fn render(
        &self,
        photo: &SitePhoto,
        overlay: &Overlay,
        strokes: &StrokeLog,
        frame: &GeometryFrame,
    ) -> Result<ExportedImage> {
        let img = self.composite(photo, overlay, strokes.strokes(), frame)?;
        ExportedImage::encode(img, &self.config, export::timestamp_millis())
    }

    /// Render the live preview at the displayed size
    ///
    /// `base` is the photo already scaled to the display (see
    /// [`SitePhoto::scaled_to`]), so strokes and the board are drawn at display
    /// resolution. Unlike [`Compositor::render`], the in-progress stroke is
    /// included.
    pub fn preview(
        &self,
        base: &SitePhoto,
        overlay: &Overlay,
        strokes: &StrokeLog,
        displayed: DisplayRect,
    ) -> Result<RgbaImage> {
        let frame = GeometryFrame::new(base.width(), base.height(), displayed)?;
        let all = strokes.strokes().iter().chain(strokes.current());
        self.composite(base, overlay, all, &frame)
    }
}
