//! Editing session context
//!
//! One [`Session`] owns every model for a single photo-editing session. The
//! editor shell holds it and feeds it [`EditMsg`](super::messages::EditMsg)s.

use image::RgbaImage;

use super::controller::{PlacementState, ToolMode};
use crate::config::{CompositorConfig, HexColor};
use crate::domain::{
    BrushEffect, DisplayRect, GeometryFrame, Overlay, Point, StrokeLog, clamp_brush_radius,
};
use crate::error::{Error, Result};
use crate::photo::SitePhoto;
use crate::render::{BoardFont, Compositor, ExportedImage};

/// Issued when a photo load starts; only the latest ticket is honoured
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Brush used for the next stroke
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushSettings {
    /// Radius in display pixels, within [5, 100]
    pub radius: f32,
    pub effect: BrushEffect,
    pub fill_color: HexColor,
}

impl BrushSettings {
    fn from_config(config: &CompositorConfig) -> Self {
        Self {
            radius: clamp_brush_radius(config.default_brush_radius),
            effect: BrushEffect::default(),
            fill_color: config.default_fill_color,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    pub(crate) compositor: Compositor,
    pub(crate) photo: Option<SitePhoto>,
    pub(crate) load_generation: u64,
    pub(crate) viewport: Option<DisplayRect>,
    pub(crate) overlay: Overlay,
    pub(crate) strokes: StrokeLog,
    pub(crate) tool: ToolMode,
    pub(crate) brush: BrushSettings,
    pub(crate) placement: PlacementState,
    /// Photo resampled to the viewport size, reused across previews
    pub(crate) preview_base: Option<SitePhoto>,
    /// Last rendered preview, sampled by the eyedropper; `None` once stale
    pub(crate) preview: Option<RgbaImage>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(CompositorConfig::default(), None)
    }
}

impl Session {
    pub fn new(config: CompositorConfig, font: Option<BoardFont>) -> Self {
        let brush = BrushSettings::from_config(&config);
        Self {
            compositor: Compositor::new(config, font),
            photo: None,
            load_generation: 0,
            viewport: None,
            overlay: Overlay::default(),
            strokes: StrokeLog::new(),
            tool: ToolMode::default(),
            brush,
            placement: PlacementState::default(),
            preview_base: None,
            preview: None,
        }
    }

    pub fn config(&self) -> &CompositorConfig {
        self.compositor.config()
    }

    pub fn photo(&self) -> Option<&SitePhoto> {
        self.photo.as_ref()
    }

    pub fn viewport(&self) -> Option<DisplayRect> {
        self.viewport
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn strokes(&self) -> &StrokeLog {
        &self.strokes
    }

    pub fn tool_mode(&self) -> ToolMode {
        self.tool
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    pub fn placement(&self) -> PlacementState {
        self.placement
    }

    /// Fill colour the eyedropper last picked (or the shell last set)
    pub fn fill_color(&self) -> HexColor {
        self.brush.fill_color
    }

    /// The most recently rendered preview, if it still matches the session
    pub fn preview(&self) -> Option<&RgbaImage> {
        self.preview.as_ref()
    }

    /// Drop the cached preview after an edit
    pub fn invalidate_preview(&mut self) {
        self.preview = None;
    }

    /// Start a photo load; any earlier ticket becomes stale
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        LoadTicket(self.load_generation)
    }

    /// Accept a decoded photo if `ticket` is still the latest load
    ///
    /// Replacing the photo clears all strokes, puts the board back at its
    /// default placement and forgets the measured viewport.
    pub fn finish_load(&mut self, ticket: LoadTicket, photo: SitePhoto) -> bool {
        if ticket.0 != self.load_generation {
            log::warn!(
                "Dropping superseded photo load #{} (latest is #{})",
                ticket.0,
                self.load_generation
            );
            return false;
        }
        log::debug!("Photo loaded: {}x{}", photo.width(), photo.height());
        self.photo = Some(photo);
        self.viewport = None;
        self.preview_base = None;
        self.preview = None;
        self.strokes.clear_all();
        self.overlay.reset_placement();
        self.placement = PlacementState::Idle;
        true
    }

    /// Load a photo that is already decoded
    pub fn set_photo(&mut self, photo: SitePhoto) {
        let ticket = self.begin_load();
        self.finish_load(ticket, photo);
    }

    /// Record where the photo is currently displayed
    pub fn set_viewport(&mut self, rect: DisplayRect) {
        if self.viewport != Some(rect) {
            self.viewport = Some(rect);
            self.preview_base = None;
            self.preview = None;
        }
    }

    pub fn set_tool_mode(&mut self, mode: ToolMode) {
        if self.tool != mode {
            log::debug!("Tool mode {:?} -> {:?}", self.tool, mode);
            self.tool = mode;
        }
    }

    /// Set the brush radius, clamped into [5, 100]; returns the stored value
    pub fn set_brush_radius(&mut self, radius: f32) -> f32 {
        self.brush.radius = clamp_brush_radius(radius);
        self.brush.radius
    }

    pub fn set_brush_effect(&mut self, effect: BrushEffect) {
        self.brush.effect = effect;
    }

    /// Set the fill colour from a hex string; the previous colour is kept on error
    pub fn set_fill_color(&mut self, hex: &str) -> Result<HexColor> {
        let color = HexColor::parse(hex)?;
        self.brush.fill_color = color;
        Ok(color)
    }

    /// Geometry frame for the current photo and viewport
    pub fn frame(&self) -> Result<GeometryFrame> {
        let photo = self.photo.as_ref().ok_or(Error::PhotoNotLoaded)?;
        let viewport = self.viewport.ok_or(Error::ViewportNotMeasured)?;
        GeometryFrame::new(photo.width(), photo.height(), viewport)
    }

    /// Re-render the live preview and keep it for eyedropper sampling
    ///
    /// Drawing happens at display resolution on a resampled copy of the photo,
    /// so the cost follows the viewport size rather than the photo size.
    pub fn render_preview(&mut self) -> Result<&RgbaImage> {
        // Validates photo and viewport before anything is resampled
        self.frame()?;
        let (Some(photo), Some(viewport)) = (self.photo.as_ref(), self.viewport) else {
            return Err(Error::PhotoNotLoaded);
        };
        let base = self
            .preview_base
            .get_or_insert_with(|| photo.scaled_to(viewport));
        let preview = self
            .compositor
            .preview(base, &self.overlay, &self.strokes, viewport)?;
        let preview = self.preview.insert(preview);
        Ok(&*preview)
    }

    /// Render and encode the final composite at native resolution
    ///
    /// Fails before drawing anything if no photo is loaded or the viewport
    /// has not been measured.
    pub fn export(&self) -> Result<ExportedImage> {
        let frame = self.frame()?;
        let photo = self.photo.as_ref().ok_or(Error::PhotoNotLoaded)?;
        let exported = self
            .compositor
            .render(photo, &self.overlay, &self.strokes, &frame)?;
        log::info!("Exported {} ({} bytes)", exported.filename, exported.bytes.len());
        Ok(exported)
    }

    /// Colour of the rendered canvas under a display-space point
    ///
    /// A stale preview is re-rendered first. `None` when nothing can be
    /// rendered yet or the point is off-canvas.
    pub fn sample_color(&mut self, p: Point) -> Option<HexColor> {
        if self.preview.is_none() {
            if let Err(err) = self.render_preview() {
                log::debug!("Nothing to sample: {err}");
                return None;
            }
        }
        let preview = self.preview.as_ref()?;
        let viewport = self.viewport?;
        let x = (p.x - viewport.left).floor();
        let y = (p.y - viewport.top).floor();
        if x < 0.0 || y < 0.0 || x >= preview.width() as f32 || y >= preview.height() as f32 {
            return None;
        }
        Some(HexColor::from(*preview.get_pixel(x as u32, y as u32)))
    }
}
