//! Signboard overlay model
//!
//! Bounds are stored in display space; the compositor projects them into
//! native space at render time.

use serde::{Deserialize, Serialize};

use super::geometry::{GeometryFrame, NativeRect, Point};

/// Minimum overlay width in display pixels
pub const MIN_WIDTH: f32 = 100.0;
/// Minimum overlay height in display pixels
pub const MIN_HEIGHT: f32 = 80.0;
/// Side of the square resize hotspot at the bottom-right corner
pub const RESIZE_HOTSPOT: f32 = 20.0;
/// Smallest text scale factor
pub const MIN_SCALE: f32 = 0.5;
/// Largest text scale factor
pub const MAX_SCALE: f32 = 2.0;

/// Signboard position and size in display pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for OverlayBounds {
    fn default() -> Self {
        Self {
            x: 20.0,
            y: 20.0,
            width: 240.0,
            height: 180.0,
        }
    }
}

impl OverlayBounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Copy with width/height raised to the minimums
    pub fn clamped(self) -> Self {
        Self {
            width: clamp_min(self.width, MIN_WIDTH),
            height: clamp_min(self.height, MIN_HEIGHT),
            ..self
        }
    }

    /// Check if this rectangle contains a point
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Whether a point falls in the bottom-right resize corner
    pub fn in_resize_hotspot(&self, p: Point) -> bool {
        self.contains(p)
            && p.x - self.x > self.width - RESIZE_HOTSPOT
            && p.y - self.y > self.height - RESIZE_HOTSPOT
    }

    /// Project into native space
    pub fn to_native(&self, frame: &GeometryFrame) -> NativeRect {
        frame.project_rect(self.x, self.y, self.width, self.height)
    }
}

/// `max` that also maps NaN to the minimum
fn clamp_min(value: f32, min: f32) -> f32 {
    if value.is_nan() { min } else { value.max(min) }
}

/// Clamp a text scale factor into [`MIN_SCALE`, `MAX_SCALE`]
///
/// Returns `None` for NaN so callers can keep their previous value.
pub fn clamp_scale(value: f32) -> Option<f32> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(MIN_SCALE, MAX_SCALE))
    }
}

/// Editable text fields on the signboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextField {
    /// First header row ("Project Name")
    Title,
    /// Second header row ("Location")
    LocationDetails,
    /// Multi-line body below the header
    Body,
}

/// Board styling variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoardVariant {
    /// Dark teal chalkboard with white text and lines
    #[default]
    DarkBoard,
    /// White board with dark text and lines
    LightBoard,
}

/// Text shown on the signboard, with per-field scale factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignboardContent {
    pub title: String,
    pub location_details: String,
    /// May contain `\n` line breaks
    pub body: String,
    pub title_scale: f32,
    pub details_scale: f32,
    pub body_scale: f32,
}

impl Default for SignboardContent {
    fn default() -> Self {
        Self {
            title: String::new(),
            location_details: String::new(),
            body: String::new(),
            title_scale: 1.0,
            details_scale: 1.0,
            body_scale: 1.0,
        }
    }
}

impl SignboardContent {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Title => &self.title,
            TextField::LocationDetails => &self.location_details,
            TextField::Body => &self.body,
        }
    }

    pub fn scale(&self, field: TextField) -> f32 {
        match field {
            TextField::Title => self.title_scale,
            TextField::LocationDetails => self.details_scale,
            TextField::Body => self.body_scale,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Title => &mut self.title,
            TextField::LocationDetails => &mut self.location_details,
            TextField::Body => &mut self.body,
        }
    }

    fn scale_mut(&mut self, field: TextField) -> &mut f32 {
        match field {
            TextField::Title => &mut self.title_scale,
            TextField::LocationDetails => &mut self.details_scale,
            TextField::Body => &mut self.body_scale,
        }
    }
}

/// Partial update of [`SignboardContent`]; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentUpdate {
    pub title: Option<String>,
    pub location_details: Option<String>,
    pub body: Option<String>,
    pub title_scale: Option<f32>,
    pub details_scale: Option<f32>,
    pub body_scale: Option<f32>,
}

/// The signboard: content, style, placement and visibility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overlay {
    content: SignboardContent,
    variant: BoardVariant,
    bounds: OverlayBounds,
    visible: bool,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            content: SignboardContent::default(),
            variant: BoardVariant::default(),
            bounds: OverlayBounds::default(),
            visible: true,
        }
    }
}

impl Overlay {
    pub fn content(&self) -> &SignboardContent {
        &self.content
    }

    pub fn variant(&self) -> BoardVariant {
        self.variant
    }

    pub fn bounds(&self) -> OverlayBounds {
        self.bounds
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Apply a partial content update; scale fields are clamped
    pub fn set_content(&mut self, update: ContentUpdate) {
        let texts = [
            (TextField::Title, update.title),
            (TextField::LocationDetails, update.location_details),
            (TextField::Body, update.body),
        ];
        for (field, text) in texts {
            if let Some(text) = text {
                self.set_text(field, text);
            }
        }

        let scales = [
            (TextField::Title, update.title_scale),
            (TextField::LocationDetails, update.details_scale),
            (TextField::Body, update.body_scale),
        ];
        for (field, scale) in scales {
            if let Some(scale) = scale {
                self.set_scale(field, scale);
            }
        }
    }

    pub fn set_text(&mut self, field: TextField, text: impl Into<String>) {
        *self.content.text_mut(field) = text.into();
    }

    /// Set a field's scale factor, clamped into range; returns the stored value
    pub fn set_scale(&mut self, field: TextField, value: f32) -> f32 {
        let slot = self.content.scale_mut(field);
        match clamp_scale(value) {
            Some(clamped) => {
                if clamped != value {
                    log::debug!("Clamped {field:?} scale {value} to {clamped}");
                }
                *slot = clamped;
            }
            None => log::debug!("Ignoring non-numeric {field:?} scale"),
        }
        *slot
    }

    pub fn set_variant(&mut self, variant: BoardVariant) {
        self.variant = variant;
    }

    /// Replace the bounds, enforcing the minimum size; returns the stored bounds
    pub fn set_bounds(&mut self, bounds: OverlayBounds) -> OverlayBounds {
        self.bounds = bounds.clamped();
        self.bounds
    }

    /// Restore empty text and unit scales; bounds, variant and visibility stay
    pub fn reset(&mut self) {
        self.content = SignboardContent::default();
    }

    /// Put the board back at its default position and size
    pub fn reset_placement(&mut self) {
        self.bounds = OverlayBounds::default();
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}
