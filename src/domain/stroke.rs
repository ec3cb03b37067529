//! Brush strokes and the ordered stroke log
//!
//! Stroke points are stored in display space. The log is append-only apart
//! from undo (a stack pop) and a full clear on photo replacement.

use serde::{Deserialize, Serialize};

use super::geometry::{Axis, GeometryFrame, Point};
use crate::config::HexColor;

/// Smallest brush radius in display pixels
pub const MIN_BRUSH_RADIUS: f32 = 5.0;
/// Largest brush radius in display pixels
pub const MAX_BRUSH_RADIUS: f32 = 100.0;
/// Points required for a stroke to be committed
pub const MIN_COMMIT_POINTS: usize = 2;

/// Clamp a brush radius into [`MIN_BRUSH_RADIUS`, `MAX_BRUSH_RADIUS`]
pub fn clamp_brush_radius(radius: f32) -> f32 {
    if radius.is_nan() {
        MIN_BRUSH_RADIUS
    } else {
        radius.clamp(MIN_BRUSH_RADIUS, MAX_BRUSH_RADIUS)
    }
}

/// What a stroke does to the pixels under it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrushEffect {
    /// Blur the photo under the stroke
    #[default]
    Blur,
    /// Paint the stroke in a solid colour
    Fill,
}

/// One continuous brush gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Polyline in display space, in drawing order
    pub points: Vec<Point>,
    /// Brush radius in display pixels
    pub radius: f32,
    #[serde(default)]
    pub effect: BrushEffect,
    /// Only meaningful for [`BrushEffect::Fill`]
    #[serde(default)]
    pub fill_color: HexColor,
}

impl Stroke {
    /// Project the stroke into native space
    ///
    /// The radius is scaled by the X axis scale, like the X coordinates.
    pub fn to_native(&self, frame: &GeometryFrame) -> ProjectedStroke {
        ProjectedStroke {
            points: self.points.iter().map(|&p| frame.to_native(p)).collect(),
            radius: frame.scale_length(self.radius, Axis::X),
            effect: self.effect,
            fill_color: self.fill_color,
        }
    }
}

/// A stroke projected into native pixels, ready to rasterize
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedStroke {
    pub points: Vec<Point>,
    pub radius: f32,
    pub effect: BrushEffect,
    pub fill_color: HexColor,
}

impl ProjectedStroke {
    /// Line width covering the brush footprint
    pub fn width(&self) -> f32 {
        self.radius * 2.0
    }
}

/// Committed strokes in commit order plus at most one in-progress stroke
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeLog {
    strokes: Vec<Stroke>,
    current: Option<Stroke>,
}

impl StrokeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed strokes, oldest first (rendering order)
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// The in-progress stroke, if a gesture is underway
    pub fn current(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }

    pub fn is_painting(&self) -> bool {
        self.current.is_some()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Start a stroke at `point`
    ///
    /// Returns false (and changes nothing) if a stroke is already in progress.
    pub fn begin_stroke(
        &mut self,
        point: Point,
        radius: f32,
        effect: BrushEffect,
        fill_color: HexColor,
    ) -> bool {
        if self.current.is_some() {
            log::debug!("Ignoring begin_stroke while a stroke is in progress");
            return false;
        }
        self.current = Some(Stroke {
            points: vec![point],
            radius: clamp_brush_radius(radius),
            effect,
            fill_color,
        });
        true
    }

    /// Append a point to the in-progress stroke; no-op when idle
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        match self.current.as_mut() {
            Some(stroke) => {
                stroke.points.push(point);
                true
            }
            None => false,
        }
    }

    /// Finish the in-progress stroke
    ///
    /// Strokes with fewer than [`MIN_COMMIT_POINTS`] points are discarded.
    /// Returns true if a stroke was appended to the log.
    pub fn commit_stroke(&mut self) -> bool {
        let Some(stroke) = self.current.take() else {
            return false;
        };
        if stroke.points.len() < MIN_COMMIT_POINTS {
            log::debug!("Discarding stroke with {} point(s)", stroke.points.len());
            return false;
        }
        log::debug!(
            "Committed {:?} stroke #{} with {} points",
            stroke.effect,
            self.strokes.len() + 1,
            stroke.points.len()
        );
        self.strokes.push(stroke);
        true
    }

    /// Drop the in-progress stroke without committing it
    pub fn cancel_stroke(&mut self) {
        self.current = None;
    }

    /// Remove the most recently committed stroke
    pub fn undo_last(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    /// Empty the log and drop any in-progress stroke
    pub fn clear_all(&mut self) {
        self.strokes.clear();
        self.current = None;
    }

    /// Append an already complete stroke, subject to the commit threshold
    pub fn push_committed(&mut self, stroke: Stroke) -> bool {
        let mut points = stroke.points.into_iter();
        let Some(first) = points.next() else {
            return false;
        };
        if !self.begin_stroke(first, stroke.radius, stroke.effect, stroke.fill_color) {
            return false;
        }
        for p in points {
            self.extend_stroke(p);
        }
        self.commit_stroke()
    }
}
