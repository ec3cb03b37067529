//! Geometric types and the display-to-native coordinate mapping
//!
//! Display space is the editor's on-screen coordinate system (the container
//! the photo is letterboxed into). Native space is the photo's own pixel grid.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A point in either display or native space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis selector for length scaling
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Where the photo is drawn inside its container, in display pixels
///
/// `left`/`top` are relative to the container origin, which is the same
/// origin overlay bounds and pointer positions use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Check if this rectangle contains a point
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left
            && p.x < self.left + self.width
            && p.y >= self.top
            && p.y < self.top + self.height
    }

    /// Whether the rectangle can be used to derive a geometry frame
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle in native pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NativeRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl NativeRect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Scale + offset transform relating display space to native space
///
/// Derived from the photo's native size and the rectangle it currently
/// occupies on screen. Never cache one across a viewport change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryFrame {
    pub scale_x: f32,
    pub scale_y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl GeometryFrame {
    /// Derive the frame for a photo of `native_width` x `native_height`
    /// displayed at `displayed`.
    ///
    /// Fails with [`Error::EmptyDisplay`] when the displayed rectangle has no
    /// area, since the scale would be undefined.
    pub fn new(native_width: u32, native_height: u32, displayed: DisplayRect) -> Result<Self> {
        if !displayed.is_measurable() {
            return Err(Error::EmptyDisplay {
                width: displayed.width,
                height: displayed.height,
            });
        }
        Ok(Self {
            scale_x: native_width as f32 / displayed.width,
            scale_y: native_height as f32 / displayed.height,
            offset_x: displayed.left,
            offset_y: displayed.top,
        })
    }

    /// Project a display-space point into native space
    #[inline]
    pub fn to_native(&self, p: Point) -> Point {
        Point {
            x: (p.x - self.offset_x) * self.scale_x,
            y: (p.y - self.offset_y) * self.scale_y,
        }
    }

    /// Inverse of [`GeometryFrame::to_native`]
    #[inline]
    pub fn to_display(&self, p: Point) -> Point {
        Point {
            x: p.x / self.scale_x + self.offset_x,
            y: p.y / self.scale_y + self.offset_y,
        }
    }

    /// Scale a display-space length along one axis
    #[inline]
    pub fn scale_length(&self, len: f32, axis: Axis) -> f32 {
        match axis {
            Axis::X => len * self.scale_x,
            Axis::Y => len * self.scale_y,
        }
    }

    /// Project a display-space rectangle (origin + size) into native space
    pub fn project_rect(&self, x: f32, y: f32, width: f32, height: f32) -> NativeRect {
        let origin = self.to_native(Point::new(x, y));
        NativeRect {
            x: origin.x,
            y: origin.y,
            width: self.scale_length(width, Axis::X),
            height: self.scale_length(height, Axis::Y),
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn uniform_frame_strategy() -> impl Strategy<Value = GeometryFrame> {
        (1u32..8000, 1.0f32..4000.0, -200.0f32..200.0, -200.0f32..200.0).prop_map(
            |(native, displayed, left, top)| {
                GeometryFrame::new(
                    native,
                    native,
                    DisplayRect::new(left, top, displayed, displayed),
                )
                .unwrap()
            },
        )
    }

    /// Projecting a length and dividing by the uniform scale recovers it.
    fn check_scale_round_trip(
        frame: GeometryFrame,
        len: f32,
    ) -> std::result::Result<(), TestCaseError> {
        let s = frame.scale_x;
        for axis in [Axis::X, Axis::Y] {
            let projected = frame.scale_length(len, axis);
            let recovered = frame.scale_length(projected / s, axis) / s;
            prop_assert!(
                (recovered - len).abs() <= len.max(1.0) * 1e-5,
                "{len} -> {projected} -> {recovered}"
            );
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn scale_round_trip(frame in uniform_frame_strategy(), len in 0.0f32..2000.0) {
            check_scale_round_trip(frame, len)?;
        }

        #[test]
        fn projected_points_are_finite(frame in uniform_frame_strategy(), x in -5000.0f32..5000.0, y in -5000.0f32..5000.0) {
            let p = frame.to_native(Point::new(x, y));
            prop_assert!(p.x.is_finite() && p.y.is_finite());
        }
    }
}
