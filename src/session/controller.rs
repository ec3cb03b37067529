//! Pointer gesture handling
//!
//! Turns pointer down/move/up into overlay moves, overlay resizes and brush
//! strokes depending on the active tool. Only one gesture runs at a time.

use super::state::Session;
use crate::domain::{BrushEffect, OverlayBounds, Point};

/// Active editing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    /// Move and resize the signboard
    #[default]
    Select,
    /// Paint blur or fill strokes
    Erase,
    /// Pick the fill colour from the rendered canvas
    Eyedropper,
}

/// Gesture currently in progress, with the origin captured at pointer-down
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlacementState {
    #[default]
    Idle,
    DraggingOverlay {
        /// Pointer position at pointer-down
        start: Point,
        /// Overlay position at pointer-down
        origin: Point,
    },
    ResizingOverlay {
        start: Point,
        origin_width: f32,
        origin_height: f32,
    },
    Painting,
}

impl PlacementState {
    pub fn is_idle(&self) -> bool {
        matches!(self, PlacementState::Idle)
    }
}

/// Handle pointer-down at a display-space position
pub fn pointer_down(session: &mut Session, p: Point) {
    if !session.placement.is_idle() {
        log::debug!("Ignoring pointer-down during {:?}", session.placement);
        return;
    }

    match session.tool {
        ToolMode::Select => start_overlay_gesture(session, p),
        ToolMode::Erase => start_painting(session, p),
        ToolMode::Eyedropper => pick_color(session, p),
    }
}

/// Handle pointer movement while a gesture is active
pub fn pointer_move(session: &mut Session, p: Point) {
    match session.placement {
        PlacementState::Idle => {}
        PlacementState::DraggingOverlay { start, origin } => {
            let bounds = session.overlay.bounds();
            session.overlay.set_bounds(OverlayBounds {
                x: origin.x + (p.x - start.x),
                y: origin.y + (p.y - start.y),
                ..bounds
            });
        }
        PlacementState::ResizingOverlay {
            start,
            origin_width,
            origin_height,
        } => {
            let bounds = session.overlay.bounds();
            // set_bounds clamps each axis to its minimum independently
            session.overlay.set_bounds(OverlayBounds {
                width: origin_width + (p.x - start.x),
                height: origin_height + (p.y - start.y),
                ..bounds
            });
        }
        PlacementState::Painting => {
            session.strokes.extend_stroke(p);
        }
    }
}

/// Handle pointer release (or the pointer leaving the canvas)
pub fn pointer_up(session: &mut Session) {
    if let PlacementState::Painting = session.placement {
        session.strokes.commit_stroke();
    }
    if !session.placement.is_idle() {
        log::debug!("Gesture {:?} finished", session.placement);
    }
    session.placement = PlacementState::Idle;
}

fn start_overlay_gesture(session: &mut Session, p: Point) {
    let bounds = session.overlay.bounds();
    if !session.overlay.is_visible() || !bounds.contains(p) {
        return;
    }

    session.placement = if bounds.in_resize_hotspot(p) {
        PlacementState::ResizingOverlay {
            start: p,
            origin_width: bounds.width,
            origin_height: bounds.height,
        }
    } else {
        PlacementState::DraggingOverlay {
            start: p,
            origin: Point::new(bounds.x, bounds.y),
        }
    };
}

fn start_painting(session: &mut Session, p: Point) {
    let on_canvas = session.photo.is_some() && session.viewport.is_some_and(|v| v.contains(p));
    if !on_canvas {
        return;
    }

    let brush = session.brush;
    if session
        .strokes
        .begin_stroke(p, brush.radius, brush.effect, brush.fill_color)
    {
        session.placement = PlacementState::Painting;
    }
}

/// Sample the rendered canvas and switch to fill painting
///
/// A miss (nothing rendered yet, or off-canvas) keeps both the previous
/// fill colour and the eyedropper tool.
fn pick_color(session: &mut Session, p: Point) {
    match session.sample_color(p) {
        Some(color) => {
            log::debug!("Eyedropper picked {color}");
            session.brush.fill_color = color;
            session.brush.effect = BrushEffect::Fill;
            session.set_tool_mode(ToolMode::Erase);
        }
        None => log::debug!("Eyedropper missed the canvas at ({}, {})", p.x, p.y),
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::config::HexColor;
    use crate::domain::DisplayRect;
    use crate::photo::SitePhoto;

    fn session() -> Session {
        let mut session = Session::default();
        session.set_photo(SitePhoto::new(RgbaImage::from_pixel(
            800,
            600,
            Rgba([200, 100, 50, 255]),
        )));
        session.set_viewport(DisplayRect::new(0.0, 0.0, 800.0, 600.0));
        session
    }

    #[test]
    fn test_drag_moves_overlay_by_delta() {
        let mut s = session();
        pointer_down(&mut s, Point::new(50.0, 50.0));
        assert!(matches!(s.placement(), PlacementState::DraggingOverlay { .. }));

        pointer_move(&mut s, Point::new(80.0, 40.0));
        pointer_move(&mut s, Point::new(150.0, 90.0));
        assert_eq!(s.overlay().bounds(), OverlayBounds::new(120.0, 60.0, 240.0, 180.0));

        pointer_up(&mut s);
        assert!(s.placement().is_idle());
        pointer_move(&mut s, Point::new(400.0, 400.0));
        assert_eq!(s.overlay().bounds().x, 120.0);
    }

    #[test]
    fn test_resize_from_corner_clamps_per_axis() {
        let mut s = session();
        // bottom-right corner of the default board is (260, 200)
        pointer_down(&mut s, Point::new(255.0, 195.0));
        assert!(matches!(s.placement(), PlacementState::ResizingOverlay { .. }));

        pointer_move(&mut s, Point::new(305.0, 215.0));
        assert_eq!(s.overlay().bounds(), OverlayBounds::new(20.0, 20.0, 290.0, 200.0));

        pointer_move(&mut s, Point::new(0.0, 215.0));
        assert_eq!(s.overlay().bounds(), OverlayBounds::new(20.0, 20.0, 100.0, 200.0));
        pointer_up(&mut s);
    }

    #[test]
    fn test_select_ignores_clicks_off_overlay_or_hidden() {
        let mut s = session();
        pointer_down(&mut s, Point::new(500.0, 500.0));
        assert!(s.placement().is_idle());

        s.overlay.hide();
        pointer_down(&mut s, Point::new(50.0, 50.0));
        assert!(s.placement().is_idle());
    }

    #[test]
    fn test_painting_commits_on_release() {
        let mut s = session();
        s.set_tool_mode(ToolMode::Erase);
        pointer_down(&mut s, Point::new(50.0, 50.0));
        assert_eq!(s.placement(), PlacementState::Painting);
        pointer_move(&mut s, Point::new(60.0, 60.0));
        pointer_up(&mut s);

        assert_eq!(s.strokes().len(), 1);
        assert_eq!(
            s.strokes().strokes()[0].points,
            vec![Point::new(50.0, 50.0), Point::new(60.0, 60.0)]
        );
        // Erase mode never moves the board
        assert_eq!(s.overlay().bounds(), OverlayBounds::default());
    }

    #[test]
    fn test_tap_without_move_commits_nothing() {
        let mut s = session();
        s.set_tool_mode(ToolMode::Erase);
        pointer_down(&mut s, Point::new(50.0, 50.0));
        pointer_up(&mut s);
        assert!(s.strokes().is_empty());
    }

    #[test]
    fn test_second_pointer_down_while_painting_is_ignored() {
        let mut s = session();
        s.set_tool_mode(ToolMode::Erase);
        pointer_down(&mut s, Point::new(50.0, 50.0));
        pointer_move(&mut s, Point::new(55.0, 55.0));
        pointer_down(&mut s, Point::new(300.0, 300.0));
        pointer_move(&mut s, Point::new(60.0, 60.0));
        pointer_up(&mut s);

        assert_eq!(s.strokes().len(), 1);
        assert_eq!(
            s.strokes().strokes()[0].points,
            vec![
                Point::new(50.0, 50.0),
                Point::new(55.0, 55.0),
                Point::new(60.0, 60.0)
            ]
        );
    }

    #[test]
    fn test_painting_requires_canvas() {
        let mut s = session();
        s.set_tool_mode(ToolMode::Erase);
        pointer_down(&mut s, Point::new(900.0, 50.0));
        assert!(s.placement().is_idle());

        let mut s = Session::default();
        s.set_tool_mode(ToolMode::Erase);
        pointer_down(&mut s, Point::new(10.0, 10.0));
        assert!(s.placement().is_idle());
    }

    #[test]
    fn test_eyedropper_picks_and_switches_to_fill() {
        let mut s = session();
        s.overlay.hide();
        s.render_preview().unwrap();
        s.set_tool_mode(ToolMode::Eyedropper);

        pointer_down(&mut s, Point::new(400.0, 300.0));

        assert_eq!(s.fill_color(), HexColor::rgb(200, 100, 50));
        assert_eq!(s.brush().effect, BrushEffect::Fill);
        assert_eq!(s.tool_mode(), ToolMode::Erase);
        assert!(s.placement().is_idle());
        assert!(s.strokes().current().is_none());
    }

    #[test]
    fn test_eyedropper_miss_keeps_previous_color() {
        let mut s = session();
        s.render_preview().unwrap();
        s.set_fill_color("#123456").unwrap();
        s.set_tool_mode(ToolMode::Eyedropper);

        pointer_down(&mut s, Point::new(-10.0, 300.0));

        assert_eq!(s.fill_color(), HexColor::rgb(0x12, 0x34, 0x56));
        assert_eq!(s.tool_mode(), ToolMode::Eyedropper);
    }
}
