//! Edit message handlers
//!
//! Handles EditMsg for board editing, brush settings and pointer input.

use super::controller::{self, PlacementState};
use super::messages::{EditMsg, PointerEvent};
use super::state::Session;
use crate::error::Result;

/// Handle an EditMsg, modifying Session state
///
/// Any edit makes the cached preview stale. Only `SetFillColor` can fail;
/// the session is left unchanged when it does.
pub fn handle_edit_msg(session: &mut Session, msg: EditMsg) -> Result<()> {
    session.invalidate_preview();
    match msg {
        EditMsg::SetText(field, text) => session.overlay.set_text(field, text),
        EditMsg::SetScale(field, scale) => {
            session.overlay.set_scale(field, scale);
        }
        EditMsg::SetContent(update) => session.overlay.set_content(update),
        EditMsg::SetVariant(variant) => session.overlay.set_variant(variant),
        EditMsg::ShowBoard => session.overlay.show(),
        EditMsg::HideBoard => hide_board(session),
        EditMsg::SetBounds(bounds) => {
            session.overlay.set_bounds(bounds);
        }
        EditMsg::SetToolMode(mode) => {
            // Switching tools abandons whatever gesture was running
            controller::pointer_up(session);
            session.set_tool_mode(mode);
        }
        EditMsg::SetBrushRadius(radius) => {
            session.set_brush_radius(radius);
        }
        EditMsg::SetBrushEffect(effect) => session.set_brush_effect(effect),
        EditMsg::SetFillColor(hex) => {
            session.set_fill_color(&hex)?;
        }
        EditMsg::Undo => {
            if session.strokes.undo_last().is_none() {
                log::debug!("Nothing to undo");
            }
        }
        EditMsg::ResetBoard => session.overlay.reset(),
        EditMsg::ClearStrokes => clear_strokes(session),
        EditMsg::SetViewport(rect) => session.set_viewport(rect),
        EditMsg::Pointer(event) => handle_pointer(session, event),
    }
    Ok(())
}

fn handle_pointer(session: &mut Session, event: PointerEvent) {
    match event {
        PointerEvent::Down(p) => controller::pointer_down(session, p),
        PointerEvent::Move(p) => controller::pointer_move(session, p),
        PointerEvent::Up | PointerEvent::Leave => controller::pointer_up(session),
    }
}

fn hide_board(session: &mut Session) {
    session.overlay.hide();
    // A hidden board can't keep being dragged
    if matches!(
        session.placement,
        PlacementState::DraggingOverlay { .. } | PlacementState::ResizingOverlay { .. }
    ) {
        session.placement = PlacementState::Idle;
    }
}

fn clear_strokes(session: &mut Session) {
    session.strokes.clear_all();
    if session.placement == PlacementState::Painting {
        session.placement = PlacementState::Idle;
    }
}
