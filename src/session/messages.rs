//! Message types for an editing session
//!
//! The editor shell translates UI input into these and hands them to
//! [`handle_edit_msg`](super::handlers::handle_edit_msg).

use crate::domain::{
    BoardVariant, BrushEffect, ContentUpdate, DisplayRect, OverlayBounds, Point, TextField,
};

use super::controller::ToolMode;

// ============================================================================
// Pointer Types
// ============================================================================

/// Pointer input in display space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    /// Pointer left the canvas; ends the gesture like `Up`
    Leave,
}

// ============================================================================
// Edit Messages
// ============================================================================

/// All editing messages
#[derive(Debug, Clone, PartialEq)]
pub enum EditMsg {
    /// Replace the text of one board field
    SetText(TextField, String),
    /// Set one field's text scale (clamped; NaN ignored)
    SetScale(TextField, f32),
    /// Partial content update
    SetContent(ContentUpdate),
    SetVariant(BoardVariant),
    ShowBoard,
    HideBoard,
    /// Place the board directly (min size enforced)
    SetBounds(OverlayBounds),
    SetToolMode(ToolMode),
    SetBrushRadius(f32),
    SetBrushEffect(BrushEffect),
    /// Fill colour as `#rgb` or `#rrggbb`
    SetFillColor(String),
    /// Remove the most recent committed stroke
    Undo,
    /// Restore empty board text and unit scales; variant, bounds and visibility stay
    ResetBoard,
    /// Drop every stroke, including one in progress
    ClearStrokes,
    /// The photo's on-screen rectangle changed
    SetViewport(DisplayRect),
    Pointer(PointerEvent),
}
