//! Editing session module
//!
//! This module contains:
//! - The session context owning photo, board, strokes and tool state
//! - Pointer gesture handling (drag, resize, paint, eyedropper)
//! - Message types and handlers for the editor shell
//! - Saved scenes for headless export

pub mod controller;
pub mod handlers;
pub mod messages;
pub mod scene;
pub mod state;

pub use self::controller::{PlacementState, ToolMode};
pub use self::handlers::handle_edit_msg;
pub use self::messages::{EditMsg, PointerEvent};
pub use self::scene::Scene;
pub use self::state::{BrushSettings, LoadTicket, Session};
