//! Construction-site photo signboard compositor
//!
//! Places an editable signboard over a site photo, retouches regions with
//! blur or fill brush strokes, and flattens everything into a native
//! resolution export.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod photo;
pub mod render;
pub mod session;

pub use cli::Args;
pub use config::{CompositorConfig, HexColor};
pub use error::{Error, Result};
pub use photo::SitePhoto;
pub use render::{BoardFont, Compositor, ExportedImage};
pub use session::{EditMsg, Scene, Session, handle_edit_msg};
