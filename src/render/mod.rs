//! Composite rendering module
//!
//! This module contains:
//! - Signboard layout proportions shared by preview and export
//! - Glyph rasterization for board text
//! - The compositor drawing strokes and the board with tiny-skia
//! - Encoding of the flattened result

pub mod export;
pub mod geometry;
pub mod image;
pub mod text;

pub use self::export::ExportedImage;
pub use self::image::Compositor;
pub use self::text::BoardFont;
