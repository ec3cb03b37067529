//! Pure domain types with minimal dependencies
//!
//! This module contains the geometry mapper and the overlay and stroke
//! models. Types here know nothing about rasterization or encoding.

pub mod geometry;
pub mod overlay;
pub mod stroke;

pub use geometry::*;
pub use overlay::*;
pub use stroke::*;
