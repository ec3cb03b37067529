//! Source photo loading
//!
//! Decoding is the only asynchronous step of a session: a photo must be
//! fully decoded before any geometry that depends on its native size.

pub mod image;

pub use self::image::SitePhoto;
