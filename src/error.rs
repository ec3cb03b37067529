//! Error types for the compositor core

/// Errors produced by the compositor core
///
/// Out-of-range inputs (scales, bounds, brush radius) are clamped rather than
/// reported, so every variant here is either a precondition failure or an
/// I/O / codec failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No photo has finished loading yet
    #[error("no photo has finished loading")]
    PhotoNotLoaded,

    /// The displayed image rectangle was never measured for the current photo
    #[error("displayed image rectangle has not been measured")]
    ViewportNotMeasured,

    /// The displayed image rectangle has zero (or non-finite) size
    #[error("displayed image rectangle is empty ({width}x{height})")]
    EmptyDisplay { width: f32, height: f32 },

    /// A colour string that is not `#rgb` or `#rrggbb`
    #[error("invalid color `{0}`, expected #rgb or #rrggbb")]
    InvalidColor(String),

    /// A malformed `data:` URI
    #[error("invalid data URI: {0}")]
    InvalidDataUri(String),

    /// Font bytes that ab_glyph cannot parse
    #[error("font data could not be parsed")]
    InvalidFont,

    /// The signboard has text to draw but no font could be loaded
    #[error("signboard has text but no font is available")]
    FontUnavailable,

    #[error("image codec error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("png encoding error: {0}")]
    Png(#[from] png::EncodingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The blocking decode task panicked or was cancelled
    #[error("photo load task failed: {0}")]
    LoadTask(String),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
