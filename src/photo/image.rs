//! Decoded site photo

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::domain::DisplayRect;
use crate::error::{Error, Result};

/// A fully decoded photo in native resolution
#[derive(Clone, Debug, PartialEq)]
pub struct SitePhoto {
    pub rgba: RgbaImage,
}

impl SitePhoto {
    pub fn new(rgba: RgbaImage) -> Self {
        Self { rgba }
    }

    /// Decode any format the image crate recognises
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        log::debug!("SitePhoto decoded: {}x{} pixels", rgba.width(), rgba.height());
        Ok(Self { rgba })
    }

    /// Decode a base64 `data:` URI such as `data:image/jpeg;base64,...`
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| Error::InvalidDataUri("missing `data:` scheme".into()))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| Error::InvalidDataUri("missing `,` separator".into()))?;
        if !meta.ends_with(";base64") {
            return Err(Error::InvalidDataUri("payload is not base64".into()));
        }
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|err| Error::InvalidDataUri(err.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Read and decode a file
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Decode on a blocking task so the caller's event loop is not stalled
    pub async fn load(bytes: Vec<u8>) -> Result<Self> {
        tokio::task::spawn_blocking(move || Self::from_bytes(&bytes))
            .await
            .map_err(|err| Error::LoadTask(err.to_string()))?
    }

    /// Copy of the photo resampled to the size it is displayed at
    pub fn scaled_to(&self, displayed: DisplayRect) -> Self {
        let w = (displayed.width.round() as u32).max(1);
        let h = (displayed.height.round() as u32).max(1);
        if (w, h) == self.rgba.dimensions() {
            return self.clone();
        }
        let rgba = if w <= self.width() && h <= self.height() {
            imageops::thumbnail(&self.rgba, w, h)
        } else {
            imageops::resize(&self.rgba, w, h, FilterType::Triangle)
        };
        Self { rgba }
    }

    /// Get the native width of the photo
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Get the native height of the photo
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }
}
