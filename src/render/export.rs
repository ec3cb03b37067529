//! Encoding the flattened composite for download

use std::io;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};

use crate::config::{CompositorConfig, ExportFormat};
use crate::error::Result;

/// An encoded export plus the filename the shell should offer
#[derive(Clone, Debug, PartialEq)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub format: ExportFormat,
}

impl ExportedImage {
    /// Encode `img` according to `config`, naming it after `timestamp_ms`
    pub fn encode(img: RgbaImage, config: &CompositorConfig, timestamp_ms: i64) -> Result<Self> {
        let format = config.export_format;
        let mut bytes = Vec::new();
        match format {
            ExportFormat::Jpeg => write_jpeg(&mut bytes, img, config.jpeg_quality())?,
            ExportFormat::Png => write_png(&mut bytes, &img)?,
        }
        log::debug!("Encoded {:?} export: {} bytes", format, bytes.len());
        Ok(Self {
            bytes,
            filename: suggested_filename(&config.filename_prefix, timestamp_ms, format),
            format,
        })
    }

    /// Write the export into `dir` under its suggested filename
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// `<prefix>-<unix-epoch-millis>.<ext>`
pub fn suggested_filename(prefix: &str, timestamp_ms: i64, format: ExportFormat) -> String {
    format!("{prefix}-{timestamp_ms}.{}", format.extension())
}

/// Current wall-clock time as unix epoch milliseconds
pub fn timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn write_jpeg<W: io::Write>(w: W, image: RgbaImage, quality: u8) -> image::ImageResult<()> {
    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgba8(image).into_rgb8();
    JpegEncoder::new_with_quality(w, quality).encode_image(&rgb)
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> std::result::Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}
