//! Compositor configuration and colour handling

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque RGB colour written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional, case-insensitive)
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 0x11);
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for HexColor {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.to_string()
    }
}

impl From<image::Rgba<u8>> for HexColor {
    fn from(px: image::Rgba<u8>) -> Self {
        Self::rgb(px[0], px[1], px[2])
    }
}

/// Encoded format of the exported photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFormat {
    #[default]
    Jpeg,
    Png,
}

impl ExportFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
        }
    }
}

/// Compositor configuration, loaded once per session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Encoded format of exports
    pub export_format: ExportFormat,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// Suggested filename prefix, followed by the export timestamp
    pub filename_prefix: String,
    /// Gaussian sigma for blur strokes, as a fraction of the native stroke width
    pub blur_strength: f32,
    /// Fixed label of the first header row
    pub title_label: String,
    /// Fixed label of the second header row
    pub location_label: String,
    /// Font used for all board text
    pub font_path: Option<PathBuf>,
    /// Initial brush fill colour
    pub default_fill_color: HexColor,
    /// Initial brush radius in display pixels
    pub default_brush_radius: f32,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            export_format: ExportFormat::Jpeg,
            jpeg_quality: 90,
            filename_prefix: "genba-photo".to_string(),
            blur_strength: 0.5,
            title_label: "Project Name".to_string(),
            location_label: "Location".to_string(),
            font_path: None,
            default_fill_color: HexColor::BLACK,
            default_brush_radius: 20.0,
        }
    }
}

impl CompositorConfig {
    /// Directory name under the platform config dir
    pub const APP_DIR: &'static str = "genba-board";

    /// Default config file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::APP_DIR).join("config.json"))
    }

    /// Load configuration from the default location, or return defaults if unavailable
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|err| {
                log::warn!("Error loading config, using defaults: {err}");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write configuration to an explicit path, creating parent dirs
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// JPEG quality clamped to what the encoder accepts
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_hex() {
        assert_eq!(HexColor::parse("#004d40").unwrap(), HexColor::rgb(0, 0x4d, 0x40));
        assert_eq!(HexColor::parse("FFF").unwrap(), HexColor::WHITE);
        assert_eq!(HexColor::parse(" #0F172A ").unwrap(), HexColor::rgb(0x0f, 0x17, 0x2a));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "#", "#12", "#12345", "#gggggg", "red", "#ééé"] {
            assert!(
                matches!(HexColor::parse(bad), Err(Error::InvalidColor(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(HexColor::rgb(255, 0, 171).to_string(), "#ff00ab");
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = CompositorConfig {
            export_format: ExportFormat::Png,
            default_fill_color: HexColor::rgb(1, 2, 3),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = CompositorConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r##"{ "jpeg_quality": 75, "default_fill_color": "#abc" }"##)
            .unwrap();

        let loaded = CompositorConfig::load_from(&path).unwrap();
        assert_eq!(loaded.jpeg_quality, 75);
        assert_eq!(loaded.default_fill_color, HexColor::rgb(0xaa, 0xbb, 0xcc));
        assert_eq!(loaded.filename_prefix, "genba-photo");
    }

    #[test]
    fn test_invalid_color_in_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "default_fill_color": "blue" }"#).unwrap();
        assert!(matches!(
            CompositorConfig::load_from(&path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_jpeg_quality_clamped() {
        let config = CompositorConfig {
            jpeg_quality: 0,
            ..Default::default()
        };
        assert_eq!(config.jpeg_quality(), 1);
    }
}
