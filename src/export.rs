//! Capturing the preview as a downloadable image.
//!
//! PNG exports rasterize the composite SVG with resvg at the preview's on-screen
//! size multiplied by the device pixel ratio. SVG exports carry the composite
//! markup itself. Both are returned as base64 data URIs.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use serde::{Deserialize, Serialize};

use crate::compose::Preview;
use crate::error::{DeliveryError, ExportError};

/// Default on-screen edge length of the preview, in CSS pixels.
pub const DEFAULT_PREVIEW_SIZE: u32 = 288;

// ============================================================================
// ImageFormat
// ============================================================================

/// Output format chosen in the format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Error returned when parsing an unsupported image format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported image format `{0}`")]
pub struct UnknownFormat(pub String);

impl FromStr for ImageFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

// ============================================================================
// ExportArtifact
// ============================================================================

/// A captured image, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ImageFormat,

    /// `data:<mime>;base64,<payload>`
    pub data_uri: String,

    /// Suggested download name, `notion-avatar-<unix-millis>.<ext>`.
    pub file_name: String,
}

impl ExportArtifact {
    /// Builds an artifact from raw bytes, stamping the file name with `at`.
    pub fn from_bytes(format: ImageFormat, bytes: &[u8], at: DateTime<Utc>) -> Self {
        Self {
            format,
            data_uri: format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes)),
            file_name: file_name_at(format, at),
        }
    }

    /// Decodes the data URI payload back into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, DeliveryError> {
        let (_, payload) = self
            .data_uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .ok_or(DeliveryError::InvalidDataUri)?;
        Ok(STANDARD.decode(payload)?)
    }
}

/// Returns the download file name for an export made at `at`.
pub fn file_name_at(format: ImageFormat, at: DateTime<Utc>) -> String {
    format!("notion-avatar-{}.{}", at.timestamp_millis(), format.extension())
}

// ============================================================================
// Exporter
// ============================================================================

/// Turns a [`Preview`] into an [`ExportArtifact`].
#[derive(Debug, Clone, Copy)]
pub struct Exporter {
    preview_size: u32,
    device_pixel_ratio: f32,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_SIZE, 1.0)
    }
}

impl Exporter {
    /// Creates an exporter. A non-positive pixel ratio falls back to 1.0.
    pub fn new(preview_size: u32, device_pixel_ratio: f32) -> Self {
        let device_pixel_ratio = if device_pixel_ratio > 0.0 && device_pixel_ratio.is_finite() {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            preview_size: preview_size.max(1),
            device_pixel_ratio,
        }
    }

    /// Edge length of PNG output, in device pixels.
    pub fn raster_size(&self) -> u32 {
        ((self.preview_size as f32 * self.device_pixel_ratio).round() as u32).max(1)
    }

    /// Captures the preview in the given format, stamped with the current time.
    pub fn export(&self, preview: &Preview, format: ImageFormat) -> Result<ExportArtifact, ExportError> {
        self.export_at(preview, format, Utc::now())
    }

    /// Captures the preview in the given format, stamped with `at`.
    pub fn export_at(
        &self,
        preview: &Preview,
        format: ImageFormat,
        at: DateTime<Utc>,
    ) -> Result<ExportArtifact, ExportError> {
        if !preview.has_vector_root() {
            return Err(ExportError::MissingVectorRoot);
        }
        let bytes = match format {
            ImageFormat::Png => self.render_png(&preview.markup)?,
            ImageFormat::Svg => preview.markup.as_bytes().to_vec(),
        };
        Ok(ExportArtifact::from_bytes(format, &bytes, at))
    }

    /// Rasterizes SVG markup into PNG bytes.
    pub fn render_png(&self, markup: &str) -> Result<Vec<u8>, ExportError> {
        let rgba = self.rasterize(markup)?;
        let mut bytes = Vec::new();
        rgba.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Rasterizes SVG markup to fit within a `raster_size` square.
    pub fn rasterize(&self, markup: &str) -> Result<RgbaImage, ExportError> {
        let tree = Tree::from_str(markup, &Options::default())?;

        let size = self.raster_size();
        let svg_size = tree.size();
        let scale = size as f32 / svg_size.width().max(svg_size.height());
        let width = ((svg_size.width() * scale).ceil() as u32).max(1);
        let height = ((svg_size.height() * scale).ceil() as u32).max(1);

        let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Pixmap { width, height })?;
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        Ok(pixmap_to_rgba_image(&pixmap))
    }
}

/// Converts a premultiplied tiny_skia pixmap into straight-alpha RGBA.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AvatarConfig;
    use crate::part::AvatarPart;

    fn preview(markup: &str) -> Preview {
        Preview {
            markup: markup.to_string(),
            config: AvatarConfig::new().with(AvatarPart::Face, 0),
            generation: 1,
            missing: Vec::new(),
        }
    }

    const COMPOSITE: &str = r##"<svg viewBox="0 0 1080 1080" fill="none" xmlns="http://www.w3.org/2000/svg"><g id="notion-avatar-face"><rect width="1080" height="1080" fill="#ff0000"/></g></svg>"##;

    #[test]
    fn png_export_is_png_data_uri() {
        let exporter = Exporter::new(64, 2.0);
        let artifact = exporter.export(&preview(COMPOSITE), ImageFormat::Png).unwrap();

        assert!(artifact.data_uri.starts_with("data:image/png;base64,"));
        let bytes = artifact.decode().unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (128, 128));
        assert_eq!(decoded.get_pixel(64, 64).0, [255, 0, 0, 255]);
    }

    #[test]
    fn svg_export_roundtrips_markup() {
        let artifact = Exporter::default()
            .export(&preview(COMPOSITE), ImageFormat::Svg)
            .unwrap();

        assert!(artifact.data_uri.starts_with("data:image/svg+xml;base64,"));
        let markup = String::from_utf8(artifact.decode().unwrap()).unwrap();
        assert_eq!(markup, COMPOSITE);
        assert!(markup.contains("notion-avatar-face"));
    }

    #[test]
    fn export_without_vector_root_fails() {
        let result = Exporter::default().export(&preview(""), ImageFormat::Svg);
        assert!(matches!(result, Err(ExportError::MissingVectorRoot)));
    }

    #[test]
    fn malformed_markup_is_parse_error() {
        let result = Exporter::default().export(&preview("<svg><g></svg>"), ImageFormat::Png);
        assert!(matches!(result, Err(ExportError::Parse(_))));
    }

    #[test]
    fn file_name_uses_millis() {
        let at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        assert_eq!(
            file_name_at(ImageFormat::Svg, at),
            "notion-avatar-1700000000123.svg"
        );
    }

    #[test]
    fn bad_pixel_ratio_falls_back() {
        assert_eq!(Exporter::new(100, 0.0).raster_size(), 100);
        assert_eq!(Exporter::new(100, f32::NAN).raster_size(), 100);
        assert_eq!(Exporter::new(100, 1.5).raster_size(), 150);
    }

    #[test]
    fn format_parsing() {
        assert_eq!("PNG".parse::<ImageFormat>(), Ok(ImageFormat::Png));
        assert_eq!("svg".parse::<ImageFormat>(), Ok(ImageFormat::Svg));
        assert_eq!(
            "gif".parse::<ImageFormat>(),
            Err(UnknownFormat("gif".to_string()))
        );
    }
}
