//! Output encoding for composited avatars.
//!
//! The format is chosen by the caller, either explicitly or from a file
//! extension; the core pipeline never decides it.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::{AvatarError, Result};

/// JPEG quality used when none is requested.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    /// Lossy; the alpha channel is dropped.
    Jpeg { quality: u8 },
    Gif,
}

impl OutputFormat {
    pub fn jpeg() -> Self {
        Self::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Picks a format from a file extension, case-insensitively.
    ///
    /// `.jpg`/`.jpeg` map to JPEG at quality 80, `.gif` to GIF, and anything
    /// else (including no extension) to PNG.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .unwrap_or_default()
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg { .. } => "image/jpeg",
            Self::Gif => "image/gif",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
            Self::Gif => "gif",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jpeg { quality } => write!(f, "jpeg (quality {quality})"),
            other => f.write_str(other.extension()),
        }
    }
}

/// Parses `png`, `jpg`/`jpeg` or `gif`, case-insensitively.
impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::jpeg()),
            "gif" => Ok(Self::Gif),
            other => Err(format!("unknown image format: {other}")),
        }
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Writes `image` to `writer` in the requested format.
pub fn encode<W: Write>(image: &RgbaImage, format: OutputFormat, writer: W) -> Result<()> {
    let (width, height) = image.dimensions();
    match format {
        OutputFormat::Png => PngEncoder::new(writer)
            .write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
            .map_err(AvatarError::Encode),
        OutputFormat::Jpeg { quality } => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            JpegEncoder::new_with_quality(writer, quality.clamp(1, 100))
                .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(AvatarError::Encode)
        }
        OutputFormat::Gif => {
            // The trailer is written when the encoder drops.
            let mut encoder = GifEncoder::new(writer);
            encoder
                .encode(image.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(AvatarError::Encode)
        }
    }
}

pub fn encode_to_vec(image: &RgbaImage, format: OutputFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    encode(image, format, &mut bytes)?;
    Ok(bytes)
}

/// Saves `image` to `path`, choosing the format from the extension.
pub fn save_to_file(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    save_to_file_as(image, path, OutputFormat::from_path(path))
}

pub fn save_to_file_as(
    image: &RgbaImage,
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    encode(image, format, &mut writer)?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), %format, "avatar saved");
    Ok(())
}

/// Content type detected from the leading bytes of an encoded image.
pub fn sniff_content_type(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes)
        .ok()
        .map(|format| format.to_mime_type())
}
