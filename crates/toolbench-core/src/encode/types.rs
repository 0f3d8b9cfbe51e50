//! Output format selection and the encoded image resource.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{self, DecodeError, ImageFormat, LoaderConfig, RasterImage};

/// JPEG quality used when re-encoding JPEG sources (0.95 on a 0-1 scale).
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encoder settings, deserializable from the JS side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncodeSettings {
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Target encoding for a transform result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossless PNG.
    Png,
    /// JPEG at the given quality (1-100).
    Jpeg { quality: u8 },
}

impl OutputFormat {
    /// Pick the output encoding for an image decoded from `source`.
    ///
    /// JPEG sources stay JPEG at the configured quality; everything else is
    /// written as PNG.
    pub fn for_source(source: ImageFormat, settings: &EncodeSettings) -> Self {
        match source {
            ImageFormat::Jpeg => OutputFormat::Jpeg {
                quality: settings.jpeg_quality.clamp(1, 100),
            },
            ImageFormat::Png | ImageFormat::Other => OutputFormat::Png,
        }
    }

    pub fn mime_type(self) -> &'static str {
        self.image_format().mime_type()
    }

    /// The format tag a decoder will record for this output.
    pub fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg { .. } => ImageFormat::Jpeg,
        }
    }

    /// JPEG quality, if any.
    pub fn quality(self) -> Option<u8> {
        match self {
            OutputFormat::Png => None,
            OutputFormat::Jpeg { quality } => Some(quality),
        }
    }
}

/// A self-contained encoded image: bytes plus the format and size baked in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub(crate) format: OutputFormat,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Pixel width of the encoded image.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height of the encoded image.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Render as a `data:` URL a browser can load directly.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(&self.bytes))
    }

    /// Decode back into a raster with the default [`LoaderConfig`].
    pub fn decode(&self) -> Result<RasterImage, DecodeError> {
        self.decode_with(&LoaderConfig::default())
    }

    /// Decode back into a raster, as the UI does before chaining a transform.
    pub fn decode_with(&self, config: &LoaderConfig) -> Result<RasterImage, DecodeError> {
        decode::load_image_with(&self.bytes, config)
    }
}
