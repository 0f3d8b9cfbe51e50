//! Core types for image loading.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image loading operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input contained no bytes at all.
    #[error("Image data is empty")]
    Empty,

    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The data URL could not be parsed.
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// The image exceeds the configured maximum dimension.
    #[error("Image dimensions {width}x{height} exceed the maximum of {max} pixels per side")]
    TooLarge { width: u32, height: u32, max: u32 },
}

/// Filter type for resampling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, blocky).
    Nearest,
    /// Bilinear interpolation, the same smoothing a 2D canvas applies.
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, sharpest).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Encoded container format an image was decoded from.
///
/// Recorded once at load time so that output format selection never has to
/// re-derive it from a URL or file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    /// Any other format the decoder understands (GIF, BMP, ...).
    Other,
}

impl ImageFormat {
    /// MIME type for this format. `Other` reports the PNG type since anything
    /// that is not JPEG is re-encoded as PNG.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png | ImageFormat::Other => "image/png",
        }
    }

    /// Short lowercase label, as exposed to JavaScript.
    pub fn label(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Other => "other",
        }
    }
}

impl From<image::ImageFormat> for ImageFormat {
    fn from(format: image::ImageFormat) -> Self {
        match format {
            image::ImageFormat::Png => ImageFormat::Png,
            image::ImageFormat::Jpeg => ImageFormat::Jpeg,
            _ => ImageFormat::Other,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded, immutable RGBA bitmap.
///
/// `natural_width`/`natural_height` are the intrinsic pixel dimensions of the
/// bitmap. `width`/`height` are the display dimensions, which equal the
/// natural ones unless a caller scales the image for display with
/// [`RasterImage::with_display_size`].
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    bitmap: RgbaImage,
    display_width: u32,
    display_height: u32,
    format: ImageFormat,
}

impl RasterImage {
    /// Wrap an RGBA bitmap decoded from `format`.
    pub fn from_rgba(bitmap: RgbaImage, format: ImageFormat) -> Self {
        let (display_width, display_height) = bitmap.dimensions();
        Self {
            bitmap,
            display_width,
            display_height,
            format,
        }
    }

    /// Build an image from raw RGBA bytes (4 bytes per pixel, row-major).
    ///
    /// Returns `None` if the buffer length does not match the dimensions.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>, format: ImageFormat) -> Option<Self> {
        RgbaImage::from_raw(width, height, pixels).map(|bitmap| Self::from_rgba(bitmap, format))
    }

    /// Return a copy that displays at a different size. Zero sizes are ignored.
    pub fn with_display_size(mut self, width: u32, height: u32) -> Self {
        if width > 0 && height > 0 {
            self.display_width = width;
            self.display_height = height;
        }
        self
    }

    /// Display width in pixels.
    pub fn width(&self) -> u32 {
        self.display_width
    }

    /// Display height in pixels.
    pub fn height(&self) -> u32 {
        self.display_height
    }

    /// Intrinsic pixel width of the bitmap.
    pub fn natural_width(&self) -> u32 {
        self.bitmap.width()
    }

    /// Intrinsic pixel height of the bitmap.
    pub fn natural_height(&self) -> u32 {
        self.bitmap.height()
    }

    /// True when the display size differs from the natural size.
    pub fn is_display_scaled(&self) -> bool {
        (self.display_width, self.display_height) != self.bitmap.dimensions()
    }

    /// Format the image was decoded from.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    /// RGBA pixel data in row-major order.
    pub fn pixels(&self) -> &[u8] {
        self.bitmap.as_raw()
    }
}
