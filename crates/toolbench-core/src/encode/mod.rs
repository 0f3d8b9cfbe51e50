//! Image encoding for Toolbench.
//!
//! This module provides functionality for:
//! - Encoding RGBA bitmaps to PNG (lossless) or JPEG (configurable quality)
//! - Choosing the output format from the source image's format tag
//! - Exposing the result as bytes or a `data:` URL
//!
//! # Examples
//!
//! ```ignore
//! use toolbench_core::encode::{encode_bitmap, OutputFormat};
//!
//! let encoded = encode_bitmap(image.bitmap(), OutputFormat::Png).unwrap();
//! println!("{}", encoded.to_data_url());
//! ```

mod jpeg;
mod png;
mod types;

use image::RgbaImage;

pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use types::{EncodeError, EncodeSettings, EncodedImage, OutputFormat, DEFAULT_JPEG_QUALITY};

/// Encode an RGBA bitmap into a fresh [`EncodedImage`].
pub fn encode_bitmap(bitmap: &RgbaImage, format: OutputFormat) -> Result<EncodedImage, EncodeError> {
    let (width, height) = bitmap.dimensions();

    let bytes = match format {
        OutputFormat::Png => encode_png(bitmap.as_raw(), width, height)?,
        OutputFormat::Jpeg { quality } => encode_jpeg(bitmap.as_raw(), width, height, quality)?,
    };

    log::debug!(
        "Encoded {}x{} image as {} ({} bytes)",
        width,
        height,
        format.mime_type(),
        bytes.len()
    );

    Ok(EncodedImage {
        format,
        width,
        height,
        bytes,
    })
}

/// Check dimensions and RGBA buffer length before handing data to an encoder.
fn validate_rgba(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}
