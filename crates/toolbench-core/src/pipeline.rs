//! Resize followed by rotate.
//!
//! The resized image is encoded, decoded back into a raster and only then
//! rotated, so the rotation sees exactly what a user downloading the resized
//! image would see. A zero rotation returns the resized output unchanged.

use crate::decode::RasterImage;
use crate::encode::EncodedImage;
use crate::transform::{normalize_degrees, resize_with, rotate_with, TransformError, TransformOptions};

/// Resize to `width` x `height`, then rotate by `degrees`, using default options.
pub fn resize_then_rotate(
    image: &RasterImage,
    width: u32,
    height: u32,
    degrees: f64,
) -> Result<EncodedImage, TransformError> {
    resize_then_rotate_with(image, width, height, degrees, &TransformOptions::default())
}

/// Resize to `width` x `height`, then rotate by `degrees`.
///
/// # Errors
///
/// Fails on zero or oversized dimensions or a non-finite angle before any
/// pixel work, and with the underlying encode/decode error if an
/// intermediate step fails.
pub fn resize_then_rotate_with(
    image: &RasterImage,
    width: u32,
    height: u32,
    degrees: f64,
    options: &TransformOptions,
) -> Result<EncodedImage, TransformError> {
    let normalized = normalize_degrees(degrees)?;

    let resized = resize_with(image, width, height, options)?;
    if normalized == 0.0 {
        return Ok(resized);
    }

    let intermediate = resized.decode_with(&options.loader)?;
    log::debug!(
        "Rotating resized {}x{} intermediate by {} degrees",
        intermediate.width(),
        intermediate.height(),
        normalized
    );

    rotate_with(&intermediate, normalized, options)
}
