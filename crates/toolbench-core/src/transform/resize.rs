//! Resizing to exact target dimensions.

use super::{validate_dimensions, TransformError, TransformOptions};
use crate::decode::RasterImage;
use crate::encode::{encode_bitmap, EncodedImage, OutputFormat};

/// Resize a raster to exactly `width` x `height`.
///
/// The source is resampled from its natural pixels with `options.filter`,
/// regardless of any display size it carries. The result keeps the source's
/// format tag.
///
/// # Errors
///
/// * `TransformError::InvalidDimensions` if either side is zero
/// * `TransformError::TooLarge` if either side exceeds `options.loader.max_dimension`
pub fn resize_raster(
    image: &RasterImage,
    width: u32,
    height: u32,
    options: &TransformOptions,
) -> Result<RasterImage, TransformError> {
    validate_dimensions(width, height, options.loader.max_dimension)?;
    let filter = options.filter;

    // Fast path: nothing to resample
    if image.natural_width() == width && image.natural_height() == height {
        return Ok(RasterImage::from_rgba(image.bitmap().clone(), image.format()));
    }

    log::debug!(
        "Resizing {}x{} -> {}x{} ({:?})",
        image.natural_width(),
        image.natural_height(),
        width,
        height,
        filter
    );

    let resized = image::imageops::resize(image.bitmap(), width, height, filter.to_image_filter());
    Ok(RasterImage::from_rgba(resized, image.format()))
}

/// Resize with default options and encode the result.
pub fn resize(image: &RasterImage, width: u32, height: u32) -> Result<EncodedImage, TransformError> {
    resize_with(image, width, height, &TransformOptions::default())
}

/// Resize and encode as JPEG (for JPEG sources) or PNG (everything else).
pub fn resize_with(
    image: &RasterImage,
    width: u32,
    height: u32,
    options: &TransformOptions,
) -> Result<EncodedImage, TransformError> {
    let resized = resize_raster(image, width, height, options)?;
    let format = OutputFormat::for_source(image.format(), &options.encode);
    Ok(encode_bitmap(resized.bitmap(), format)?)
}
