//! WASM bindings for resize and rotate.
//!
//! Every function returns a fresh `JsEncodedImage`: JPEG (quality 95) when the
//! source was a JPEG, PNG otherwise.

use crate::types::{
    dimension_from_js, filter_from_u8, options_from_js, to_js_error, JsEncodedImage, JsRasterImage,
};
use toolbench_core::encode::EncodedImage;
use toolbench_core::pipeline;
use toolbench_core::transform::{self, TransformError, TransformOptions};
use wasm_bindgen::prelude::*;

fn with_filter(filter: u8) -> TransformOptions {
    TransformOptions::with_filter(filter_from_u8(filter))
}

fn to_js_result(
    result: Result<EncodedImage, TransformError>,
    options: &TransformOptions,
) -> Result<JsEncodedImage, JsValue> {
    result
        .map(|encoded| JsEncodedImage::from_encoded(encoded, options.loader))
        .map_err(to_js_error)
}

/// Resize an image to exactly `width` x `height`.
///
/// # Arguments
///
/// * `image` - Source image
/// * `width`, `height` - Target size, whole numbers of at least 1
/// * `filter` - 0 = Nearest, 1 = Bilinear, 2 = Lanczos3
#[wasm_bindgen]
pub fn resize_image(
    image: &JsRasterImage,
    width: f64,
    height: f64,
    filter: u8,
) -> Result<JsEncodedImage, JsValue> {
    let (width, height) = (dimension_from_js(width)?, dimension_from_js(height)?);
    let options = with_filter(filter);
    to_js_result(transform::resize_with(image.as_raster(), width, height, &options), &options)
}

/// Rotate an image clockwise by `degrees` about its center.
///
/// Multiples of 180 keep the canvas size; any other angle swaps width and
/// height. The image is drawn at its display size.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = rotate_image(image, 90, 1);
/// img.src = rotated.to_data_url();
/// ```
#[wasm_bindgen]
pub fn rotate_image(image: &JsRasterImage, degrees: f64, filter: u8) -> Result<JsEncodedImage, JsValue> {
    let options = with_filter(filter);
    to_js_result(transform::rotate_with(image.as_raster(), degrees, &options), &options)
}

/// Resize, decode the result, then rotate it.
#[wasm_bindgen]
pub fn resize_then_rotate(
    image: &JsRasterImage,
    width: f64,
    height: f64,
    degrees: f64,
    filter: u8,
) -> Result<JsEncodedImage, JsValue> {
    let (width, height) = (dimension_from_js(width)?, dimension_from_js(height)?);
    let options = with_filter(filter);
    to_js_result(
        pipeline::resize_then_rotate_with(image.as_raster(), width, height, degrees, &options),
        &options,
    )
}

/// Same as `resize_then_rotate`, with a full options object.
///
/// ```typescript
/// resize_then_rotate_with_options(image, 800, 600, 90, {
///   filter: "lanczos3",
///   encode: { jpegQuality: 80 },
/// });
/// ```
#[wasm_bindgen]
pub fn resize_then_rotate_with_options(
    image: &JsRasterImage,
    width: f64,
    height: f64,
    degrees: f64,
    options: JsValue,
) -> Result<JsEncodedImage, JsValue> {
    let (width, height) = (dimension_from_js(width)?, dimension_from_js(height)?);
    let options: TransformOptions = options_from_js(options)?;
    to_js_result(
        pipeline::resize_then_rotate_with(image.as_raster(), width, height, degrees, &options),
        &options,
    )
}
