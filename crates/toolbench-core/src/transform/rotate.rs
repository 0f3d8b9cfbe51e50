//! Rotation about the image center.
//!
//! The output canvas follows a fixed sizing rule rather than a bounding box:
//! if the normalized angle is a multiple of 180 the canvas keeps the source's
//! display size, otherwise width and height are swapped. The source is then
//! drawn centered on the canvas, rotated clockwise by the angle.
//!
//! Quarter turns are exact pixel transpositions. Any other angle uses inverse
//! mapping: for each destination pixel center we find the source position
//! and sample it.
//!
//! For a canvas centered at (cx, cy) and a source centered at (sx0, sy0):
//! ```text
//! src_x = (dst_x - cx) * cos(θ) + (dst_y - cy) * sin(θ) + sx0
//! src_y = -(dst_x - cx) * sin(θ) + (dst_y - cy) * cos(θ) + sy0
//! ```

use std::borrow::Cow;

use image::{Rgba, RgbaImage};

use super::{validate_dimensions, TransformError, TransformOptions};
use crate::decode::{FilterType, RasterImage};
use crate::encode::{encode_bitmap, EncodedImage, OutputFormat};

/// Normalize an angle in degrees to [0, 360).
///
/// # Errors
///
/// Returns `TransformError::InvalidAngle` for NaN or infinite input.
pub fn normalize_degrees(degrees: f64) -> Result<f64, TransformError> {
    if !degrees.is_finite() {
        return Err(TransformError::InvalidAngle(degrees));
    }

    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negative inputs up to exactly 360
    Ok(if normalized >= 360.0 { 0.0 } else { normalized })
}

/// Canvas size for rotating a `width` x `height` image by `degrees`.
///
/// ```
/// use toolbench_core::transform::rotated_dimensions;
///
/// assert_eq!(rotated_dimensions(100, 50, 90.0).unwrap(), (50, 100));
/// assert_eq!(rotated_dimensions(100, 50, 180.0).unwrap(), (100, 50));
/// ```
pub fn rotated_dimensions(width: u32, height: u32, degrees: f64) -> Result<(u32, u32), TransformError> {
    let normalized = normalize_degrees(degrees)?;
    if normalized % 180.0 == 0.0 {
        Ok((width, height))
    } else {
        Ok((height, width))
    }
}

/// Rotate a raster clockwise by `degrees` about its center.
///
/// The source is drawn at its display size, so an image whose display size
/// differs from its natural size is scaled first. The result keeps the
/// source's format tag; pixels not covered by the rotated source are
/// transparent.
///
/// # Errors
///
/// * `TransformError::InvalidAngle` for a NaN or infinite angle
/// * `TransformError::TooLarge` if a display side exceeds `options.loader.max_dimension`
pub fn rotate_raster(
    image: &RasterImage,
    degrees: f64,
    options: &TransformOptions,
) -> Result<RasterImage, TransformError> {
    let normalized = normalize_degrees(degrees)?;
    validate_dimensions(image.width(), image.height(), options.loader.max_dimension)?;
    let filter = options.filter;

    let source: Cow<'_, RgbaImage> = if image.is_display_scaled() {
        Cow::Owned(image::imageops::resize(
            image.bitmap(),
            image.width(),
            image.height(),
            filter.to_image_filter(),
        ))
    } else {
        Cow::Borrowed(image.bitmap())
    };

    log::debug!(
        "Rotating {}x{} by {} degrees",
        source.width(),
        source.height(),
        normalized
    );

    let rotated = if normalized == 0.0 {
        source.into_owned()
    } else if normalized == 90.0 {
        image::imageops::rotate90(source.as_ref())
    } else if normalized == 180.0 {
        image::imageops::rotate180(source.as_ref())
    } else if normalized == 270.0 {
        image::imageops::rotate270(source.as_ref())
    } else {
        let canvas = rotated_dimensions(source.width(), source.height(), normalized)?;
        rotate_arbitrary(source.as_ref(), normalized.to_radians(), canvas, filter)
    };

    Ok(RasterImage::from_rgba(rotated, image.format()))
}

/// Rotate with default options and encode the result.
pub fn rotate(image: &RasterImage, degrees: f64) -> Result<EncodedImage, TransformError> {
    rotate_with(image, degrees, &TransformOptions::default())
}

/// Rotate and encode as JPEG (for JPEG sources) or PNG (everything else).
pub fn rotate_with(
    image: &RasterImage,
    degrees: f64,
    options: &TransformOptions,
) -> Result<EncodedImage, TransformError> {
    let rotated = rotate_raster(image, degrees, options)?;
    let format = OutputFormat::for_source(image.format(), &options.encode);
    Ok(encode_bitmap(rotated.bitmap(), format)?)
}

/// Draw `src` rotated by `radians` onto a transparent canvas of `canvas` size.
fn rotate_arbitrary(
    src: &RgbaImage,
    radians: f64,
    (dst_w, dst_h): (u32, u32),
    filter: FilterType,
) -> RgbaImage {
    let cos = radians.cos();
    let sin = radians.sin();

    let src_cx = src.width() as f64 / 2.0;
    let src_cy = src.height() as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    RgbaImage::from_fn(dst_w, dst_h, |dst_x, dst_y| {
        // Work from pixel centers
        let dx = dst_x as f64 + 0.5 - dst_cx;
        let dy = dst_y as f64 + 0.5 - dst_cy;

        let src_x = dx * cos + dy * sin + src_cx;
        let src_y = -dx * sin + dy * cos + src_cy;

        match filter {
            FilterType::Nearest => sample_nearest(src, src_x, src_y),
            FilterType::Bilinear | FilterType::Lanczos3 => sample_bilinear(src, src_x, src_y),
        }
    })
}

/// True when (x, y) lands inside the source bitmap.
#[inline]
fn covers(src: &RgbaImage, x: f64, y: f64) -> bool {
    x >= 0.0 && y >= 0.0 && x < src.width() as f64 && y < src.height() as f64
}

fn sample_nearest(src: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    if !covers(src, x, y) {
        return Rgba([0, 0, 0, 0]);
    }
    *src.get_pixel(x.floor() as u32, y.floor() as u32)
}

/// Bilinear sample between the four nearest pixel centers, clamped at edges.
fn sample_bilinear(src: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    if !covers(src, x, y) {
        return Rgba([0, 0, 0, 0]);
    }

    let max_x = src.width() - 1;
    let max_y = src.height() - 1;

    let u = (x - 0.5).clamp(0.0, max_x as f64);
    let v = (y - 0.5).clamp(0.0, max_y as f64);

    let x0 = u.floor() as u32;
    let y0 = v.floor() as u32;
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);

    // Fractional distances
    let fx = u - x0 as f64;
    let fy = v - y0 as f64;

    let p00 = src.get_pixel(x0, y0).0;
    let p10 = src.get_pixel(x1, y0).0;
    let p01 = src.get_pixel(x0, y1).0;
    let p11 = src.get_pixel(x1, y1).0;

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    Rgba(result)
}
