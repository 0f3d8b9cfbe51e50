//! WASM-compatible wrapper types for rasters and encoded output.
//!
//! This module provides JavaScript-friendly types that wrap the core Toolbench
//! types, plus the small conversions every binding shares.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use toolbench_core::decode::{FilterType, LoaderConfig, RasterImage};
use toolbench_core::encode::EncodedImage;
use wasm_bindgen::prelude::*;

/// A decoded image held in WASM memory.
///
/// # Memory Management
///
/// The bitmap stays in WASM memory. `pixels()` copies it out as a
/// `Uint8Array`; pass the image itself to the transform functions instead
/// of round-tripping pixels through JavaScript.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsRasterImage {
    inner: RasterImage,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Display width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Display height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Intrinsic bitmap width in pixels
    #[wasm_bindgen(getter)]
    pub fn natural_width(&self) -> u32 {
        self.inner.natural_width()
    }

    /// Intrinsic bitmap height in pixels
    #[wasm_bindgen(getter)]
    pub fn natural_height(&self) -> u32 {
        self.inner.natural_height()
    }

    /// Source format: "png", "jpeg" or "other"
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.inner.format().label().to_string()
    }

    /// Number of bytes in the RGBA pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Copy of this image drawn at a different display size.
    ///
    /// Rotation draws the image at its display size; resizing always starts
    /// from the natural pixels.
    pub fn with_display_size(&self, width: f64, height: f64) -> Result<JsRasterImage, JsValue> {
        let (width, height) = (dimension_from_js(width)?, dimension_from_js(height)?);
        Ok(Self::from_raster(self.inner.clone().with_display_size(width, height)))
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRasterImage {
    pub(crate) fn from_raster(inner: RasterImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_raster(&self) -> &RasterImage {
        &self.inner
    }
}

/// An encoded PNG or JPEG produced by a transform.
///
/// Keeps the loader limits of the call that produced it, so `decode()`
/// applies the same limits.
#[wasm_bindgen]
pub struct JsEncodedImage {
    inner: EncodedImage,
    loader: LoaderConfig,
}

#[wasm_bindgen]
impl JsEncodedImage {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// "image/png" or "image/jpeg"
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.bytes().len()
    }

    /// Encoded bytes as Uint8Array, e.g. for a `Blob` download.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes().to_vec()
    }

    /// `data:` URL suitable for an `<img src>`.
    pub fn to_data_url(&self) -> String {
        self.inner.to_data_url()
    }

    /// Decode back into a raster to chain another transform.
    pub fn decode(&self) -> Result<JsRasterImage, JsValue> {
        self.inner
            .decode_with(&self.loader)
            .map(JsRasterImage::from_raster)
            .map_err(to_js_error)
    }

    pub fn free(self) {}
}

impl JsEncodedImage {
    pub(crate) fn from_encoded(inner: EncodedImage, loader: LoaderConfig) -> Self {
        Self { inner, loader }
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (matches canvas smoothing)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// A JS number usable as a pixel size: a whole number from 1 to `u32::MAX`.
pub(crate) fn size_from_js(value: f64) -> Option<u32> {
    if value.fract() == 0.0 && (1.0..=u32::MAX as f64).contains(&value) {
        Some(value as u32)
    } else {
        None
    }
}

/// [`size_from_js`], throwing for anything else.
pub(crate) fn dimension_from_js(value: f64) -> Result<u32, JsValue> {
    size_from_js(value)
        .ok_or_else(|| to_js_error(format!("Invalid dimension: {} must be a positive integer", value)))
}

/// Turn a core error into a JavaScript `Error` carrying its message.
pub(crate) fn to_js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Deserialize an optional options object; `undefined` or `null` means defaults.
pub(crate) fn options_from_js<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| to_js_error(format!("Invalid options: {}", e)))
}


#[cfg(test)]
mod tests {
    use super::test_support::test_image;
    use super::*;
    use toolbench_core::decode::{DecodeError, ImageFormat};
    use toolbench_core::encode::{encode_bitmap, OutputFormat};

    #[test]
    fn test_js_raster_image_getters() {
        let img = test_image(100, 50, ImageFormat::Jpeg);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.natural_width(), 100);
        assert_eq!(img.format(), "jpeg");
        assert_eq!(img.byte_length(), 100 * 50 * 4);
        assert_eq!(img.pixels().len(), 20000);
    }

    #[test]
    fn test_with_display_size() {
        let img = test_image(10, 10, ImageFormat::Png)
            .with_display_size(20.0, 5.0)
            .unwrap();
        assert_eq!((img.width(), img.height()), (20, 5));
        assert_eq!((img.natural_width(), img.natural_height()), (10, 10));
    }

    #[test]
    fn test_js_encoded_image() {
        let img = test_image(6, 4, ImageFormat::Png);
        let encoded = encode_bitmap(img.as_raster().bitmap(), OutputFormat::Png).unwrap();
        let js = JsEncodedImage::from_encoded(encoded, LoaderConfig::default());

        assert_eq!((js.width(), js.height()), (6, 4));
        assert_eq!(js.mime_type(), "image/png");
        assert_eq!(js.bytes().len(), js.byte_length());
        assert!(js.to_data_url().starts_with("data:image/png;base64,"));

        let decoded = js.decode().unwrap();
        assert_eq!(decoded.pixels(), img.pixels());
    }

    #[test]
    fn test_encoded_image_keeps_loader_limits() {
        let img = test_image(40, 10, ImageFormat::Png);
        let encoded = encode_bitmap(img.as_raster().bitmap(), OutputFormat::Png).unwrap();
        let js = JsEncodedImage::from_encoded(encoded, LoaderConfig { max_dimension: 32 });

        assert_eq!(js.loader.max_dimension, 32);
        assert!(matches!(
            js.inner.decode_with(&js.loader),
            Err(DecodeError::TooLarge { max: 32, .. })
        ));
    }

    #[test]
    fn test_size_from_js() {
        assert_eq!(size_from_js(1.0), Some(1));
        assert_eq!(size_from_js(640.0), Some(640));
        assert_eq!(size_from_js(u32::MAX as f64), Some(u32::MAX));

        assert_eq!(size_from_js(0.0), None);
        assert_eq!(size_from_js(-1.0), None);
        assert_eq!(size_from_js(1.5), None);
        assert_eq!(size_from_js(f64::NAN), None);
        assert_eq!(size_from_js(f64::INFINITY), None);
        assert_eq!(size_from_js(4_294_967_296.0), None);
    }

    #[test]
    fn test_filter_from_u8() {
        assert!(matches!(filter_from_u8(0), FilterType::Nearest));
        assert!(matches!(filter_from_u8(1), FilterType::Bilinear));
        assert!(matches!(filter_from_u8(2), FilterType::Lanczos3));
        // Unknown values default to Bilinear
        assert!(matches!(filter_from_u8(3), FilterType::Bilinear));
        assert!(matches!(filter_from_u8(255), FilterType::Bilinear));
    }
}
