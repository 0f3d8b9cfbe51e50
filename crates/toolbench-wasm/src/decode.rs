//! WASM bindings for loading images.
//!
//! The host awaits file, clipboard or paste bytes and hands them over here;
//! decoding itself is synchronous.

use crate::types::{options_from_js, to_js_error, JsRasterImage};
use toolbench_core::decode::{self, ImageSource, LoaderConfig};
use wasm_bindgen::prelude::*;

/// Decode PNG or JPEG bytes into a raster.
///
/// # Errors
///
/// Throws if the bytes are empty, not a recognized image, corrupt, or larger
/// than 16384 pixels on a side.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = load_image(bytes);
/// console.log(`${image.width}x${image.height} ${image.format}`);
/// ```
#[wasm_bindgen]
pub fn load_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::load_image(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Decode with a loader config such as `{ maxDimension: 4096 }`.
#[wasm_bindgen]
pub fn load_image_with_config(bytes: &[u8], config: JsValue) -> Result<JsRasterImage, JsValue> {
    let config: LoaderConfig = options_from_js(config)?;
    decode::load_image_with(bytes, &config)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Decode a `data:<mime>;base64,<payload>` URL.
#[wasm_bindgen]
pub fn load_data_url(url: &str) -> Result<JsRasterImage, JsValue> {
    decode::load_source(&ImageSource::DataUrl(url.to_string()), &LoaderConfig::default())
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Tests for decode bindings.
///
/// Error paths build a `JsValue` and only run on wasm32 targets; see the
/// tests in `toolbench_core::decode` for the underlying behavior.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::test_support::test_image;
    use toolbench_core::decode::ImageFormat;
    use toolbench_core::encode::{encode_bitmap, EncodedImage, OutputFormat};

    fn encoded(width: u32, height: u32, format: OutputFormat) -> EncodedImage {
        let img = test_image(width, height, ImageFormat::Png);
        encode_bitmap(img.as_raster().bitmap(), format).unwrap()
    }

    #[test]
    fn test_load_image_png() {
        let bytes = encoded(12, 7, OutputFormat::Png).into_bytes();
        let img = load_image(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (12, 7));
        assert_eq!(img.format(), "png");
    }

    #[test]
    fn test_load_data_url() {
        let url = encoded(3, 2, OutputFormat::Jpeg { quality: 90 }).to_data_url();

        let img = load_data_url(&url).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.format(), "jpeg");
    }
}
