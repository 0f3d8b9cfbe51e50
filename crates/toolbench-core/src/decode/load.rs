//! Image loading from raw bytes or data URLs, with EXIF orientation handling.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use serde::{Deserialize, Serialize};

use super::{DecodeError, ImageFormat, Orientation, RasterImage};

/// Largest side accepted by default; matches the common browser canvas limit.
pub const DEFAULT_MAX_DIMENSION: u32 = 16_384;

/// Loader limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoaderConfig {
    /// Maximum width or height in pixels. Zero disables the check.
    pub max_dimension: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Encoded bytes, e.g. a pasted blob or a file read by the host.
    Bytes(Vec<u8>),
    /// A `data:<mime>;base64,<payload>` URL.
    DataUrl(String),
}

/// The parts of a parsed data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Decode an image using the default [`LoaderConfig`].
pub fn load_image(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    load_image_with(bytes, &LoaderConfig::default())
}

/// Decode encoded image bytes into a [`RasterImage`].
///
/// The container format is sniffed from the magic bytes and kept on the
/// result. JPEG images have their EXIF orientation applied, so the raster is
/// upright the same way a browser would present it.
///
/// # Errors
///
/// * `DecodeError::Empty` for an empty buffer
/// * `DecodeError::InvalidFormat` when the magic bytes match no known format
/// * `DecodeError::TooLarge` when a side exceeds `config.max_dimension`
/// * `DecodeError::CorruptedFile` when the data is truncated or corrupt
pub fn load_image_with(bytes: &[u8], config: &LoaderConfig) -> Result<RasterImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let source_format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;

    // Header-only pass so oversized images are rejected before allocating
    let (width, height) = ImageReader::with_format(Cursor::new(bytes), source_format)
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let max = config.max_dimension;
    if max > 0 && (width > max || height > max) {
        return Err(DecodeError::TooLarge { width, height, max });
    }

    let img = ImageReader::with_format(Cursor::new(bytes), source_format)
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = ImageFormat::from(source_format);
    let img = match format {
        ImageFormat::Jpeg => apply_orientation(img, extract_orientation(bytes)),
        _ => img,
    };

    let raster = RasterImage::from_rgba(img.into_rgba8(), format);
    log::debug!(
        "Loaded {} image: {}x{}",
        format.label(),
        raster.natural_width(),
        raster.natural_height()
    );

    Ok(raster)
}

/// Load an image from any [`ImageSource`].
pub fn load_source(source: &ImageSource, config: &LoaderConfig) -> Result<RasterImage, DecodeError> {
    match source {
        ImageSource::Bytes(bytes) => load_image_with(bytes, config),
        ImageSource::DataUrl(url) => {
            let data = parse_data_url(url)?;
            load_image_with(&data.bytes, config)
        }
    }
}

/// Split a base64 data URL into its MIME type and decoded payload.
///
/// Only base64 payloads are accepted. A missing MIME type defaults to
/// `text/plain`, as in RFC 2397.
pub fn parse_data_url(url: &str) -> Result<DataUrl, DecodeError> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| DecodeError::InvalidDataUrl("missing data: scheme".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DecodeError::InvalidDataUrl("missing ',' separator".to_string()))?;

    let mut params = header.split(';');
    let mime_type = params.next().unwrap_or("").trim();
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(DecodeError::InvalidDataUrl(
            "only base64-encoded payloads are supported".to_string(),
        ));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| DecodeError::InvalidDataUrl(e.to_string()))?;

    let mime_type = if mime_type.is_empty() {
        "text/plain".to_string()
    } else {
        mime_type.to_ascii_lowercase()
    };

    Ok(DataUrl { mime_type, bytes })
}

/// Extract EXIF orientation from encoded bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{encode_as, gradient};

    #[test]
    fn test_load_png() {
        let bytes = encode_as(&gradient(100, 50), image::ImageFormat::Png);
        let img = load_image(&bytes).unwrap();

        assert_eq!(img.natural_width(), 100);
        assert_eq!(img.natural_height(), 50);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.format(), ImageFormat::Png);
    }

    #[test]
    fn test_load_png_preserves_pixels() {
        let source = gradient(8, 4);
        let bytes = encode_as(&source, image::ImageFormat::Png);
        let img = load_image(&bytes).unwrap();

        assert_eq!(img.bitmap(), &source);
    }

    #[test]
    fn test_load_jpeg_records_format() {
        let bytes = encode_as(&gradient(16, 8), image::ImageFormat::Jpeg);
        let img = load_image(&bytes).unwrap();

        assert_eq!(img.format(), ImageFormat::Jpeg);
        assert_eq!((img.width(), img.height()), (16, 8));
    }

    #[test]
    fn test_load_empty_bytes() {
        assert!(matches!(load_image(&[]), Err(DecodeError::Empty)));
    }

    #[test]
    fn test_load_unknown_format() {
        let result = load_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_load_truncated_png() {
        let bytes = encode_as(&gradient(32, 32), image::ImageFormat::Png);
        let truncated = &bytes[..bytes.len() / 2];

        assert!(matches!(load_image(truncated), Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_load_rejects_oversized() {
        let bytes = encode_as(&gradient(40, 10), image::ImageFormat::Png);
        let config = LoaderConfig { max_dimension: 32 };

        match load_image_with(&bytes, &config) {
            Err(DecodeError::TooLarge { width, height, max }) => {
                assert_eq!((width, height, max), (40, 10, 32));
            }
            other => panic!("Expected TooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_max_dimension_disables_limit() {
        let bytes = encode_as(&gradient(40, 10), image::ImageFormat::Png);
        let config = LoaderConfig { max_dimension: 0 };
        assert!(load_image_with(&bytes, &config).is_ok());
    }

    #[test]
    fn test_parse_data_url() {
        let data = parse_data_url("data:image/png;base64,AAEC").unwrap();
        assert_eq!(data.mime_type, "image/png");
        assert_eq!(data.bytes, vec![0, 1, 2]);
    }

    #[test]
    fn test_parse_data_url_default_mime() {
        let data = parse_data_url("data:;base64,AAEC").unwrap();
        assert_eq!(data.mime_type, "text/plain");
    }

    #[test]
    fn test_parse_data_url_errors() {
        assert!(matches!(
            parse_data_url("https://example.com/a.png"),
            Err(DecodeError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            parse_data_url("data:image/png;base64"),
            Err(DecodeError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            parse_data_url("data:image/png,rawtext"),
            Err(DecodeError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            parse_data_url("data:image/png;base64,@@@"),
            Err(DecodeError::InvalidDataUrl(_))
        ));
    }

    #[test]
    fn test_load_source_data_url() {
        let bytes = encode_as(&gradient(6, 3), image::ImageFormat::Png);
        let url = format!("data:image/png;base64,{}", STANDARD.encode(&bytes));

        let img = load_source(&ImageSource::DataUrl(url), &LoaderConfig::default()).unwrap();
        assert_eq!((img.width(), img.height()), (6, 3));
    }

    #[test]
    fn test_load_source_bytes() {
        let bytes = encode_as(&gradient(6, 3), image::ImageFormat::Jpeg);
        let img = load_source(&ImageSource::Bytes(bytes), &LoaderConfig::default()).unwrap();
        assert_eq!(img.format(), ImageFormat::Jpeg);
    }

    /// Splice an APP1 segment holding only an Orientation tag after the SOI marker.
    fn with_exif_orientation(jpeg: &[u8], orientation: u8) -> Vec<u8> {
        let tiff: [u8; 26] = [
            b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08, // big-endian header, IFD0 at 8
            0x00, 0x01, // one entry
            0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, // Orientation, SHORT, count 1
            0x00, orientation, 0x00, 0x00, // value
            0x00, 0x00, 0x00, 0x00, // no next IFD
        ];
        let length = (2 + 6 + tiff.len()) as u16;

        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&length.to_be_bytes());
        out.extend_from_slice(b"Exif\0\0");
        out.extend_from_slice(&tiff);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    /// 16x8: left half black, right half white, split on a JPEG block edge.
    fn half_black_jpeg() -> Vec<u8> {
        let bitmap = image::RgbaImage::from_fn(16, 8, |x, _| {
            let v = if x < 8 { 0 } else { 255 };
            image::Rgba([v, v, v, 255])
        });
        encode_as(&bitmap, image::ImageFormat::Jpeg)
    }

    #[test]
    fn test_orientation_extraction_from_exif() {
        let bytes = with_exif_orientation(&half_black_jpeg(), 6);
        assert_eq!(extract_orientation(&bytes), Orientation::Rotate90CW);
    }

    #[test]
    fn test_load_jpeg_applies_exif_rotation() {
        let bytes = with_exif_orientation(&half_black_jpeg(), 6);
        let img = load_image(&bytes).unwrap();

        // Rotated clockwise: the black left half becomes the top half
        assert_eq!((img.width(), img.height()), (8, 16));
        assert!(img.bitmap().get_pixel(0, 0).0[0] < 64);
        assert!(img.bitmap().get_pixel(4, 3).0[0] < 64);
        assert!(img.bitmap().get_pixel(4, 12).0[0] > 192);
    }

    #[test]
    fn test_load_jpeg_without_exif_keeps_orientation() {
        let img = load_image(&half_black_jpeg()).unwrap();

        assert_eq!((img.width(), img.height()), (16, 8));
        assert!(img.bitmap().get_pixel(0, 0).0[0] < 64);
        assert!(img.bitmap().get_pixel(12, 4).0[0] > 192);
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        let bytes = encode_as(&gradient(4, 4), image::ImageFormat::Jpeg);
        assert_eq!(extract_orientation(&bytes), Orientation::Normal);
    }

    #[test]
    fn test_orientation_extraction_invalid_data() {
        assert_eq!(extract_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let pixels = vec![
            255, 0, 0, 255, // Red (left)
            0, 255, 0, 255, // Green (right)
        ];
        let img = DynamicImage::ImageRgba8(image::RgbaImage::from_raw(2, 1, pixels).unwrap());

        let result = apply_orientation(img, Orientation::Rotate90CW).into_rgba8();

        assert_eq!(result.dimensions(), (1, 2));
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let pixels = vec![
            255, 0, 0, 255, // Red (left)
            0, 255, 0, 255, // Green (right)
        ];
        let img = DynamicImage::ImageRgba8(image::RgbaImage::from_raw(2, 1, pixels).unwrap());

        let result = apply_orientation(img, Orientation::FlipHorizontal).into_rgba8();

        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }
}
