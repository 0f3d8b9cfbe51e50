//! Image transformation operations: resize and rotate.
//!
//! Each operation has two layers:
//! - a raster layer (`resize_raster`, `rotate_raster`) that maps one bitmap to
//!   another without touching any encoder
//! - an encoded layer (`resize`, `rotate`) that runs the raster layer and
//!   encodes the result using the source's format policy
//!
//! Parameters are validated before any pixel work starts.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downwards
//! - Positive rotation angles turn the image clockwise on screen
//! - Angles are normalized to [0, 360) before dimension handling

mod resize;
mod rotate;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{DecodeError, FilterType, LoaderConfig};
use crate::encode::{EncodeError, EncodeSettings};

pub use resize::{resize, resize_raster, resize_with};
pub use rotate::{normalize_degrees, rotate, rotate_raster, rotate_with, rotated_dimensions};

/// Errors from transform requests.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Target width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be positive")]
    InvalidDimensions { width: u32, height: u32 },

    /// A target or display side exceeds the configured maximum.
    #[error("Target dimensions {width}x{height} exceed the maximum of {max} pixels per side")]
    TooLarge { width: u32, height: u32, max: u32 },

    /// Rotation angle is NaN or infinite.
    #[error("Invalid rotation angle: {0}")]
    InvalidAngle(f64),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Options shared by every transform, deserializable from the JS side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformOptions {
    /// Resampling filter for resizes and non-quarter-turn rotations.
    pub filter: FilterType,
    /// Limits applied when an intermediate result is decoded again.
    pub loader: LoaderConfig,
    /// Output encoder settings.
    pub encode: EncodeSettings,
}

impl TransformOptions {
    /// Default options with a different resampling filter.
    pub fn with_filter(filter: FilterType) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }
}

/// Reject zero-sized or oversized targets before any rasterization.
///
/// `max_dimension` is the loader's per-side limit; zero disables it.
pub(crate) fn validate_dimensions(width: u32, height: u32, max_dimension: u32) -> Result<(), TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimensions { width, height });
    }
    if max_dimension > 0 && (width > max_dimension || height > max_dimension) {
        return Err(TransformError::TooLarge {
            width,
            height,
            max: max_dimension,
        });
    }
    Ok(())
}
