//! Image loading for Toolbench.
//!
//! This module turns encoded image data into [`RasterImage`] bitmaps:
//! - Sniffing the container format from magic bytes and recording it
//! - Applying JPEG EXIF orientation
//! - Parsing base64 data URLs
//! - Guarding against oversized images
//!
//! # Architecture
//!
//! Loading is synchronous. The browser host awaits the bytes (clipboard blob,
//! paste event file) and then hands them over in one call; there is no
//! callback chain and no caching.
//!
//! # Examples
//!
//! ```ignore
//! use toolbench_core::decode::load_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = load_image(&bytes).unwrap();
//! println!("Loaded {}x{} {}", image.width(), image.height(), image.format().label());
//! ```

mod load;
mod types;

pub use load::{
    load_image, load_image_with, load_source, parse_data_url, DataUrl, ImageSource, LoaderConfig,
    DEFAULT_MAX_DIMENSION,
};
pub use types::{DecodeError, FilterType, ImageFormat, Orientation, RasterImage};
