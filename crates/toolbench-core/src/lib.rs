//! Toolbench Core - image resize/rotate and base64 tools
//!
//! This crate holds everything the browser tools do that is not DOM wiring:
//! decoding images into rasters, resizing and rotating them, encoding the
//! result as PNG or JPEG, tracking the editing state of the resize/rotate
//! tool, choosing which clipboard or pasted image to load, and base64
//! text conversion.

pub mod decode;
pub mod encode;
pub mod input;
pub mod pipeline;
pub mod session;
pub mod text;
pub mod transform;

pub use decode::{load_image, DecodeError, FilterType, ImageFormat, RasterImage};
pub use encode::{EncodeError, EncodedImage, OutputFormat};
pub use pipeline::resize_then_rotate;
pub use session::{EditSession, LoadTicket};
pub use transform::{resize, rotate, TransformError, TransformOptions};
