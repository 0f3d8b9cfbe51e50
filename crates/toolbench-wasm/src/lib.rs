//! Toolbench WASM - WebAssembly bindings for Toolbench
//!
//! This crate provides WASM bindings to expose the toolbench-core functionality
//! to the browser tools.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for rasters and encoded images
//! - `decode` - Loading images from bytes or data URLs
//! - `transform` - Resize, rotate and resize-then-rotate
//! - `session` - Editing state of the resize/rotate tool
//! - `input` - Picking a PNG from clipboard or paste items
//! - `text` - Base64 encode/decode
//! - `logging` - Console output for core log records
//!
//! # Usage
//!
//! ```typescript
//! import init, { load_image, resize_then_rotate } from '@toolbench/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = load_image(bytes);
//! const output = resize_then_rotate(image, Math.round(image.width / 2), Math.round(image.height / 2), 90, 1);
//! img.src = output.to_data_url();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod input;
mod logging;
mod session;
mod text;
mod transform;
mod types;

// Re-export public types
pub use decode::{load_data_url, load_image, load_image_with_config};
pub use input::{png_from_paste, read_clipboard_png, JsClipboardItems, JsPasteItems};
pub use session::{JsEditSession, JsLoadTicket};
pub use text::{base64_decode, base64_encode};
pub use transform::{resize_image, resize_then_rotate, resize_then_rotate_with_options, rotate_image};
pub use types::{JsEncodedImage, JsRasterImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::install();
}

/// Set the console log level: "off", "error", "warn", "info", "debug" or "trace".
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logging::parse_level(level)
        .ok_or_else(|| types::to_js_error(format!("Unknown log level: {}", level)))?;
    log::set_max_level(filter);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
