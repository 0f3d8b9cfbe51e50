//! WASM bindings for the resize/rotate tool's editing state.
//!
//! `JsEditSession` replaces the UI's scattered component state. A load is
//! split in two so the host can await file or clipboard bytes in between:
//!
//! ```typescript
//! const session = new JsEditSession();
//! const ticket = session.begin_load();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! if (session.finish_load(ticket, bytes)) {
//!   widthInput.value = String(session.width);
//! }
//! ```

use crate::types::{dimension_from_js, options_from_js, to_js_error, JsEncodedImage, JsRasterImage};
use toolbench_core::decode::load_image_with;
use toolbench_core::session::{EditSession, LoadTicket};
use toolbench_core::transform::TransformOptions;
use wasm_bindgen::prelude::*;

/// Handle for one pending load.
#[wasm_bindgen]
pub struct JsLoadTicket {
    inner: LoadTicket,
}

#[wasm_bindgen]
impl JsLoadTicket {
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> f64 {
        self.inner.generation() as f64
    }
}

#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

impl Default for JsEditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsEditSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsEditSession {
        JsEditSession {
            inner: EditSession::new(),
        }
    }

    /// Start a load; earlier tickets become stale.
    pub fn begin_load(&mut self) -> JsLoadTicket {
        JsLoadTicket {
            inner: self.inner.begin_load(),
        }
    }

    /// Decode `bytes` and install them if `ticket` is still current.
    ///
    /// Returns false when the ticket was superseded. Throws if the current
    /// load fails to decode.
    pub fn finish_load(&mut self, ticket: &JsLoadTicket, bytes: &[u8]) -> Result<bool, JsValue> {
        let decoded = load_image_with(bytes, &self.inner.options().loader);
        self.inner
            .finish_load(ticket.inner, decoded)
            .map_err(to_js_error)
    }

    /// Install an already decoded image.
    pub fn load_raster(&mut self, image: &JsRasterImage) {
        self.inner.load(image.as_raster().clone());
    }

    /// Replace the transform options, e.g. `{ filter: "nearest" }`.
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsValue> {
        let options: TransformOptions = options_from_js(options)?;
        self.inner.set_options(options);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn has_source(&self) -> bool {
        self.inner.has_source()
    }

    #[wasm_bindgen(getter)]
    pub fn original_width(&self) -> u32 {
        self.inner.original_size().0
    }

    #[wasm_bindgen(getter)]
    pub fn original_height(&self) -> u32 {
        self.inner.original_size().1
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    #[wasm_bindgen(getter)]
    pub fn keep_ratio(&self) -> bool {
        self.inner.keep_ratio()
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> u32 {
        self.inner.rotation()
    }

    /// Set the target width; throws unless it is a whole number of at least 1.
    pub fn set_width(&mut self, width: f64) -> Result<(), JsValue> {
        self.inner.set_width(dimension_from_js(width)?);
        Ok(())
    }

    pub fn set_height(&mut self, height: f64) -> Result<(), JsValue> {
        self.inner.set_height(dimension_from_js(height)?);
        Ok(())
    }

    pub fn set_keep_ratio(&mut self, keep_ratio: bool) {
        self.inner.set_keep_ratio(keep_ratio);
    }

    pub fn reset_size(&mut self) {
        self.inner.reset_size();
    }

    pub fn rotate_right(&mut self) {
        self.inner.rotate_right();
    }

    pub fn rotate_left(&mut self) {
        self.inner.rotate_left();
    }

    pub fn reset_rotation(&mut self) {
        self.inner.reset_rotation();
    }

    /// Render the pending edit; `undefined` until an image is loaded.
    pub fn render(&self) -> Result<Option<JsEncodedImage>, JsValue> {
        let loader = self.inner.options().loader;
        self.inner
            .render()
            .map(|encoded| encoded.map(|encoded| JsEncodedImage::from_encoded(encoded, loader)))
            .map_err(to_js_error)
    }
}
