//! WASM bindings for choosing a PNG from the clipboard or a paste event.
//!
//! The host collects what the browser offers into a list and asks which
//! bytes to load:
//!
//! ```typescript
//! const items = new JsClipboardItems();
//! for (const item of await navigator.clipboard.read()) {
//!   const png = item.types.includes("image/png")
//!     ? new Uint8Array(await (await item.getType("image/png")).arrayBuffer())
//!     : undefined;
//!   items.push(item.types, png);
//! }
//! const bytes = read_clipboard_png(items); // throws "Not a png file"
//! ```

use crate::types::to_js_error;
use toolbench_core::input::{self, ClipboardItem, PasteItem};
use wasm_bindgen::prelude::*;

/// Items from one `navigator.clipboard.read()` call.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsClipboardItems {
    items: Vec<ClipboardItem>,
}

#[wasm_bindgen]
impl JsClipboardItems {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsClipboardItems {
        JsClipboardItems::default()
    }

    /// Add an item with its MIME types and, if it has one, its PNG payload.
    pub fn push(&mut self, types: &js_sys::Array, png: Option<Vec<u8>>) {
        let types = types.iter().filter_map(|t| t.as_string()).collect();
        self.push_item(ClipboardItem::new(types, png));
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.items.len()
    }
}

impl JsClipboardItems {
    pub(crate) fn push_item(&mut self, item: ClipboardItem) {
        self.items.push(item);
    }
}

/// Items from one `paste` event's `clipboardData.items`.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsPasteItems {
    items: Vec<PasteItem>,
}

#[wasm_bindgen]
impl JsPasteItems {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsPasteItems {
        JsPasteItems::default()
    }

    pub fn push(&mut self, mime_type: String, bytes: Vec<u8>) {
        self.items.push(PasteItem::new(mime_type, bytes));
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.items.len()
    }
}

/// PNG bytes to load from a clipboard read, or `undefined` if it was empty.
///
/// # Errors
///
/// Throws `"Not a png file"` if any item lacks an `image/png` representation.
#[wasm_bindgen]
pub fn read_clipboard_png(items: &JsClipboardItems) -> Result<Option<Vec<u8>>, JsValue> {
    input::read_clipboard_png(&items.items)
        .map(|png| png.map(<[u8]>::to_vec))
        .map_err(to_js_error)
}

/// PNG bytes to load from a paste event, or `undefined` if it had none.
#[wasm_bindgen]
pub fn png_from_paste(items: &JsPasteItems) -> Option<Vec<u8>> {
    input::png_from_paste(&items.items).map(<[u8]>::to_vec)
}
