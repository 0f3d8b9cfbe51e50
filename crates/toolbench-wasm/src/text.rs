//! WASM bindings for the base64 tool.

use crate::types::to_js_error;
use toolbench_core::text;
use wasm_bindgen::prelude::*;

/// Encode text as padded standard base64 over its UTF-8 bytes.
#[wasm_bindgen]
pub fn base64_encode(input: &str) -> String {
    text::encode_text(input)
}

/// Decode base64 into text, ignoring whitespace.
///
/// # Errors
///
/// Throws on characters outside the base64 alphabet or non-UTF-8 output.
#[wasm_bindgen]
pub fn base64_decode(input: &str) -> Result<String, JsValue> {
    text::decode_text(input).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_encode() {
        assert_eq!(base64_encode("hello world"), "aGVsbG8gd29ybGQ=");
    }

    #[test]
    fn test_base64_decode() {
        assert_eq!(base64_decode("aGVsbG8gd29ybGQ=").unwrap(), "hello world");
    }
}
