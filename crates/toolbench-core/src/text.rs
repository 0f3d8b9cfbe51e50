//! Base64 encoding and decoding of text.
//!
//! Text is encoded as its UTF-8 bytes using the standard alphabet with
//! padding. Decoding ignores ASCII whitespace anywhere in the input, accepts
//! missing padding and ignores non-zero trailing bits, as `atob` does.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use thiserror::Error;

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Errors from [`decode_text`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Base64Error {
    #[error("Invalid base64: {0}")]
    InvalidBase64(String),

    #[error("Decoded data is not valid UTF-8")]
    NotUtf8,
}

/// Encode `text` as padded standard base64.
///
/// ```
/// assert_eq!(toolbench_core::text::encode_text("hello"), "aGVsbG8=");
/// ```
pub fn encode_text(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode base64 back into text.
///
/// # Errors
///
/// * `Base64Error::InvalidBase64` for characters outside the alphabet or a bad length
/// * `Base64Error::NotUtf8` when the decoded bytes are not UTF-8 text
pub fn decode_text(encoded: &str) -> Result<String, Base64Error> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = LENIENT
        .decode(compact.as_bytes())
        .map_err(|e| Base64Error::InvalidBase64(e.to_string()))?;

    String::from_utf8(bytes).map_err(|_| Base64Error::NotUtf8)
}
