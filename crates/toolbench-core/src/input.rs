//! Rules for accepting images from the clipboard and from paste events.
//!
//! The browser hands these over as typed items; the host copies the relevant
//! payloads into the structs below and lets this module decide which bytes,
//! if any, become the new source image. Only PNG is accepted.

use thiserror::Error;

/// The only MIME type accepted from the clipboard or a paste.
pub const PNG_MIME: &str = "image/png";

/// Errors when acquiring an image from the clipboard.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Clipboard access was denied or is unsupported by the host.
    #[error("{0}")]
    AccessDenied(String),

    /// A clipboard item does not offer a PNG representation.
    #[error("Not a png file")]
    NotPng,

    /// An item advertised `image/png` but no payload was supplied for it.
    #[error("Clipboard item has no image/png data")]
    MissingPayload,
}

/// One clipboard item: every MIME type it offers plus its PNG payload, if read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardItem {
    pub types: Vec<String>,
    pub png: Option<Vec<u8>>,
}

impl ClipboardItem {
    pub fn new(types: Vec<String>, png: Option<Vec<u8>>) -> Self {
        Self { types, png }
    }

    pub fn offers_png(&self) -> bool {
        self.types.iter().any(|t| t == PNG_MIME)
    }
}

/// One item of a paste event. Paste items carry a single MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteItem {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl PasteItem {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// Pick the PNG to load from a clipboard read.
///
/// Every item must offer `image/png`. When several do, the last one wins.
/// An empty clipboard yields `Ok(None)`.
///
/// # Errors
///
/// * `InputError::NotPng` for the first item without a PNG representation
/// * `InputError::MissingPayload` if a PNG item arrived without its bytes
pub fn read_clipboard_png(items: &[ClipboardItem]) -> Result<Option<&[u8]>, InputError> {
    let mut selected = None;

    for item in items {
        if !item.offers_png() {
            log::warn!("Rejecting clipboard item with types {:?}", item.types);
            return Err(InputError::NotPng);
        }
        let bytes = item.png.as_deref().ok_or(InputError::MissingPayload)?;
        selected = Some(bytes);
    }

    if let Some(bytes) = selected {
        log::debug!("Clipboard PNG selected ({} bytes)", bytes.len());
    }
    Ok(selected)
}

/// Pick the PNG to load from a paste event: the last `image/png` item, if any.
pub fn png_from_paste(items: &[PasteItem]) -> Option<&[u8]> {
    items
        .iter()
        .rev()
        .find(|item| item.mime_type == PNG_MIME)
        .map(|item| item.bytes.as_slice())
}
