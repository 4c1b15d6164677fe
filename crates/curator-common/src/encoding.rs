//! Binary-to-text encoding of image files.
//!
//! The catalog accepts images as `data:` URIs carrying base64 payloads.

use crate::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::Path;

/// Mime type for an image path, from its extension.
pub fn image_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Encode raw image bytes as a `data:` URI.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Read an image file and encode it as a `data:` URI.
///
/// Empty files are rejected, the catalog would store a blank cover.
pub fn file_to_data_uri(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    if bytes.is_empty() {
        return Err(Error::invalid_input(format!(
            "image file is empty: {}",
            path.display()
        )));
    }
    Ok(encode_data_uri(image_mime_type(path), &bytes))
}
