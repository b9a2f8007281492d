use crate::{Error, Result};

/// Detect the MIME type of an uploaded image from its magic bytes.
///
/// Only PNG and JPEG are accepted as prompt attachments; anything else is
/// a validation error before the bytes ever reach the wire.
pub fn detect_image_mime(bytes: &[u8]) -> Result<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Ok("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok("image/png"),
        _ => Err(Error::Validation(format!(
            "Unsupported image format (first 4 bytes: {:02X?}), expected PNG or JPEG",
            &bytes[..bytes.len().min(4)]
        ))),
    }
}
