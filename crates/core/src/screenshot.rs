//! Screenshot upload limits and image-format sniffing.
//!
//! Limits are enforced before any blob is written: at most
//! [`MAX_SCREENSHOTS_PER_REQUEST`] images per request, each at most
//! [`MAX_SCREENSHOT_BYTES`]. Format detection reads only the file header,
//! never the full image.

use image::ImageFormat;

use crate::error::CoreError;

/// Maximum number of screenshots attached to one request.
pub const MAX_SCREENSHOTS_PER_REQUEST: usize = 5;

/// Maximum size of a single screenshot (5 MiB).
pub const MAX_SCREENSHOT_BYTES: usize = 5 * 1024 * 1024;

/// Validate that adding `adding` screenshots to `existing` stays within the
/// per-request limit.
pub fn validate_count(existing: usize, adding: usize) -> Result<(), CoreError> {
    if existing + adding > MAX_SCREENSHOTS_PER_REQUEST {
        return Err(CoreError::Validation(format!(
            "At most {MAX_SCREENSHOTS_PER_REQUEST} screenshots are allowed per request \
             ({existing} already attached, {adding} new)"
        )));
    }
    Ok(())
}

/// Validate a single file's size against [`MAX_SCREENSHOT_BYTES`].
pub fn validate_size(filename: &str, size_bytes: usize) -> Result<(), CoreError> {
    if size_bytes > MAX_SCREENSHOT_BYTES {
        return Err(CoreError::Validation(format!(
            "'{filename}' exceeds the maximum screenshot size of 5 MB"
        )));
    }
    Ok(())
}

/// Sniff the image format from the file header and return the canonical
/// file extension to store the blob under.
///
/// Only PNG, JPEG, WebP, and GIF are accepted.
pub fn sniff_extension(filename: &str, data: &[u8]) -> Result<&'static str, CoreError> {
    let format = image::guess_format(data).map_err(|_| {
        CoreError::Validation(format!("'{filename}' is not a recognized image file"))
    })?;

    match format {
        ImageFormat::Png => Ok("png"),
        ImageFormat::Jpeg => Ok("jpg"),
        ImageFormat::WebP => Ok("webp"),
        ImageFormat::Gif => Ok("gif"),
        other => Err(CoreError::Validation(format!(
            "'{filename}' has unsupported image format {other:?}. \
             Supported: PNG, JPEG, WebP, GIF"
        ))),
    }
}
