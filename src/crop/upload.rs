//! Upload boundary: reading image files and image data URLs into raw bytes.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// Read an image file picked by the user.
///
/// Fails with `Error::ImageDecode` when the file cannot be read or is not in
/// a recognised image format; the crop dialog is then never opened.
pub fn read_image_file(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).map_err(|e| {
        warn!("Failed to read image {}: {}", path.display(), e);
        Error::image_decode(format!("failed to read {}", path.display()), e)
    })?;

    let format = image::guess_format(&bytes).map_err(|e| {
        warn!("{} is not a recognised image: {}", path.display(), e);
        Error::image_decode(format!("{} is not a recognised image", path.display()), e)
    })?;

    debug!(
        "Read {} bytes of {:?} from {}",
        bytes.len(),
        format,
        path.display()
    );
    Ok(bytes)
}

/// Decode a `data:<mime>;base64,<payload>` URL back into bytes.
///
/// Used to re-crop an image that is already stored in a field.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| Error::InvalidDataUrl("missing data: prefix".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::InvalidDataUrl("missing payload separator".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(Error::InvalidDataUrl(
            "only base64 data URLs are supported".to_string(),
        ));
    }

    STANDARD
        .decode(payload)
        .map_err(|e| Error::InvalidDataUrl(e.to_string()))
}
