//! Image Crop Transform
//!
//! Cropping takes an uploaded image, an offset given as percentages of the
//! image's natural size, and a zoom factor:
//!
//! - origin = (x% of width, y% of height)
//! - output size = natural size / zoom
//!
//! The output is sampled 1:1 from the origin; whatever falls outside the
//! source stays black. The result is encoded as JPEG.
//!
//! The aspect ratio of the crop dialog is carried along but does not enter
//! the pixel math; the output keeps the source's proportions.

mod upload;

pub use upload::{decode_data_url, read_image_file};

use crate::error::{Error, Result};
use crate::model::ImageField;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, GenericImageView, RgbImage};
use log::debug;

// ─────────────────────────────────────────────────────────────────────────────
// Crop Request
// ─────────────────────────────────────────────────────────────────────────────

/// An in-progress crop of one image field. At most one exists at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct CropRequest {
    /// Field that receives the result
    pub target: ImageField,
    /// Raw bytes of the uploaded image
    pub source: Vec<u8>,
    /// Aspect ratio the crop dialog is constrained to
    pub aspect_ratio: f64,
}

impl CropRequest {
    /// Open a request using the field's own aspect ratio.
    pub fn new(target: ImageField, source: Vec<u8>) -> Self {
        Self {
            target,
            source,
            aspect_ratio: target.aspect_ratio(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Geometry
// ─────────────────────────────────────────────────────────────────────────────

/// Crop offset in percent of the source's natural width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropOffset {
    pub x: f64,
    pub y: f64,
}

impl CropOffset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where to sample from and how large the output is, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropGeometry {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: u32,
    pub height: u32,
}

/// Smallest zoom the crop dialog offers; the output is never larger than
/// the source.
pub const MIN_ZOOM: f64 = 1.0;

/// Largest offset magnitude, in percent, that still overlaps the source.
pub const MAX_OFFSET_PERCENT: f64 = 100.0;

/// Compute the crop rectangle for a source of the given natural size.
///
/// Output dimensions truncate toward zero. Zoom must be at least
/// [`MIN_ZOOM`] and each offset within ±[`MAX_OFFSET_PERCENT`].
pub fn crop_geometry(
    natural_width: u32,
    natural_height: u32,
    offset: CropOffset,
    zoom: f64,
) -> Result<CropGeometry> {
    if !zoom.is_finite() || zoom < MIN_ZOOM {
        return Err(Error::InvalidCrop(format!(
            "zoom must be at least {}, got {}",
            MIN_ZOOM, zoom
        )));
    }
    let offset_in_range = |value: f64| value.is_finite() && value.abs() <= MAX_OFFSET_PERCENT;
    if !offset_in_range(offset.x) || !offset_in_range(offset.y) {
        return Err(Error::InvalidCrop(format!(
            "offset ({}, {}) is outside ±{}%",
            offset.x, offset.y, MAX_OFFSET_PERCENT
        )));
    }

    let geometry = CropGeometry {
        origin_x: offset.x / 100.0 * f64::from(natural_width),
        origin_y: offset.y / 100.0 * f64::from(natural_height),
        width: (f64::from(natural_width) / zoom) as u32,
        height: (f64::from(natural_height) / zoom) as u32,
    };

    if geometry.width == 0 || geometry.height == 0 {
        return Err(Error::InvalidCrop(format!(
            "{}x{} source at zoom {} leaves no pixels",
            natural_width, natural_height, zoom
        )));
    }
    Ok(geometry)
}

/// Copy the crop rectangle out of `source` into a new RGB raster.
///
/// `geometry` is expected to come from [`crop_geometry`], which bounds the
/// raster to the source's size.
pub fn crop_pixels(source: &DynamicImage, geometry: &CropGeometry) -> RgbImage {
    let (source_width, source_height) = source.dimensions();
    let mut canvas = RgbImage::new(geometry.width, geometry.height);

    let origin_x = geometry.origin_x.floor() as i64;
    let origin_y = geometry.origin_y.floor() as i64;

    // Part of the rectangle that overlaps the source.
    let left = origin_x.max(0);
    let top = origin_y.max(0);
    let right = origin_x
        .saturating_add(i64::from(geometry.width))
        .min(i64::from(source_width));
    let bottom = origin_y
        .saturating_add(i64::from(geometry.height))
        .min(i64::from(source_height));

    if right > left && bottom > top {
        let visible = imageops::crop_imm(
            source,
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        )
        .to_image();
        let visible = DynamicImage::ImageRgba8(visible).to_rgb8();
        imageops::overlay(&mut canvas, &visible, left - origin_x, top - origin_y);
    }

    canvas
}

// ─────────────────────────────────────────────────────────────────────────────
// Crop
// ─────────────────────────────────────────────────────────────────────────────

/// A cropped, JPEG-encoded image.
#[derive(Debug, Clone, PartialEq)]
pub struct CroppedImage {
    pub width: u32,
    pub height: u32,
    /// JPEG bytes
    pub bytes: Vec<u8>,
}

impl CroppedImage {
    /// Encode as a `data:image/jpeg;base64,` URL for storing in a field.
    pub fn to_data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", STANDARD.encode(&self.bytes))
    }
}

/// Crop and zoom an encoded image.
///
/// # Arguments
///
/// * `source` - Encoded image bytes (PNG, JPEG, GIF, WebP or BMP)
/// * `offset` - Crop origin in percent of the natural size
/// * `zoom` - Zoom factor; output is natural size / zoom
/// * `aspect_ratio` - Aspect the crop dialog used; not applied to the pixels
/// * `quality` - JPEG quality, 1-100
///
/// # Errors
///
/// `Error::ImageDecode` if the source cannot be decoded, `Error::InvalidCrop`
/// for a zoom or offset that yields no image, `Error::ImageEncode` if JPEG
/// encoding fails. On error the caller keeps the field's previous value.
pub fn crop_image(
    source: &[u8],
    offset: CropOffset,
    zoom: f64,
    aspect_ratio: f64,
    quality: u8,
) -> Result<CroppedImage> {
    let image = image::load_from_memory(source)
        .map_err(|e| Error::image_decode("source image could not be decoded", e))?;
    let (natural_width, natural_height) = image.dimensions();

    let geometry = crop_geometry(natural_width, natural_height, offset, zoom)?;
    debug!(
        "Cropping {}x{} source at ({:.1}, {:.1}) to {}x{} (zoom {}, dialog aspect {:.3})",
        natural_width,
        natural_height,
        geometry.origin_x,
        geometry.origin_y,
        geometry.width,
        geometry.height,
        zoom,
        aspect_ratio
    );

    let pixels = crop_pixels(&image, &geometry);

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
        .encode_image(&pixels)
        .map_err(Error::ImageEncode)?;

    Ok(CroppedImage {
        width: geometry.width,
        height: geometry.height,
        bytes,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
