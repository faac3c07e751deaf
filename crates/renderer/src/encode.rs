//! JPEG encoding of finished frames and decoding of arbitrary uploads.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, RgbImage};
use thermal_common::{ThermalError, ThermalResult};

/// Fixed JPEG quality so identical frames encode identically.
pub const JPEG_QUALITY: u8 = 85;

pub const JPEG_MIME: &str = "image/jpeg";

/// An encoded frame. Cloning shares the underlying buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Bytes,
    mime_type: &'static str,
}

impl EncodedImage {
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

/// Encode an RGB image as JPEG.
pub fn encode_jpeg(img: &RgbImage) -> ThermalResult<EncodedImage> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(ThermalError::Encoding(format!(
            "Cannot encode empty image ({}x{})",
            width, height
        )));
    }

    let mut buf = Vec::with_capacity((width * height) as usize / 4);
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
        .encode(img.as_raw(), width, height, ColorType::Rgb8)
        .map_err(|e| ThermalError::Encoding(e.to_string()))?;

    Ok(EncodedImage {
        bytes: Bytes::from(buf),
        mime_type: JPEG_MIME,
    })
}

/// Decode any image format the `image` crate recognizes and convert it to
/// 3-channel RGB.
pub fn decode_to_rgb(data: &[u8]) -> ThermalResult<RgbImage> {
    if data.is_empty() {
        return Err(ThermalError::Validation("Image payload is empty".to_string()));
    }

    let decoded = image::load_from_memory(data)
        .map_err(|e| ThermalError::Decoding(e.to_string()))?;

    Ok(decoded.to_rgb8())
}
