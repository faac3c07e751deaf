//! End-to-end entry points.
//!
//! - `render_thermal`: samples -> normalize -> colormap -> upscale -> legend -> JPEG
//! - `render_rgb`: pre-rendered 32x24 RGB bytes -> upscale -> JPEG
//! - `convert_image`: any decodable image -> RGB -> JPEG

use image::RgbImage;
use thermal_common::{SampleGrid, ThermalResult};
use tracing::debug;

use crate::encode::{decode_to_rgb, encode_jpeg, EncodedImage};
use crate::font::LegendFont;
use crate::legend::{compose, render_legend, LegendSpec};
use crate::normalize::{normalize, TemperatureRange};
use crate::raster::{colorize, raster_from_rgb_bytes, upscale, DisplaySize};

/// Result of rendering a thermal frame.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub encoded: EncodedImage,
    pub range: TemperatureRange,
    pub width: u32,
    pub height: u32,
}

/// Build the composed (raster + legend) image for a sample grid.
pub fn compose_thermal(
    grid: &SampleGrid,
    size: DisplaySize,
    font: &LegendFont,
) -> ThermalResult<(RgbImage, TemperatureRange)> {
    let normalized = normalize(grid);
    let range = normalized.range();
    debug!(min = range.min, max = range.max, "Normalized sample grid");

    let raster = upscale(colorize(&normalized), size);
    let composed = compose(raster, range, font)?;
    debug!(
        width = composed.image().width(),
        height = composed.image().height(),
        "Composed thermal frame with legend"
    );

    Ok((composed.into_image(), range))
}

/// Render raw thermal samples into an encoded frame with a legend.
pub fn render_thermal(
    grid: &SampleGrid,
    size: DisplaySize,
    font: &LegendFont,
) -> ThermalResult<RenderedFrame> {
    let (image, range) = compose_thermal(grid, size, font)?;
    let encoded = encode_jpeg(&image)?;

    Ok(RenderedFrame {
        encoded,
        range,
        width: image.width(),
        height: image.height(),
    })
}

/// Upscale a pre-rendered RGB frame and encode it. No legend is added since
/// the temperature range is unknown.
pub fn render_rgb(data: &[u8], size: DisplaySize) -> ThermalResult<EncodedImage> {
    let raster = raster_from_rgb_bytes(data)?;
    debug!("RGB image created successfully");

    let scaled = upscale(raster, size);
    debug!(width = scaled.width(), height = scaled.height(), "Image scaled up");

    encode_jpeg(&scaled)
}

/// Re-encode an uploaded image of any supported format as JPEG.
pub fn convert_image(data: &[u8]) -> ThermalResult<EncodedImage> {
    let rgb = decode_to_rgb(data)?;
    debug!(width = rgb.width(), height = rgb.height(), "Decoded uploaded image");
    encode_jpeg(&rgb)
}

/// Render the legend strip alone for a given range and width.
pub fn render_legend_preview(
    range: TemperatureRange,
    width: u32,
    font: &LegendFont,
) -> ThermalResult<EncodedImage> {
    let spec = LegendSpec::new(width, range);
    let (strip, _) = render_legend(&spec, font);
    encode_jpeg(&strip)
}
