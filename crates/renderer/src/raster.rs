//! Raster compositing: build the native 32x24 image and scale it for display.

use image::{Rgb, RgbImage};
use thermal_common::{ThermalError, ThermalResult, SENSOR_HEIGHT, SENSOR_PIXELS, SENSOR_WIDTH};

use crate::colormap::jet;
use crate::normalize::NormalizedGrid;
use crate::resample::resample_bicubic;

/// Expected length of a raw RGB upload.
pub const RAW_RGB_LEN: usize = SENSOR_PIXELS * 3;

/// Output resolutions used by the different entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySize {
    /// 320x240, used for pre-rendered RGB uploads.
    Small,
    /// 640x480, used for thermal sample uploads.
    Large,
    Custom { width: u32, height: u32 },
}

impl DisplaySize {
    pub fn dimensions(&self) -> (u32, u32) {
        match *self {
            DisplaySize::Small => (320, 240),
            DisplaySize::Large => (640, 480),
            DisplaySize::Custom { width, height } => (width, height),
        }
    }
}

/// Build a native-resolution raster from raw row-major RGB bytes.
///
/// The length is checked before anything is allocated.
pub fn raster_from_rgb_bytes(data: &[u8]) -> ThermalResult<RgbImage> {
    if data.len() != RAW_RGB_LEN {
        return Err(ThermalError::size_mismatch("RGB data", RAW_RGB_LEN, data.len()));
    }

    RgbImage::from_raw(SENSOR_WIDTH as u32, SENSOR_HEIGHT as u32, data.to_vec())
        .ok_or_else(|| ThermalError::Internal("RGB buffer rejected by image crate".to_string()))
}

/// Color every normalized sample through the jet colormap.
pub fn colorize(grid: &NormalizedGrid) -> RgbImage {
    let width = grid.width() as u32;
    let values = grid.values();

    RgbImage::from_fn(width, grid.height() as u32, |x, y| {
        values
            .get((y * width + x) as usize)
            .map(|&v| jet(v))
            .unwrap_or(Rgb([0, 0, 0]))
    })
}

/// Scale a raster to the requested display size with bicubic interpolation.
pub fn upscale(raster: RgbImage, size: DisplaySize) -> RgbImage {
    let (width, height) = size.dimensions();
    if raster.dimensions() == (width, height) {
        return raster;
    }
    resample_bicubic(&raster, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use thermal_common::SampleGrid;

    #[test]
    fn test_rgb_bytes_size_check() {
        let err = raster_from_rgb_bytes(&vec![0u8; RAW_RGB_LEN - 1]).unwrap_err();
        assert!(matches!(err, ThermalError::Validation(_)));
        assert!(err.to_string().contains("2303"));

        assert!(raster_from_rgb_bytes(&vec![0u8; RAW_RGB_LEN + 1]).is_err());
        assert!(raster_from_rgb_bytes(&[]).is_err());
    }

    #[test]
    fn test_rgb_bytes_row_major() {
        let mut data = vec![0u8; RAW_RGB_LEN];
        // Pixel (x=1, y=0)
        data[3..6].copy_from_slice(&[1, 2, 3]);
        // Pixel (x=0, y=1)
        let offset = SENSOR_WIDTH * 3;
        data[offset..offset + 3].copy_from_slice(&[4, 5, 6]);

        let img = raster_from_rgb_bytes(&data).unwrap();
        assert_eq!(img.dimensions(), (32, 24));
        assert_eq!(*img.get_pixel(1, 0), Rgb([1, 2, 3]));
        assert_eq!(*img.get_pixel(0, 1), Rgb([4, 5, 6]));
    }

    #[test]
    fn test_colorize_uses_colormap() {
        let mut samples = vec![0.0; SENSOR_PIXELS];
        samples[SENSOR_PIXELS - 1] = 10.0;
        let grid = normalize(&SampleGrid::new(samples).unwrap());

        let img = colorize(&grid);
        assert_eq!(*img.get_pixel(0, 0), jet(0.0));
        assert_eq!(*img.get_pixel(31, 23), jet(1.0));
    }

    #[test]
    fn test_upscale_dimensions() {
        let img = RgbImage::new(32, 24);
        assert_eq!(upscale(img.clone(), DisplaySize::Small).dimensions(), (320, 240));
        assert_eq!(upscale(img, DisplaySize::Large).dimensions(), (640, 480));
    }
}
