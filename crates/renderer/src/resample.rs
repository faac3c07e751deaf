//! Bicubic (Catmull-Rom) resampling of RGB rasters.

use image::{Rgb, RgbImage};
use rayon::prelude::*;

/// Resample an RGB image to `dst_width` x `dst_height`.
///
/// Source coordinates are mapped through pixel centers, so a uniform image
/// stays uniform and edges are not shifted by half a pixel.
pub fn resample_bicubic(src: &RgbImage, dst_width: u32, dst_height: u32) -> RgbImage {
    let (src_width, src_height) = src.dimensions();
    if src_width == dst_width && src_height == dst_height {
        return src.clone();
    }
    if src_width == 0 || src_height == 0 || dst_width == 0 || dst_height == 0 {
        return RgbImage::new(dst_width, dst_height);
    }

    let x_ratio = src_width as f32 / dst_width as f32;
    let y_ratio = src_height as f32 / dst_height as f32;
    let row_len = dst_width as usize * 3;

    let mut output = vec![0u8; row_len * dst_height as usize];

    output
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let src_y = (y as f32 + 0.5) * y_ratio - 0.5;
            for x in 0..dst_width as usize {
                let src_x = (x as f32 + 0.5) * x_ratio - 0.5;
                let pixel = cubic_sample(src, src_x, src_y);
                row[x * 3..x * 3 + 3].copy_from_slice(&pixel.0);
            }
        });

    // Buffer length is exactly width * height * 3 by construction
    RgbImage::from_raw(dst_width, dst_height, output)
        .unwrap_or_else(|| RgbImage::new(dst_width, dst_height))
}

/// Sample one output pixel from the 4x4 neighbourhood around (x, y).
fn cubic_sample(src: &RgbImage, x: f32, y: f32) -> Rgb<u8> {
    let (width, height) = src.dimensions();
    let xi = x.floor() as i64;
    let yi = y.floor() as i64;
    let xf = x - xi as f32;
    let yf = y - yi as f32;

    let mut out = [0u8; 3];
    for (channel, slot) in out.iter_mut().enumerate() {
        let mut row_values = [0.0f32; 4];
        for (j, row_value) in row_values.iter_mut().enumerate() {
            let py = (yi + j as i64 - 1).clamp(0, height as i64 - 1) as u32;
            let mut values = [0.0f32; 4];
            for (i, value) in values.iter_mut().enumerate() {
                let px = (xi + i as i64 - 1).clamp(0, width as i64 - 1) as u32;
                *value = src.get_pixel(px, py)[channel] as f32;
            }
            *row_value = cubic_1d(values[0], values[1], values[2], values[3], xf);
        }
        let v = cubic_1d(row_values[0], row_values[1], row_values[2], row_values[3], yf);
        *slot = v.round().clamp(0.0, 255.0) as u8;
    }

    Rgb(out)
}

/// 1D cubic interpolation using Catmull-Rom spline.
fn cubic_1d(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    // Catmull-Rom coefficients
    let a = -0.5 * p0 + 1.5 * p1 - 1.5 * p2 + 0.5 * p3;
    let b = p0 - 2.5 * p1 + 2.0 * p2 - 0.5 * p3;
    let c = -0.5 * p0 + 0.5 * p2;
    let d = p1;

    a * t3 + b * t2 + c * t + d
}
