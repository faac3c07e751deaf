//! Jet colormap for normalized thermal values.
//!
//! The same function colors the thermal raster and the legend strip, so a
//! legend column and a raster pixel with the same normalized value are always
//! the same color.

use image::Rgb;

/// A single stop on the gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub position: f32,
    pub color: Rgb<u8>,
}

impl ColorStop {
    const fn new(position: f32, r: u8, g: u8, b: u8) -> Self {
        Self {
            position,
            color: Rgb([r, g, b]),
        }
    }
}

/// Blue -> cyan -> green -> yellow -> red.
pub const JET_STOPS: [ColorStop; 5] = [
    ColorStop::new(0.0, 0, 0, 255),
    ColorStop::new(0.25, 0, 255, 255),
    ColorStop::new(0.5, 0, 255, 0),
    ColorStop::new(0.75, 255, 255, 0),
    ColorStop::new(1.0, 255, 0, 0),
];

/// Map a normalized value in [0, 1] to a color.
///
/// Values outside the range are clamped; NaN maps to the zero point.
pub fn jet(value: f32) -> Rgb<u8> {
    let t = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };

    for pair in JET_STOPS.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if t <= hi.position {
            let local = (t - lo.position) / (hi.position - lo.position);
            return interpolate_color(lo.color, hi.color, local);
        }
    }

    JET_STOPS[JET_STOPS.len() - 1].color
}

/// Linear color interpolation
pub fn interpolate_color(color1: Rgb<u8>, color2: Rgb<u8>, t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;
    let channel = |a: u8, b: u8| (a as f32 * t_inv + b as f32 * t).round() as u8;

    Rgb([
        channel(color1[0], color2[0]),
        channel(color1[1], color2[1]),
        channel(color1[2], color2[2]),
    ])
}

/// Sample the colormap at `count` evenly spaced points from 0 to 1.
pub fn sample_gradient(count: usize) -> Vec<Rgb<u8>> {
    match count {
        0 => Vec::new(),
        1 => vec![jet(0.0)],
        n => (0..n).map(|i| jet(i as f32 / (n - 1) as f32)).collect(),
    }
}
