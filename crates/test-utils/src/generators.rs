//! Generators for synthetic thermal frames and raw RGB buffers.
//!
//! All grids are row-major and sized for the 32x24 sensor unless a size is
//! passed explicitly.

pub use thermal_common::{
    SENSOR_HEIGHT as HEIGHT, SENSOR_PIXELS as PIXELS, SENSOR_WIDTH as WIDTH,
};

/// A frame where every sample is `value`.
pub fn create_constant_frame(value: f32) -> Vec<f32> {
    vec![value; PIXELS]
}

/// A frame with `len` samples, for exercising size validation.
pub fn create_frame_of_len(len: usize, value: f32) -> Vec<f32> {
    vec![value; len]
}

/// Left-to-right gradient from `min` (column 0) to `max` (last column).
///
/// # Example
///
/// ```
/// use test_utils::create_gradient_frame;
///
/// let frame = create_gradient_frame(10.0, 41.0);
/// assert_eq!(frame.len(), 768);
/// assert_eq!(frame[0], 10.0);
/// assert_eq!(frame[31], 41.0);
/// ```
pub fn create_gradient_frame(min: f32, max: f32) -> Vec<f32> {
    let step = (max - min) / (WIDTH - 1) as f32;
    let mut data = Vec::with_capacity(PIXELS);
    for _row in 0..HEIGHT {
        for col in 0..WIDTH {
            data.push(min + step * col as f32);
        }
    }
    data
}

/// Room-temperature frame with a warm circular spot, like a person or a mug
/// in front of the sensor.
///
/// Background is `ambient`, the spot center reaches `peak`, falling off
/// linearly to the edge of `radius` (in sensor pixels).
pub fn create_hotspot_frame(ambient: f32, peak: f32, cx: usize, cy: usize, radius: f32) -> Vec<f32> {
    let mut data = Vec::with_capacity(PIXELS);
    for row in 0..HEIGHT {
        for col in 0..WIDTH {
            let dx = col as f32 - cx as f32;
            let dy = row as f32 - cy as f32;
            let dist = (dx * dx + dy * dy).sqrt();
            let weight = (1.0 - dist / radius).max(0.0);
            data.push(ambient + (peak - ambient) * weight);
        }
    }
    data
}

/// Deterministic pseudo-random noise around `base` (+/- `amplitude`).
///
/// Uses a simple LCG so tests don't need `rand`.
pub fn create_noisy_frame(base: f32, amplitude: f32, seed: u32) -> Vec<f32> {
    let mut state = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
    (0..PIXELS)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let unit = ((state >> 16) & 0x7fff) as f32 / 32767.0;
            base + (unit * 2.0 - 1.0) * amplitude
        })
        .collect()
}

/// Serialize a frame the way a sensor client posts it.
pub fn frame_to_json(frame: &[f32]) -> Vec<u8> {
    serde_json::to_vec(frame).expect("f32 slices always serialize")
}

/// Raw row-major RGB bytes for a 32x24 frame where each pixel encodes its
/// position: R = x * 8, G = y * 10, B = 128.
pub fn create_raw_rgb_frame() -> Vec<u8> {
    let mut data = Vec::with_capacity(PIXELS * 3);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            data.push((x * 8) as u8);
            data.push((y * 10) as u8);
            data.push(128);
        }
    }
    data
}

/// Raw RGB buffer of arbitrary length, filled with mid gray.
pub fn create_raw_rgb_of_len(len: usize) -> Vec<u8> {
    vec![128; len]
}
