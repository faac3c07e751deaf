//! Tests for the jet colormap.

use image::Rgb;
use renderer::colormap::{interpolate_color, jet, sample_gradient, JET_STOPS};

/// Hue in degrees for a fully saturated color.
fn hue(color: Rgb<u8>) -> f32 {
    let [r, g, b] = color.0.map(|c| c as f32 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if delta == 0.0 {
        return 0.0;
    }
    let h = if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

// ============================================================================
// Endpoints and stops
// ============================================================================

#[test]
fn test_endpoints_are_blue_and_red() {
    assert_eq!(jet(0.0), Rgb([0, 0, 255]));
    assert_eq!(jet(1.0), Rgb([255, 0, 0]));
}

#[test]
fn test_five_stops_in_order() {
    let names: Vec<Rgb<u8>> = JET_STOPS.iter().map(|s| s.color).collect();
    assert_eq!(
        names,
        vec![
            Rgb([0, 0, 255]),
            Rgb([0, 255, 255]),
            Rgb([0, 255, 0]),
            Rgb([255, 255, 0]),
            Rgb([255, 0, 0]),
        ]
    );
    assert!(JET_STOPS.windows(2).all(|w| w[0].position < w[1].position));
}

#[test]
fn test_out_of_range_clamped() {
    assert_eq!(jet(-3.0), jet(0.0));
    assert_eq!(jet(7.5), jet(1.0));
}

// ============================================================================
// Hue progression
// ============================================================================

#[test]
fn test_hue_decreases_monotonically() {
    // Blue (240) -> cyan (180) -> green (120) -> yellow (60) -> red (0)
    let mut previous = f32::MAX;
    for i in 0..=200 {
        let h = hue(jet(i as f32 / 200.0));
        assert!(
            h <= previous + 1.0,
            "hue went back up at step {}: {} > {}",
            i,
            h,
            previous
        );
        previous = h;
    }
}

#[test]
fn test_deterministic_across_calls() {
    for i in 0..=100 {
        let t = i as f32 / 100.0;
        assert_eq!(jet(t), jet(t));
    }
}

// ============================================================================
// Gradient sampling
// ============================================================================

#[test]
fn test_gradient_matches_raster_colors() {
    // Column x of a 641-wide legend samples exactly x / 640
    let strip = sample_gradient(641);
    for (x, color) in strip.iter().enumerate() {
        assert_eq!(*color, jet(x as f32 / 640.0));
    }
}

#[test]
fn test_interpolate_color_bounds() {
    let a = Rgb([0, 0, 0]);
    let b = Rgb([255, 255, 255]);
    assert_eq!(interpolate_color(a, b, 0.0), a);
    assert_eq!(interpolate_color(a, b, 1.0), b);
    assert_eq!(interpolate_color(a, b, 2.0), b);
    assert_eq!(interpolate_color(a, b, -1.0), a);
}
