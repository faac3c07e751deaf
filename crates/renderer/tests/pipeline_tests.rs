//! End-to-end tests for the rendering entry points.

use image::{GenericImageView, Rgb};
use renderer::colormap::jet;
use renderer::font::LegendFont;
use renderer::legend::{layout_labels, LegendSpec, LEGEND_HEIGHT};
use renderer::pipeline::{compose_thermal, convert_image, render_legend_preview, render_rgb, render_thermal};
use renderer::{DisplaySize, TemperatureRange};
use test_utils::{
    assert_pixel_approx_eq, create_constant_frame, create_frame_of_len, create_hotspot_frame,
    create_raw_rgb_frame, create_raw_rgb_of_len, frame_to_json, tiny_bmp,
};
use thermal_common::{SampleGrid, ThermalError};

fn decode_dims(bytes: &[u8]) -> (u32, u32) {
    image::load_from_memory(bytes).unwrap().dimensions()
}

// ============================================================================
// Thermal samples
// ============================================================================

#[test]
fn test_thermal_round_trip_preserves_dimensions() {
    let grid = SampleGrid::new(create_hotspot_frame(21.0, 35.0, 16, 12, 6.0)).unwrap();

    for (size, expected) in [
        (DisplaySize::Large, (640, 480 + LEGEND_HEIGHT)),
        (DisplaySize::Small, (320, 240 + LEGEND_HEIGHT)),
    ] {
        let frame = render_thermal(&grid, size, &LegendFont::FixedBitmap).unwrap();
        assert_eq!((frame.width, frame.height), expected);
        assert_eq!(decode_dims(frame.encoded.bytes()), expected);
        assert_eq!(frame.encoded.mime_type(), "image/jpeg");
    }
}

#[test]
fn test_constant_frame_scenario() {
    let grid = SampleGrid::new(create_constant_frame(25.0)).unwrap();
    let (image, range) = compose_thermal(&grid, DisplaySize::Large, &LegendFont::FixedBitmap).unwrap();

    assert_eq!(range, TemperatureRange::new(25.0, 25.0));

    // Raster part is one uniform block of the colormap zero point
    let zero = jet(0.0);
    for y in 0..480 {
        for x in 0..640 {
            assert_eq!(*image.get_pixel(x, y), zero);
        }
    }

    // Legend shows the same label three times
    let spec = LegendSpec::new(640, range);
    let labels = layout_labels(&spec, &LegendFont::FixedBitmap);
    assert!(labels.iter().all(|l| l.text == "25.0°C"));
}

#[test]
fn test_wrong_sample_count_rejected() {
    for len in [767, 769] {
        let err = SampleGrid::new(create_frame_of_len(len, 20.0)).unwrap_err();
        assert!(matches!(err, ThermalError::Validation(_)));
    }
    assert!(SampleGrid::new(create_frame_of_len(768, 20.0)).is_ok());
}

#[test]
fn test_json_frame_renders() {
    let body = frame_to_json(&create_hotspot_frame(19.0, 30.0, 5, 5, 3.0));
    let grid = SampleGrid::from_json(&body).unwrap();
    let frame = render_thermal(&grid, DisplaySize::Large, &LegendFont::FixedBitmap).unwrap();
    assert_eq!(frame.range.min, 19.0);
    assert_eq!(frame.range.max, 30.0);
}

#[test]
fn test_thermal_render_is_deterministic() {
    let grid = SampleGrid::new(create_hotspot_frame(21.0, 35.0, 8, 8, 4.0)).unwrap();
    let a = render_thermal(&grid, DisplaySize::Large, &LegendFont::FixedBitmap).unwrap();
    let b = render_thermal(&grid, DisplaySize::Large, &LegendFont::FixedBitmap).unwrap();
    assert_eq!(a.encoded, b.encoded);
}

// ============================================================================
// Raw RGB
// ============================================================================

#[test]
fn test_rgb_upload_scaled_to_small() {
    let encoded = render_rgb(&create_raw_rgb_frame(), DisplaySize::Small).unwrap();
    assert_eq!(decode_dims(encoded.bytes()), (320, 240));
}

#[test]
fn test_rgb_one_byte_short_rejected() {
    let err = render_rgb(&create_raw_rgb_of_len(2303), DisplaySize::Small).unwrap_err();
    assert!(matches!(err, ThermalError::Validation(_)));
    assert!(err.to_string().contains("RGB data size"));
}

#[test]
fn test_rgb_uniform_color_survives() {
    let data: Vec<u8> = std::iter::repeat([200u8, 40, 40]).take(768).flatten().collect();
    let encoded = render_rgb(&data, DisplaySize::Small).unwrap();
    let decoded = image::load_from_memory(encoded.bytes()).unwrap().to_rgb8();
    let Rgb(center) = *decoded.get_pixel(160, 120);
    assert_pixel_approx_eq!(center, [200, 40, 40], 8);
}

// ============================================================================
// Generic images
// ============================================================================

#[test]
fn test_convert_bmp_to_jpeg() {
    let encoded = convert_image(&tiny_bmp()).unwrap();
    assert_eq!(&encoded.bytes()[..2], &[0xFF, 0xD8]);
    assert_eq!(decode_dims(encoded.bytes()), (2, 2));
}

#[test]
fn test_convert_garbage_is_decoding_error() {
    let err = convert_image(b"GIF89a but not really").unwrap_err();
    assert!(matches!(err, ThermalError::Decoding(_)));
}

#[test]
fn test_legend_preview() {
    let encoded = render_legend_preview(
        TemperatureRange::new(-40.0, 150.0),
        320,
        &LegendFont::FixedBitmap,
    )
    .unwrap();
    assert_eq!(decode_dims(encoded.bytes()), (320, LEGEND_HEIGHT));
}
