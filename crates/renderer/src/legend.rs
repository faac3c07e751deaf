//! Legend strip with min / midpoint / max temperature labels.
//!
//! The strip is the jet gradient sampled left-to-right across the full image
//! width. Labels are anchored at the left padding, the center and the right
//! padding, then clamped so they always stay inside the strip.

use image::{GenericImage, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use thermal_common::{ThermalError, ThermalResult};

use crate::colormap::sample_gradient;
use crate::font::LegendFont;
use crate::normalize::TemperatureRange;

/// Height of the legend strip in pixels.
pub const LEGEND_HEIGHT: u32 = 40;
/// Horizontal padding for the outer labels.
pub const LEGEND_PADDING: u32 = 10;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
/// Margin of the white box drawn behind each label.
const LABEL_BOX_MARGIN: i32 = 2;

/// Geometry and range of a legend strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendSpec {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub range: TemperatureRange,
}

impl LegendSpec {
    pub fn new(width: u32, range: TemperatureRange) -> Self {
        Self {
            width,
            height: LEGEND_HEIGHT,
            padding: LEGEND_PADDING,
            range,
        }
    }

    /// Label text for min, midpoint and max, in that order.
    pub fn labels(&self) -> [String; 3] {
        [
            format_temperature(self.range.min),
            format_temperature(self.range.midpoint()),
            format_temperature(self.range.max),
        ]
    }
}

/// Format a temperature as `12.3°C`.
pub fn format_temperature(value: f32) -> String {
    format!("{:.1}°C", value)
}

/// Final position of one label inside the strip.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl LabelPlacement {
    /// Rightmost column covered by the label, exclusive.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }
}

/// Clamp a label origin to `[0, strip_width - text_width]`.
///
/// Text wider than the strip is pinned to 0.
pub fn clamp_label_x(anchor: i64, text_width: u32, strip_width: u32) -> i32 {
    let max_x = strip_width.saturating_sub(text_width) as i64;
    anchor.clamp(0, max_x) as i32
}

/// Compute where the three labels go for a given font.
pub fn layout_labels(spec: &LegendSpec, font: &LegendFont) -> [LabelPlacement; 3] {
    let [min_text, mid_text, max_text] = spec.labels();
    let width = spec.width as i64;
    let padding = spec.padding as i64;

    let place = |text: String, anchor: &dyn Fn(i64) -> i64| {
        let (text_width, text_height) = font.text_size(&text);
        let x = clamp_label_x(anchor(text_width as i64), text_width, spec.width);
        let y = (spec.height as i32 - text_height as i32) / 2;
        LabelPlacement {
            text,
            x,
            y,
            width: text_width,
            height: text_height,
        }
    };

    [
        place(min_text, &|_| padding),
        place(mid_text, &|tw| width / 2 - tw / 2),
        place(max_text, &|tw| width - padding - tw),
    ]
}

/// Render the gradient strip with its labels.
pub fn render_legend(spec: &LegendSpec, font: &LegendFont) -> (RgbImage, [LabelPlacement; 3]) {
    let mut strip = RgbImage::from_pixel(spec.width, spec.height, BACKGROUND);

    for (x, color) in sample_gradient(spec.width as usize).into_iter().enumerate() {
        for y in 0..spec.height {
            strip.put_pixel(x as u32, y, color);
        }
    }

    let placements = layout_labels(spec, font);
    for label in &placements {
        draw_label_background(&mut strip, label);
        font.draw(&mut strip, TEXT_COLOR, label.x, label.y, &label.text);
    }

    (strip, placements)
}

/// White box behind a label so it reads against any gradient color.
fn draw_label_background(img: &mut RgbImage, label: &LabelPlacement) {
    if label.width == 0 || label.height == 0 {
        return;
    }
    let rect = Rect::at(label.x - LABEL_BOX_MARGIN, label.y - LABEL_BOX_MARGIN).of_size(
        label.width + 2 * LABEL_BOX_MARGIN as u32,
        label.height + 2 * LABEL_BOX_MARGIN as u32,
    );
    draw_filled_rect_mut(img, rect, BACKGROUND);
}

/// A display raster with its legend stacked underneath.
#[derive(Debug, Clone)]
pub struct ComposedImage {
    image: RgbImage,
    base_height: u32,
    labels: [LabelPlacement; 3],
}

impl ComposedImage {
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn base_height(&self) -> u32 {
        self.base_height
    }

    pub fn legend_height(&self) -> u32 {
        self.image.height() - self.base_height
    }

    pub fn labels(&self) -> &[LabelPlacement; 3] {
        &self.labels
    }
}

/// Stack a legend for `range` beneath `base`.
pub fn compose(
    base: RgbImage,
    range: TemperatureRange,
    font: &LegendFont,
) -> ThermalResult<ComposedImage> {
    let (width, base_height) = base.dimensions();
    let spec = LegendSpec::new(width, range);
    let (strip, labels) = render_legend(&spec, font);

    let mut image = RgbImage::new(width, base_height + strip.height());
    let stack_err = |e: image::ImageError| {
        ThermalError::Encoding(format!("Failed to stack legend: {}", e))
    };
    image.copy_from(&base, 0, 0).map_err(stack_err)?;
    image.copy_from(&strip, 0, base_height).map_err(stack_err)?;

    Ok(ComposedImage {
        image,
        base_height,
        labels,
    })
}
