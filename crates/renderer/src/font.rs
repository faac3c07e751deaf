//! Font resolution for legend labels.
//!
//! A TrueType font is loaded once at startup. When the file is missing or
//! unreadable the legend falls back to a built-in 5x7 bitmap font, so label
//! rendering never fails a request.

use std::path::PathBuf;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{point, Font, Scale};

/// Pixel height used for TrueType labels.
pub const LABEL_FONT_SIZE: f32 = 16.0;

/// Bitmap glyphs are drawn at this integer scale.
const BITMAP_SCALE: u32 = 2;
const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;
/// Horizontal advance per character, in unscaled pixels (5 + 1 spacing).
const CHAR_ADVANCE: u32 = 6;

/// Where legend text should come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Scalable(PathBuf),
    FixedBitmap,
}

impl FontSource {
    /// `Scalable` when a path is configured, otherwise `FixedBitmap`.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => FontSource::Scalable(p),
            None => FontSource::FixedBitmap,
        }
    }
}

/// A resolved, ready-to-draw font.
#[derive(Clone)]
pub enum LegendFont {
    Scalable { font: Font<'static>, scale: Scale },
    FixedBitmap,
}

impl std::fmt::Debug for LegendFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LegendFont::Scalable { scale, .. } => f
                .debug_struct("Scalable")
                .field("size", &scale.y)
                .finish(),
            LegendFont::FixedBitmap => f.write_str("FixedBitmap"),
        }
    }
}

impl LegendFont {
    /// Resolve a font source. Never fails: any problem with a scalable font
    /// is logged and the bitmap font is used instead.
    pub fn resolve(source: &FontSource) -> Self {
        match source {
            FontSource::FixedBitmap => LegendFont::FixedBitmap,
            FontSource::Scalable(path) => match std::fs::read(path) {
                Ok(data) => match Self::from_bytes(data) {
                    Some(font) => {
                        tracing::info!(path = %path.display(), "Loaded legend font");
                        font
                    }
                    None => {
                        tracing::warn!(
                            path = %path.display(),
                            "Legend font is not a valid TrueType file, using bitmap font"
                        );
                        LegendFont::FixedBitmap
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read legend font, using bitmap font"
                    );
                    LegendFont::FixedBitmap
                }
            },
        }
    }

    /// Parse TrueType data.
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(data).map(|font| LegendFont::Scalable {
            font,
            scale: Scale::uniform(LABEL_FONT_SIZE),
        })
    }

    pub fn is_scalable(&self) -> bool {
        matches!(self, LegendFont::Scalable { .. })
    }

    /// Rendered extent of `text` as (width, height) in pixels.
    pub fn text_size(&self, text: &str) -> (u32, u32) {
        match self {
            LegendFont::Scalable { font, scale } => {
                let v_metrics = font.v_metrics(*scale);
                let height = (v_metrics.ascent - v_metrics.descent).ceil().max(0.0) as u32;
                let (min_x, max_x) = ink_extent(font, *scale, text);
                ((max_x - min_x).max(0) as u32, height)
            }
            LegendFont::FixedBitmap => {
                let chars = text.chars().count() as u32;
                if chars == 0 {
                    return (0, GLYPH_H * BITMAP_SCALE);
                }
                // No trailing spacing after the last glyph
                let width = (chars * CHAR_ADVANCE - (CHAR_ADVANCE - GLYPH_W)) * BITMAP_SCALE;
                (width, GLYPH_H * BITMAP_SCALE)
            }
        }
    }

    /// Draw `text` with its top-left corner at (x, y). Pixels outside the
    /// image are skipped.
    pub fn draw(&self, img: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        match self {
            LegendFont::Scalable { font, scale } => {
                // Shift right by any left overhang so ink starts at x
                let (min_x, _) = ink_extent(font, *scale, text);
                draw_text_mut(img, color, x - min_x, y, *scale, font, text);
            }
            LegendFont::FixedBitmap => {
                let advance = (CHAR_ADVANCE * BITMAP_SCALE) as i32;
                for (i, ch) in text.chars().enumerate() {
                    if let Some(glyph) = bitmap_glyph(ch) {
                        draw_glyph(img, &glyph, x + i as i32 * advance, y, color);
                    }
                }
            }
        }
    }
}

/// Horizontal ink extent of laid-out text relative to the pen origin.
/// `min_x` is never positive, so a glyph overhanging left of the origin
/// widens the extent instead of being clipped.
fn ink_extent(font: &Font<'static>, scale: Scale, text: &str) -> (i32, i32) {
    let ascent = font.v_metrics(scale).ascent;
    font.layout(text, scale, point(0.0, ascent))
        .filter_map(|g| g.pixel_bounding_box())
        .fold((0, 0), |(min_x, max_x), bb| {
            (min_x.min(bb.min.x), max_x.max(bb.max.x))
        })
}

fn draw_glyph(img: &mut RgbImage, glyph: &[u8; 7], x: i32, y: i32, color: Rgb<u8>) {
    let (width, height) = (img.width() as i32, img.height() as i32);
    for (row, &bits) in glyph.iter().enumerate() {
        for col in 0..GLYPH_W {
            if bits & (0x10 >> col) == 0 {
                continue;
            }
            for dy in 0..BITMAP_SCALE as i32 {
                for dx in 0..BITMAP_SCALE as i32 {
                    let px = x + (col * BITMAP_SCALE) as i32 + dx;
                    let py = y + row as i32 * BITMAP_SCALE as i32 + dy;
                    if px >= 0 && py >= 0 && px < width && py < height {
                        img.put_pixel(px as u32, py as u32, color);
                    }
                }
            }
        }
    }
}

/// 5x7 glyphs, one byte per row, lower 5 bits are pixels (MSB = left).
/// Only the characters that appear in temperature labels are covered;
/// anything else is drawn as a blank cell.
#[rustfmt::skip]
fn bitmap_glyph(ch: char) -> Option<[u8; 7]> {
    let glyph = match ch {
        ' ' => [0x00,0x00,0x00,0x00,0x00,0x00,0x00],
        '+' => [0x00,0x04,0x04,0x1F,0x04,0x04,0x00],
        '-' => [0x00,0x00,0x00,0x1F,0x00,0x00,0x00],
        '.' => [0x00,0x00,0x00,0x00,0x00,0x00,0x04],
        '0' => [0x0E,0x11,0x13,0x15,0x19,0x11,0x0E],
        '1' => [0x04,0x0C,0x04,0x04,0x04,0x04,0x0E],
        '2' => [0x0E,0x11,0x01,0x02,0x04,0x08,0x1F],
        '3' => [0x1F,0x02,0x04,0x02,0x01,0x11,0x0E],
        '4' => [0x02,0x06,0x0A,0x12,0x1F,0x02,0x02],
        '5' => [0x1F,0x10,0x1E,0x01,0x01,0x11,0x0E],
        '6' => [0x06,0x08,0x10,0x1E,0x11,0x11,0x0E],
        '7' => [0x1F,0x01,0x02,0x04,0x08,0x08,0x08],
        '8' => [0x0E,0x11,0x11,0x0E,0x11,0x11,0x0E],
        '9' => [0x0E,0x11,0x11,0x0F,0x01,0x02,0x0C],
        'C' => [0x0E,0x11,0x10,0x10,0x10,0x11,0x0E],
        '\u{b0}' => [0x0C,0x12,0x12,0x0C,0x00,0x00,0x00],
        _ => return None,
    };
    Some(glyph)
}
