//! Thermal frame rendering.
//!
//! Turns a 32x24 grid of temperature samples into a display image:
//! - Normalization against the frame's own min/max
//! - Jet colormap
//! - Bicubic upscaling to display resolution
//! - Gradient legend with min / mid / max labels
//! - JPEG encoding

pub mod colormap;
pub mod encode;
pub mod font;
pub mod legend;
pub mod normalize;
pub mod pipeline;
pub mod raster;
pub mod resample;

pub use encode::EncodedImage;
pub use font::{FontSource, LegendFont};
pub use normalize::TemperatureRange;
pub use pipeline::RenderedFrame;
pub use raster::DisplaySize;
