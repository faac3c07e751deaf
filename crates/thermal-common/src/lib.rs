//! Common types shared by the thermal rendering crates and services.

pub mod error;
pub mod grid;

pub use error::{ThermalError, ThermalResult};
pub use grid::{SampleGrid, SENSOR_HEIGHT, SENSOR_PIXELS, SENSOR_WIDTH};
