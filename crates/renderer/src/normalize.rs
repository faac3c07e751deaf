//! Normalization of raw thermal samples into [0, 1].

use thermal_common::{SampleGrid, SENSOR_HEIGHT, SENSOR_WIDTH};

/// Observed temperature range of a frame, kept for legend labeling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    pub min: f32,
    pub max: f32,
}

impl TemperatureRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Halves are summed so two large same-sign values cannot overflow.
    pub fn midpoint(&self) -> f32 {
        self.min / 2.0 + self.max / 2.0
    }

    /// Width used for scaling, in `f64` so the difference of two finite
    /// `f32` values is always finite. A degenerate range scales by 1 so every
    /// sample lands on 0.0 instead of producing NaN.
    pub fn span(&self) -> f64 {
        let span = self.max as f64 - self.min as f64;
        if span == 0.0 {
            1.0
        } else {
            span
        }
    }

    pub fn normalize(&self, value: f32) -> f32 {
        ((value as f64 - self.min as f64) / self.span()).clamp(0.0, 1.0) as f32
    }
}

/// A frame mapped into [0, 1], same shape as the source grid.
#[derive(Debug, Clone)]
pub struct NormalizedGrid {
    values: Vec<f32>,
    range: TemperatureRange,
}

impl NormalizedGrid {
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn range(&self) -> TemperatureRange {
        self.range
    }

    pub fn width(&self) -> usize {
        SENSOR_WIDTH
    }

    pub fn height(&self) -> usize {
        SENSOR_HEIGHT
    }
}

/// Normalize a sample grid against its own min/max.
pub fn normalize(grid: &SampleGrid) -> NormalizedGrid {
    let (min, max) = grid.min_max();
    let range = TemperatureRange::new(min, max);

    let values = grid.samples().iter().map(|&v| range.normalize(v)).collect();

    NormalizedGrid { values, range }
}
