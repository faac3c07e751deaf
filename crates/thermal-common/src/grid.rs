//! Fixed-size thermal sample grid.

use serde::{Deserialize, Serialize};

use crate::error::{ThermalError, ThermalResult};

/// Sensor columns.
pub const SENSOR_WIDTH: usize = 32;
/// Sensor rows.
pub const SENSOR_HEIGHT: usize = 24;
/// Samples per frame.
pub const SENSOR_PIXELS: usize = SENSOR_WIDTH * SENSOR_HEIGHT;

/// One frame of raw thermal readings, row-major.
///
/// The length is always exactly `SENSOR_PIXELS` and every sample is finite;
/// both are checked on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct SampleGrid {
    samples: Vec<f32>,
}

impl SampleGrid {
    pub fn new(samples: Vec<f32>) -> ThermalResult<Self> {
        if samples.is_empty() {
            return Err(ThermalError::Validation("Sample grid is empty".to_string()));
        }
        if samples.len() != SENSOR_PIXELS {
            return Err(ThermalError::size_mismatch(
                "sample grid",
                SENSOR_PIXELS,
                samples.len(),
            ));
        }
        if let Some(idx) = samples.iter().position(|v| !v.is_finite()) {
            return Err(ThermalError::Validation(format!(
                "Sample {} is not a finite number",
                idx
            )));
        }
        Ok(Self { samples })
    }

    /// Parse a JSON array of numbers.
    pub fn from_json(body: &[u8]) -> ThermalResult<Self> {
        let samples: Vec<f32> = serde_json::from_slice(body)?;
        Self::new(samples)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn width(&self) -> usize {
        SENSOR_WIDTH
    }

    pub fn height(&self) -> usize {
        SENSOR_HEIGHT
    }

    /// Minimum and maximum sample.
    pub fn min_max(&self) -> (f32, f32) {
        self.samples
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

impl TryFrom<Vec<f32>> for SampleGrid {
    type Error = ThermalError;

    fn try_from(samples: Vec<f32>) -> Result<Self, Self::Error> {
        Self::new(samples)
    }
}

impl From<SampleGrid> for Vec<f32> {
    fn from(grid: SampleGrid) -> Self {
        grid.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_size_accepted() {
        let grid = SampleGrid::new(vec![20.0; SENSOR_PIXELS]).unwrap();
        assert_eq!(grid.samples().len(), 768);
    }

    #[test]
    fn test_off_by_one_rejected() {
        for len in [767, 769] {
            let err = SampleGrid::new(vec![20.0; len]).unwrap_err();
            assert!(matches!(err, ThermalError::Validation(_)), "len {}", len);
        }
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            SampleGrid::new(Vec::new()),
            Err(ThermalError::Validation(_))
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut samples = vec![20.0; SENSOR_PIXELS];
        samples[10] = f32::NAN;
        assert!(SampleGrid::new(samples).is_err());
    }

    #[test]
    fn test_min_max() {
        let mut samples = vec![20.0; SENSOR_PIXELS];
        samples[0] = -5.5;
        samples[767] = 42.0;
        let grid = SampleGrid::new(samples).unwrap();
        assert_eq!(grid.min_max(), (-5.5, 42.0));
    }

    #[test]
    fn test_from_json() {
        let body = serde_json::to_vec(&vec![1.5f32; SENSOR_PIXELS]).unwrap();
        let grid = SampleGrid::from_json(&body).unwrap();
        assert_eq!(grid.samples()[0], 1.5);

        assert!(SampleGrid::from_json(b"{\"not\": \"an array\"}").is_err());
        assert!(SampleGrid::from_json(b"[1, 2, 3]").is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let body = serde_json::to_string(&vec![0.0f32; 10]).unwrap();
        assert!(serde_json::from_str::<SampleGrid>(&body).is_err());
    }
}
