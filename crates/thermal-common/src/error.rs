//! Error types for thermal rendering services.

use thiserror::Error;

/// Result type alias using ThermalError.
pub type ThermalResult<T> = Result<T, ThermalError>;

/// Primary error type for thermal frame operations.
#[derive(Debug, Error)]
pub enum ThermalError {
    // === Input Errors ===
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Could not decode image: {0}")]
    Decoding(String),

    // === Output Errors ===
    #[error("Could not encode image: {0}")]
    Encoding(String),

    #[error("Upstream push failed: {0}")]
    Upstream(String),

    // === Storage Errors ===
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ThermalError {
    /// Shorthand for a size mismatch between expected and actual input length.
    pub fn size_mismatch(what: &str, expected: usize, actual: usize) -> Self {
        ThermalError::Validation(format!(
            "Invalid {} size: expected {}, got {}",
            what, expected, actual
        ))
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ThermalError::Validation(_) | ThermalError::Decoding(_) => 400,
            ThermalError::NotFound(_) => 404,
            ThermalError::Upstream(_) => 502,
            _ => 500,
        }
    }

    /// Whether the failure was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status_code())
    }
}

impl From<std::io::Error> for ThermalError {
    fn from(err: std::io::Error) -> Self {
        ThermalError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ThermalError {
    fn from(err: serde_json::Error) -> Self {
        ThermalError::Validation(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ThermalError::Validation("x".into()).http_status_code(), 400);
        assert_eq!(ThermalError::Decoding("x".into()).http_status_code(), 400);
        assert_eq!(ThermalError::NotFound("x".into()).http_status_code(), 404);
        assert_eq!(ThermalError::Upstream("x".into()).http_status_code(), 502);
        assert_eq!(ThermalError::Encoding("x".into()).http_status_code(), 500);
    }

    #[test]
    fn test_size_mismatch_message() {
        let err = ThermalError::size_mismatch("RGB data", 2304, 2303);
        assert!(err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Validation failed: Invalid RGB data size: expected 2304, got 2303"
        );
    }

    #[test]
    fn test_json_error_is_validation() {
        let err: ThermalError = serde_json::from_str::<Vec<f32>>("[1, \"a\"]")
            .unwrap_err()
            .into();
        assert!(matches!(err, ThermalError::Validation(_)));
    }
}
