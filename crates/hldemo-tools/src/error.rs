//! Error types for the demo tools.

use hldemo_formats::DemoError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A size limit of zero would strip every sample or buffer
    #[error("Invalid {name}: must be at least 1, got {value}")]
    InvalidLimit {
        /// Option name
        name: &'static str,
        /// Rejected value
        value: usize,
    },

    /// Yaw must be a finite angle
    #[error("Invalid yaw {0}: must be a finite angle in degrees")]
    InvalidYaw(f32),

    /// Output would overwrite the input demo
    #[error("Output path {} is the input demo", .0.display())]
    OutputIsInput(PathBuf),
}

/// Tool runtime errors.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Reading, decoding or saving the demo failed
    #[error(transparent)]
    Demo(#[from] DemoError),

    /// Writing a report failed
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a JSON report failed
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// No output name can be derived from the input path
    #[error("Cannot derive an output file name from {}", .0.display())]
    NoFileName(PathBuf),
}

/// Result type for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::InvalidLimit {
            name: "max-sample-len",
            value: 0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid max-sample-len: must be at least 1, got 0"
        );

        let err = ConfigError::InvalidYaw(f32::NAN);
        assert!(err.to_string().contains("NaN"));
    }

    #[test]
    fn test_demo_error_is_transparent() {
        let demo = DemoError::UnsupportedProtocol {
            found: 3,
            supported: 5,
        };
        let message = demo.to_string();
        let err = ToolError::from(demo);
        assert_eq!(err.to_string(), message);
    }
}
