//! Crop engine error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CropError {
    #[error("Image size must be positive and finite, got {width}x{height}")]
    InvalidImageSize { width: f64, height: f64 },

    #[error("Crop area width must be positive and finite, got {0}")]
    InvalidCropAreaWidth(f64),

    #[error("Scale must be positive and finite, got {0}")]
    InvalidScale(f64),

    #[error("Aspect ratio components must be positive and finite, got {width}:{height}")]
    InvalidAspectRatio { width: f64, height: f64 },

    #[error("Offset must be finite, got ({x}, {y})")]
    InvalidOffset { x: f64, y: f64 },

    #[error("Selection must have finite corners")]
    InvalidSelection,

    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),
}
