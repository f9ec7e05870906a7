//! Engine tuning knobs.
//!
//! Everything the host configures per widget arrives through
//! [`crate::messages::Flags`]; this holds the values that stay fixed for an
//! embedding.

/// Configuration for the crop engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropConfig {
    /// Side of each handle's square hit box, in viewport pixels.
    /// Converted to image pixels at the scale current when the pointer goes down.
    pub handle_hit_size: f64,
    /// A committed selection whose width or height is at or below this many
    /// image pixels is treated as cleared. 0 clears only zero-extent selections.
    pub min_selection_size: f64,
    /// Relative tolerance when checking whether a rectangle already matches a ratio.
    pub aspect_epsilon: f64,
}

/// Canonical defaults.
pub static DEFAULT_CONFIG: CropConfig = CropConfig {
    handle_hit_size: 12.0,
    min_selection_size: 0.0,
    aspect_epsilon: 1e-6,
};

impl Default for CropConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}
