//! Error types shared by the geometry and preset modules.

use thiserror::Error;

/// Error type for consolecrop operations.
///
/// None of these are fatal to the host. A degenerate source or an aspect that
/// already matches the target are outcomes of [`crate::geometry::resolve`],
/// not errors.
#[derive(Debug, Error)]
pub enum CropError {
    /// The resolution text is neither `WxH` nor `W:H`, or has a zero component.
    #[error("invalid resolution spec: {0:?}")]
    InvalidSpec(String),

    /// Preset names must be non-empty and may not use a reserved token.
    #[error("invalid preset name: {0:?}")]
    InvalidName(String),

    /// No preset is stored under the requested name.
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// The store is configured with a capacity and is full.
    #[error("preset store is full ({0} presets)")]
    CapacityExceeded(usize),

    /// A preset fraction was NaN or infinite.
    #[error("invalid preset fraction: {0}")]
    InvalidFraction(f64),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Underlying IO error from a persistence backend.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
