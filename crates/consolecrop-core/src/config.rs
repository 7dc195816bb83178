//! Filter configuration.
//!
//! Hosts hand this over once at filter creation, usually as a JS object or a
//! serialized settings blob. Every field has a default, so `{}` is a valid
//! configuration.

use serde::{Deserialize, Serialize};

use crate::error::CropError;
use crate::geometry::{ResolutionSpec, ASPECT_TOLERANCE};
use crate::settings::SamplingMode;

/// Which of the two filter variants is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterMode {
    /// Crop margins against the raw source dimensions.
    CropOnly,
    /// Reconcile the source against a target spec, then crop.
    #[default]
    AspectCorrected,
}

/// Configuration for a crop filter instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropConfig {
    /// Filter variant.
    pub mode: FilterMode,
    /// Aspect difference at or below which correction is skipped.
    pub aspect_tolerance: f64,
    /// Maximum number of stored presets; unbounded when absent.
    pub preset_capacity: Option<usize>,
    /// Resolution spec used until the host supplies one.
    pub default_resolution: String,
    /// Initial sampler selection.
    pub sampling: SamplingMode,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            mode: FilterMode::default(),
            aspect_tolerance: ASPECT_TOLERANCE,
            preset_capacity: None,
            default_resolution: "4:3".to_string(),
            sampling: SamplingMode::default(),
        }
    }
}

impl CropConfig {
    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for a non-positive or non-finite tolerance, and
    /// `InvalidSpec` for an unparsable default resolution.
    pub fn validate(&self) -> Result<(), CropError> {
        if !self.aspect_tolerance.is_finite() || self.aspect_tolerance <= 0.0 {
            return Err(CropError::InvalidConfig(format!(
                "aspect tolerance must be positive, got {}",
                self.aspect_tolerance
            )));
        }
        ResolutionSpec::parse(&self.default_resolution)?;
        Ok(())
    }

    /// Parsed default resolution, if valid.
    pub fn default_spec(&self) -> Option<ResolutionSpec> {
        ResolutionSpec::parse(&self.default_resolution).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CropConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mode, FilterMode::AspectCorrected);
        assert_eq!(config.aspect_tolerance, ASPECT_TOLERANCE);
        assert_eq!(config.preset_capacity, None);
        assert_eq!(config.default_spec(), ResolutionSpec::aspect_only(4, 3));
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        for tolerance in [0.0, -1e-4, f64::NAN, f64::INFINITY] {
            let config = CropConfig {
                aspect_tolerance: tolerance,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(CropError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_rejects_bad_default_resolution() {
        let mut config = CropConfig::default();
        config.default_resolution = "widescreen".to_string();
        assert!(matches!(config.validate(), Err(CropError::InvalidSpec(_))));
        assert!(config.default_spec().is_none());
    }
}
