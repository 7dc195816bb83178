//! Aspect reconciliation between the live source and the target spec.
//!
//! The resolver never shrinks the source on the held axis. It only extends
//! the other axis, so the corrected frame always contains the full source
//! plus letterbox or pillarbox padding. Downstream cropping removes whatever
//! is configured.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::spec::ResolutionSpec;
use super::types::{ResolvedGeometry, SourceFrame};

/// Default tolerance below which two aspect ratios are considered equal.
pub const ASPECT_TOLERANCE: f64 = 1e-4;

/// Result of reconciling a source against a target spec.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AspectOutcome {
    /// The undistort pass runs with this geometry.
    Corrected(ResolvedGeometry),
    /// Source aspect already matches the target; skip the undistort pass.
    PassThrough,
    /// Source has no pixels on some axis; skip rendering this tick.
    DegenerateSource,
    /// No valid spec is available.
    InvalidSpec,
}

impl AspectOutcome {
    /// Flat geometry record; zeroed and invalid unless corrected.
    pub fn geometry(&self) -> ResolvedGeometry {
        match self {
            AspectOutcome::Corrected(geometry) => *geometry,
            _ => ResolvedGeometry::INVALID,
        }
    }

    pub fn is_corrected(&self) -> bool {
        matches!(self, AspectOutcome::Corrected(_))
    }
}

/// Returns true when the two aspect ratios differ by more than `tolerance`.
#[inline]
pub fn needs_correction(old_aspect: f64, new_aspect: f64, tolerance: f64) -> bool {
    (old_aspect - new_aspect).abs() > tolerance
}

/// Resolve the corrected output geometry for one tick.
///
/// # Arguments
///
/// * `source` - current producer dimensions
/// * `spec` - last valid target spec, if any
/// * `tolerance` - pass-through tolerance, usually [`ASPECT_TOLERANCE`]
///
/// # Behavior
///
/// - Explicit specs are used as-is and never pass through.
/// - Aspect-only specs grow the width when the target is wider than the
///   source, otherwise they grow the height.
/// - `undistort_factor` is target aspect over source aspect.
pub fn resolve(
    source: SourceFrame,
    spec: Option<&ResolutionSpec>,
    tolerance: f64,
) -> AspectOutcome {
    if source.is_degenerate() {
        return AspectOutcome::DegenerateSource;
    }
    let Some(spec) = spec else {
        return AspectOutcome::InvalidSpec;
    };

    let old_aspect = source.aspect();

    if spec.explicit {
        let output_width = spec.width_or_num;
        let output_height = spec.height_or_den;
        let new_aspect = output_width as f64 / output_height as f64;
        return AspectOutcome::Corrected(ResolvedGeometry {
            output_width,
            output_height,
            undistort_factor: (new_aspect / old_aspect) as f32,
            valid: true,
        });
    }

    let new_aspect = spec.aspect();
    if !needs_correction(old_aspect, new_aspect, tolerance) {
        return AspectOutcome::PassThrough;
    }

    let (output_width, output_height) = if new_aspect > old_aspect {
        (round_to_u32(source.height as f64 * new_aspect), source.height)
    } else {
        (source.width, round_to_u32(source.width as f64 / new_aspect))
    };

    debug!(
        source_width = source.width,
        source_height = source.height,
        output_width,
        output_height,
        "aspect corrected to {}",
        spec
    );

    AspectOutcome::Corrected(ResolvedGeometry {
        output_width,
        output_height,
        undistort_factor: (new_aspect / old_aspect) as f32,
        valid: true,
    })
}

fn round_to_u32(value: f64) -> u32 {
    value.round().clamp(0.0, u32::MAX as f64) as u32
}


// ============================================================================
// Property-Based Tests
// ============================================================================
