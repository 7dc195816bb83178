//! Frame geometry: resolution specs, aspect reconciliation and cropping.
//!
//! # Pipeline
//!
//! Every render tick runs, from scratch:
//! 1. [`resolve`] the live [`SourceFrame`] against the current
//!    [`ResolutionSpec`] into an [`AspectOutcome`]
//! 2. [`compute_crop`] the configured [`CropMargins`] against the resolved
//!    (or source) dimensions
//!
//! No state carries across ticks, so both steps are pure functions.

mod aspect;
mod crop;
mod spec;
mod types;

pub use aspect::{needs_correction, resolve, AspectOutcome, ASPECT_TOLERANCE};
pub use crop::compute_crop;
pub use spec::ResolutionSpec;
pub use types::{
    CropMargins, CropTransformResult, ResolvedGeometry, SliderRange, SourceFrame, Vec2,
};
