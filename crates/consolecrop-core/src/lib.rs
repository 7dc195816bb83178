//! Consolecrop Core - crop geometry for console capture filters
//!
//! This crate computes, per video frame, the crop-and-scale transform that
//! trims fixed pixel margins from a capture source while compensating for a
//! mismatch between the source aspect and a declared target resolution. It
//! also keeps the registry of named, resolution-independent crop presets.
//!
//! # Modules
//!
//! - `geometry` - resolution specs, aspect reconciliation, crop transform
//! - `preset` - preset store, text format and persistence backends
//! - `settings` - host settings snapshot with pure transitions
//! - `filter` - per-tick filter state producing render parameters
//! - `config` - filter configuration
//!
//! Logging goes through `tracing`; the host installs the subscriber.

pub mod config;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod preset;
pub mod settings;

pub use config::{CropConfig, FilterMode};
pub use error::CropError;
pub use filter::{CropFilter, FrameParams, FramePlan, SkipReason, UndistortParams};
pub use geometry::{
    compute_crop, resolve, AspectOutcome, CropMargins, CropTransformResult, ResolutionSpec,
    ResolvedGeometry, SliderRange, SourceFrame, Vec2,
};
pub use preset::{Preset, PresetStore, SharedPresetStore};
pub use settings::{AspectChoice, FilterSettings, PresetSelection, SamplingMode};
