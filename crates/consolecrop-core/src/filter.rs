//! Per-tick filter state.
//!
//! [`CropFilter`] holds what the settings layer last handed over and turns
//! the live source size into the values the render stage consumes. It is
//! driven from the render thread only.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{CropConfig, FilterMode};
use crate::error::CropError;
use crate::geometry::{
    compute_crop, resolve, AspectOutcome, CropMargins, CropTransformResult, ResolutionSpec,
    ResolvedGeometry, SourceFrame, Vec2,
};
use crate::settings::{FilterSettings, SamplingMode};

/// Why nothing is rendered this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The producer has no pixels on some axis.
    DegenerateSource,
    /// The last resolution text was invalid, or none was ever supplied.
    InvalidSpec,
}

/// Parameters of the undistort pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UndistortParams {
    /// Target aspect over source aspect.
    pub factor: f32,
    pub output_width: u32,
    pub output_height: u32,
    /// `1 / source size`, one texel in normalized source coordinates.
    pub inv_source_size: Vec2,
}

/// Everything the render stage needs for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameParams {
    pub crop: CropTransformResult,
    pub sampling: SamplingMode,
    /// Present only when the aspect was corrected this tick.
    pub undistort: Option<UndistortParams>,
}

impl FrameParams {
    /// Render target width.
    pub fn width(&self) -> u32 {
        self.crop.crop_width
    }

    /// Render target height.
    pub fn height(&self) -> u32 {
        self.crop.crop_height
    }
}

/// Outcome of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FramePlan {
    Render(FrameParams),
    Skip(SkipReason),
}

impl FramePlan {
    pub fn params(&self) -> Option<&FrameParams> {
        match self {
            FramePlan::Render(params) => Some(params),
            FramePlan::Skip(_) => None,
        }
    }
}

/// A crop filter instance.
#[derive(Debug, Clone)]
pub struct CropFilter {
    mode: FilterMode,
    tolerance: f64,
    spec: Option<ResolutionSpec>,
    blocked: bool,
    margins: CropMargins,
    sampling: SamplingMode,
    last_outcome: Option<AspectOutcome>,
    last_geometry: Option<ResolvedGeometry>,
}

impl CropFilter {
    /// Create a filter from configuration.
    ///
    /// An unparsable default resolution leaves the filter without a spec;
    /// run [`CropConfig::validate`] first to catch that.
    pub fn new(config: &CropConfig) -> Self {
        Self {
            mode: config.mode,
            tolerance: config.aspect_tolerance,
            spec: config.default_spec(),
            blocked: false,
            margins: CropMargins::default(),
            sampling: config.sampling,
            last_outcome: None,
            last_geometry: None,
        }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Last valid spec. Survives invalid updates.
    pub fn spec(&self) -> Option<&ResolutionSpec> {
        self.spec.as_ref()
    }

    pub fn margins(&self) -> CropMargins {
        self.margins
    }

    /// Whether the last resolution update was rejected.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Outcome of the last tick that resolved a geometry.
    pub fn last_outcome(&self) -> Option<AspectOutcome> {
        self.last_outcome
    }

    /// Last corrected geometry. Pass-through and skipped ticks leave it alone.
    pub fn last_geometry(&self) -> Option<ResolvedGeometry> {
        self.last_geometry
    }

    /// Replace the resolution spec.
    ///
    /// # Errors
    ///
    /// `InvalidSpec` if `text` does not parse. The previous spec and geometry
    /// are kept and rendering is blocked until a valid spec arrives.
    pub fn set_resolution(&mut self, text: &str) -> Result<ResolutionSpec, CropError> {
        match ResolutionSpec::parse(text) {
            Ok(spec) => {
                if self.blocked || self.spec != Some(spec) {
                    debug!(resolution = %spec, "resolution spec set");
                }
                self.spec = Some(spec);
                self.blocked = false;
                Ok(spec)
            }
            Err(err) => {
                warn!(text, "invalid resolution spec, rendering blocked");
                self.blocked = true;
                Err(err)
            }
        }
    }

    pub fn set_margins(&mut self, margins: CropMargins) {
        self.margins = margins;
    }

    pub fn set_sampling(&mut self, sampling: SamplingMode) {
        self.sampling = sampling;
    }

    /// Take over a settings snapshot.
    ///
    /// Margins and sampling always apply; the resolution is checked only in
    /// aspect-corrected mode.
    pub fn apply_settings(&mut self, settings: &FilterSettings) -> Result<(), CropError> {
        self.set_margins(settings.margins);
        self.set_sampling(settings.sampling);
        if self.mode == FilterMode::AspectCorrected {
            self.set_resolution(&settings.resolution)?;
        }
        Ok(())
    }

    /// Compute this tick's render parameters from scratch.
    pub fn tick(&mut self, source: SourceFrame) -> FramePlan {
        if source.is_degenerate() {
            return FramePlan::Skip(SkipReason::DegenerateSource);
        }

        if self.mode == FilterMode::CropOnly {
            return FramePlan::Render(self.params((source.width, source.height), None));
        }

        if self.blocked {
            return FramePlan::Skip(SkipReason::InvalidSpec);
        }

        let outcome = resolve(source, self.spec.as_ref(), self.tolerance);
        match outcome {
            AspectOutcome::DegenerateSource => FramePlan::Skip(SkipReason::DegenerateSource),
            AspectOutcome::InvalidSpec => FramePlan::Skip(SkipReason::InvalidSpec),
            AspectOutcome::PassThrough => {
                self.record(outcome);
                FramePlan::Render(self.params((source.width, source.height), None))
            }
            AspectOutcome::Corrected(geometry) => {
                self.record(outcome);
                self.last_geometry = Some(geometry);
                let undistort = UndistortParams {
                    factor: geometry.undistort_factor,
                    output_width: geometry.output_width,
                    output_height: geometry.output_height,
                    inv_source_size: Vec2::new(
                        1.0 / source.width as f32,
                        1.0 / source.height as f32,
                    ),
                };
                FramePlan::Render(self.params(geometry.dimensions(), Some(undistort)))
            }
        }
    }

    fn record(&mut self, outcome: AspectOutcome) {
        if self.last_outcome != Some(outcome) {
            debug!(?outcome, "aspect outcome changed");
        }
        self.last_outcome = Some(outcome);
    }

    fn params(&self, output: (u32, u32), undistort: Option<UndistortParams>) -> FrameParams {
        FrameParams {
            crop: compute_crop(output, &self.margins),
            sampling: self.sampling,
            undistort,
        }
    }
}
