//! Host settings snapshot and its transitions.
//!
//! The host's property panel owns a [`FilterSettings`] value. Every user
//! action maps to one pure transition returning the next snapshot, which the
//! host swaps in atomically and hands to [`crate::CropFilter::apply_settings`].
//! Invalid input returns an error and the host keeps the old snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{CropConfig, FilterMode};
use crate::error::CropError;
use crate::geometry::{
    resolve, AspectOutcome, CropMargins, ResolutionSpec, SliderRange, SourceFrame,
};
use crate::preset::{PresetStore, CUSTOM_TOKEN, NONE_TOKEN};

/// Target aspect presets offered by the resolution list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectChoice {
    /// PCs and HD consoles, 16:9.
    Widescreen,
    /// SD consoles, 4:3.
    Standard,
    /// Leave the current resolution text alone.
    Override,
}

impl AspectChoice {
    pub const ALL: [AspectChoice; 3] = [
        AspectChoice::Widescreen,
        AspectChoice::Standard,
        AspectChoice::Override,
    ];

    /// Text shown in the resolution list.
    pub fn label(self) -> &'static str {
        match self {
            AspectChoice::Widescreen => "PC or HD Consoles [16:9]",
            AspectChoice::Standard => "SD Consoles [4:3]",
            AspectChoice::Override => "override [Do not use!]",
        }
    }

    /// Resolution text this choice selects; `None` keeps the current one.
    pub fn spec_text(self) -> Option<&'static str> {
        match self {
            AspectChoice::Widescreen => Some("16:9"),
            AspectChoice::Standard => Some("4:3"),
            AspectChoice::Override => None,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|choice| choice.label() == label)
    }
}

impl fmt::Display for AspectChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entry of the cropping preset list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PresetSelection {
    /// No cropping.
    #[default]
    None,
    /// Hand-edited margins not matching a stored preset.
    Custom,
    /// A stored preset.
    Named(String),
}

impl PresetSelection {
    pub fn from_label(label: &str) -> Self {
        match label {
            NONE_TOKEN => PresetSelection::None,
            CUSTOM_TOKEN => PresetSelection::Custom,
            name => PresetSelection::Named(name.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PresetSelection::None => NONE_TOKEN,
            PresetSelection::Custom => CUSTOM_TOKEN,
            PresetSelection::Named(name) => name,
        }
    }
}

impl fmt::Display for PresetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sampler used by the render stage. Selects a resource, nothing is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SamplingMode {
    #[default]
    Default,
    NearestNeighbor,
}

/// Immutable snapshot of a filter's user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    pub mode: FilterMode,
    pub aspect_tolerance: f64,
    /// Resolution spec text as typed or selected.
    pub resolution: String,
    pub margins: CropMargins,
    pub selection: PresetSelection,
    /// Name typed into the "new preset" field.
    pub new_preset_name: String,
    pub sampling: SamplingMode,
    /// Slider bounds for the margins.
    pub range: SliderRange,
}

impl FilterSettings {
    pub fn new(config: &CropConfig) -> Self {
        Self {
            mode: config.mode,
            aspect_tolerance: config.aspect_tolerance,
            resolution: config.default_resolution.clone(),
            margins: CropMargins::default(),
            selection: PresetSelection::None,
            new_preset_name: String::new(),
            sampling: config.sampling,
            range: SliderRange::default(),
        }
    }

    /// The parsed resolution, if the current text is valid.
    pub fn spec(&self) -> Option<ResolutionSpec> {
        ResolutionSpec::parse(&self.resolution).ok()
    }

    /// Slider range for `source` under `spec`.
    ///
    /// Corrected sources range over the resolved output; pass-through,
    /// crop-only and specless filters range over the source itself.
    fn range_for(&self, source: SourceFrame, spec: Option<&ResolutionSpec>) -> SliderRange {
        if self.mode == FilterMode::CropOnly {
            return source.into();
        }
        match resolve(source, spec, self.aspect_tolerance) {
            AspectOutcome::Corrected(geometry) => {
                SliderRange::new(geometry.output_width, geometry.output_height)
            }
            _ => source.into(),
        }
    }

    /// Refresh the slider range for a resized source.
    ///
    /// Pixel margins are kept, clamped into the new range.
    pub fn with_source(&self, source: SourceFrame) -> Self {
        let range = self.range_for(source, self.spec().as_ref());
        Self {
            margins: clamp_known(range, &self.margins),
            range,
            ..self.clone()
        }
    }

    /// Switch to a new resolution spec.
    ///
    /// Margins are rescaled from the old slider range into the new one, so a
    /// crop keeps covering the same share of the frame.
    ///
    /// # Errors
    ///
    /// `InvalidSpec` if `text` does not parse; keep the old snapshot.
    pub fn with_resolution(&self, text: &str, source: SourceFrame) -> Result<Self, CropError> {
        let spec = ResolutionSpec::parse(text)?;
        let range = self.range_for(source, Some(&spec));
        let margins = rescale(&self.margins, self.range, range);
        debug!(resolution = %spec, ?range, "resolution changed");
        Ok(Self {
            resolution: spec.to_string(),
            margins,
            range,
            ..self.clone()
        })
    }

    /// Apply an entry of the aspect list. `Override` changes nothing.
    pub fn with_aspect_choice(
        &self,
        choice: AspectChoice,
        source: SourceFrame,
    ) -> Result<Self, CropError> {
        match choice.spec_text() {
            Some(text) => self.with_resolution(text, source),
            None => Ok(self.clone()),
        }
    }

    /// Hand-edited margins. Selects `None` when all zero, `Custom` otherwise.
    pub fn with_margins(&self, margins: CropMargins) -> Self {
        let margins = clamp_known(self.range, &margins);
        let selection = if margins.is_zero() {
            PresetSelection::None
        } else {
            PresetSelection::Custom
        };
        Self {
            margins,
            selection,
            ..self.clone()
        }
    }

    /// Pick an entry of the preset list.
    ///
    /// # Errors
    ///
    /// `PresetNotFound` if a named preset is not in `store`.
    pub fn with_selection(
        &self,
        selection: PresetSelection,
        store: &PresetStore,
    ) -> Result<Self, CropError> {
        let margins = match &selection {
            PresetSelection::None => CropMargins::default(),
            PresetSelection::Custom => self.margins,
            PresetSelection::Named(name) => store.apply(name, self.range)?,
        };
        Ok(Self {
            margins,
            selection,
            ..self.clone()
        })
    }

    pub fn with_new_preset_name(&self, name: impl Into<String>) -> Self {
        Self {
            new_preset_name: name.into(),
            ..self.clone()
        }
    }

    pub fn with_sampling(&self, sampling: SamplingMode) -> Self {
        Self {
            sampling,
            ..self.clone()
        }
    }

    /// Store the current margins under `new_preset_name`.
    ///
    /// The result selects the saved preset and clears the name field.
    ///
    /// # Errors
    ///
    /// Whatever [`PresetStore::upsert_margins`] rejects; `store` is then
    /// unchanged.
    pub fn save_new_preset(&self, store: &mut PresetStore) -> Result<Self, CropError> {
        let preset = store.upsert_margins(&self.new_preset_name, &self.margins, self.range)?;
        Ok(Self {
            selection: PresetSelection::Named(preset.name.clone()),
            new_preset_name: String::new(),
            ..self.clone()
        })
    }

    /// Preset list entries: `Custom`, `None`, then stored presets in order.
    pub fn selection_choices(store: &PresetStore) -> Vec<PresetSelection> {
        [PresetSelection::Custom, PresetSelection::None]
            .into_iter()
            .chain(store.iter().map(|p| PresetSelection::Named(p.name.clone())))
            .collect()
    }
}

/// Clamp margins on the axes whose range is known.
fn clamp_known(range: SliderRange, margins: &CropMargins) -> CropMargins {
    let clamp = |value: u32, max: u32| if max == 0 { value } else { value.min(max) };
    CropMargins {
        left: clamp(margins.left, range.max_width),
        right: clamp(margins.right, range.max_width),
        top: clamp(margins.top, range.max_height),
        bottom: clamp(margins.bottom, range.max_height),
    }
}

/// Proportionally map margins from one slider range into another.
fn rescale(margins: &CropMargins, from: SliderRange, to: SliderRange) -> CropMargins {
    let map = |value: u32, old: u32, new: u32| {
        if old == 0 || new == 0 {
            value
        } else {
            (value as f64 * new as f64 / old as f64).round() as u32
        }
    };
    let mapped = CropMargins {
        left: map(margins.left, from.max_width, to.max_width),
        right: map(margins.right, from.max_width, to.max_width),
        top: map(margins.top, from.max_height, to.max_height),
        bottom: map(margins.bottom, from.max_height, to.max_height),
    };
    clamp_known(to, &mapped)
}
