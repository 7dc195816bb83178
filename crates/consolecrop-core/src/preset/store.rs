//! In-memory preset registry.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CropError;
use crate::geometry::{CropMargins, SliderRange};

/// Selection token that clears every margin. Never storable.
pub const NONE_TOKEN: &str = "None";

/// Selection token for hand-edited margins. Never storable.
pub const CUSTOM_TOKEN: &str = "Custom";

/// A named crop preset.
///
/// Margins are fractions of the slider range at save time, so a preset made
/// on a 640x480 source trims the same share of a 1280x960 source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub left_frac: f64,
    pub right_frac: f64,
    pub top_frac: f64,
    pub bottom_frac: f64,
}

impl Preset {
    /// Scale the fractions back into pixels for `range`.
    pub fn margins_for(&self, range: SliderRange) -> CropMargins {
        let w = range.max_width as f64;
        let h = range.max_height as f64;
        CropMargins {
            left: scale(self.left_frac, w),
            right: scale(self.right_frac, w),
            top: scale(self.top_frac, h),
            bottom: scale(self.bottom_frac, h),
        }
    }
}

fn scale(frac: f64, max: f64) -> u32 {
    (frac * max).round().clamp(0.0, u32::MAX as f64) as u32
}

fn to_fraction(value: u32, max: u32) -> f64 {
    if max == 0 {
        0.0
    } else {
        (value as f64 / max as f64).min(1.0)
    }
}

/// Check a preset name against the storage rules.
pub fn validate_name(name: &str) -> Result<(), CropError> {
    let reserved = name == NONE_TOKEN || name == CUSTOM_TOKEN;
    // A line break would split the record in the persisted file
    let multiline = name.contains(['\n', '\r']);
    if name.is_empty() || reserved || multiline {
        return Err(CropError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn check_fraction(value: f64) -> Result<f64, CropError> {
    if value.is_finite() {
        Ok(value.clamp(0.0, 1.0))
    } else {
        Err(CropError::InvalidFraction(value))
    }
}

/// Ordered collection of presets; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetStore {
    presets: Vec<Preset>,
    capacity: Option<usize>,
}

impl PresetStore {
    /// Create an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store holding at most `capacity` presets.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            presets: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Whether another new name can be appended.
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.presets.len() >= cap)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    /// Preset names in store order.
    pub fn names(&self) -> Vec<String> {
        self.presets.iter().map(|p| p.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.presets.iter().position(|p| p.name == name)
    }

    /// Insert or overwrite a preset.
    ///
    /// An existing name keeps its index so display order is stable. Fractions
    /// are clamped into `[0, 1]`.
    ///
    /// # Errors
    ///
    /// - `InvalidName` for empty or reserved names
    /// - `InvalidFraction` for NaN or infinite values
    /// - `CapacityExceeded` when appending to a full store
    ///
    /// The store is unchanged on error.
    pub fn upsert(
        &mut self,
        name: &str,
        left_frac: f64,
        right_frac: f64,
        top_frac: f64,
        bottom_frac: f64,
    ) -> Result<&Preset, CropError> {
        validate_name(name)?;
        let preset = Preset {
            name: name.to_string(),
            left_frac: check_fraction(left_frac)?,
            right_frac: check_fraction(right_frac)?,
            top_frac: check_fraction(top_frac)?,
            bottom_frac: check_fraction(bottom_frac)?,
        };

        let index = match self.position(name) {
            Some(index) => {
                debug!(name, index, "overwriting preset");
                self.presets[index] = preset;
                index
            }
            None => {
                if let Some(cap) = self.capacity.filter(|&cap| self.presets.len() >= cap) {
                    return Err(CropError::CapacityExceeded(cap));
                }
                debug!(name, "adding preset");
                self.presets.push(preset);
                self.presets.len() - 1
            }
        };
        Ok(&self.presets[index])
    }

    /// Store pixel margins as fractions of `range`.
    ///
    /// Left/right are divided by the width range and top/bottom by the height
    /// range. An unknown (zero) axis stores zero.
    pub fn upsert_margins(
        &mut self,
        name: &str,
        margins: &CropMargins,
        range: SliderRange,
    ) -> Result<&Preset, CropError> {
        self.upsert(
            name,
            to_fraction(margins.left, range.max_width),
            to_fraction(margins.right, range.max_width),
            to_fraction(margins.top, range.max_height),
            to_fraction(margins.bottom, range.max_height),
        )
    }

    /// Resolve a preset name into pixel margins for the current range.
    ///
    /// `"None"` always yields zero margins.
    pub fn apply(&self, name: &str, range: SliderRange) -> Result<CropMargins, CropError> {
        if name == NONE_TOKEN {
            return Ok(CropMargins::default());
        }
        self.get(name)
            .map(|preset| preset.margins_for(range))
            .ok_or_else(|| CropError::PresetNotFound(name.to_string()))
    }

    /// Remove a preset, keeping the relative order of the rest.
    pub fn remove(&mut self, name: &str) -> Result<Preset, CropError> {
        let index = self
            .position(name)
            .ok_or_else(|| CropError::PresetNotFound(name.to_string()))?;
        debug!(name, "removing preset");
        Ok(self.presets.remove(index))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn fractions_strategy() -> impl Strategy<Value = (f64, f64, f64, f64)> {
        (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0)
    }

    fn range_strategy() -> impl Strategy<Value = SliderRange> {
        (1u32..=7680, 1u32..=4320).prop_map(|(w, h)| SliderRange::new(w, h))
    }

    proptest! {
        /// Property: Applied margins are within half a pixel of fraction * range.
        #[test]
        fn prop_apply_preserves_fraction(
            (l, r, t, b) in fractions_strategy(),
            range in range_strategy(),
        ) {
            let mut store = PresetStore::new();
            let name = store.upsert("P", l, r, t, b).unwrap().name.clone();
            let margins = store.apply(&name, range).unwrap();

            let w = range.max_width as f64;
            let h = range.max_height as f64;
            prop_assert!((margins.left as f64 / w - l).abs() <= 0.5 / w + 1e-9);
            prop_assert!((margins.right as f64 / w - r).abs() <= 0.5 / w + 1e-9);
            prop_assert!((margins.top as f64 / h - t).abs() <= 0.5 / h + 1e-9);
            prop_assert!((margins.bottom as f64 / h - b).abs() <= 0.5 / h + 1e-9);
        }

        /// Property: Margins saved at one range, persisted, and applied at
        /// another keep their share of each axis.
        #[test]
        fn prop_saved_margins_carry_across_ranges(
            (l, r, t, b) in fractions_strategy(),
            saved_at in range_strategy(),
            applied_at in range_strategy(),
        ) {
            let margins = CropMargins::new(
                (l * saved_at.max_width as f64) as u32,
                (r * saved_at.max_width as f64) as u32,
                (t * saved_at.max_height as f64) as u32,
                (b * saved_at.max_height as f64) as u32,
            );
            let mut store = PresetStore::new();
            let stored = store.upsert_margins("P", &margins, saved_at).unwrap().clone();

            let reloaded = PresetStore::load(&store.save());
            let preset = reloaded.get("P").unwrap();
            prop_assert!((preset.left_frac - stored.left_frac).abs() < 1e-6);
            prop_assert!((preset.right_frac - stored.right_frac).abs() < 1e-6);
            prop_assert!((preset.top_frac - stored.top_frac).abs() < 1e-6);
            prop_assert!((preset.bottom_frac - stored.bottom_frac).abs() < 1e-6);

            let applied = reloaded.apply("P", applied_at).unwrap();
            let share = |value: u32, max: u32| value as f64 / max as f64;
            let (w1, h1) = (saved_at.max_width, saved_at.max_height);
            let (w2, h2) = (applied_at.max_width, applied_at.max_height);
            let tol_w = 0.5 / w2 as f64 + 1e-6;
            let tol_h = 0.5 / h2 as f64 + 1e-6;
            prop_assert!((share(applied.left, w2) - share(margins.left, w1)).abs() <= tol_w);
            prop_assert!((share(applied.right, w2) - share(margins.right, w1)).abs() <= tol_w);
            prop_assert!((share(applied.top, h2) - share(margins.top, h1)).abs() <= tol_h);
            prop_assert!((share(applied.bottom, h2) - share(margins.bottom, h1)).abs() <= tol_h);
        }

        /// Property: Saving margins and applying to the same range is lossless.
        #[test]
        fn prop_margins_round_trip_same_range(
            range in range_strategy(),
            (l, r, t, b) in (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0),
        ) {
            let margins = CropMargins::new(
                (l * range.max_width as f64) as u32,
                (r * range.max_width as f64) as u32,
                (t * range.max_height as f64) as u32,
                (b * range.max_height as f64) as u32,
            );
            let mut store = PresetStore::new();
            store.upsert_margins("P", &margins, range).unwrap();
            prop_assert_eq!(store.apply("P", range).unwrap(), margins);
        }
    }
}
