//! Filter settings WASM bindings.
//!
//! Every `with_*` method returns a new snapshot and leaves the receiver
//! untouched, so the property panel can swap snapshots in one assignment and
//! drop the new one if a call throws.

use crate::presets::JsPresetStore;
use crate::types::{config_from_js, js_error, JsCropMargins};
use consolecrop_core::{
    AspectChoice, CropConfig, FilterSettings, PresetSelection, SamplingMode, SourceFrame,
};
use wasm_bindgen::prelude::*;

/// Immutable settings snapshot for JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsFilterSettings {
    inner: FilterSettings,
}

#[wasm_bindgen]
impl JsFilterSettings {
    /// Create the initial snapshot from a configuration object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsFilterSettings, JsValue> {
        let config = config_from_js(config)?;
        Ok(Self::wrap(FilterSettings::new(&config)))
    }

    /// Initial snapshot with the default configuration.
    pub fn with_defaults() -> JsFilterSettings {
        Self::wrap(FilterSettings::new(&CropConfig::default()))
    }

    /// Refresh the slider range for the current source size.
    pub fn with_source(&self, width: u32, height: u32) -> JsFilterSettings {
        Self::wrap(self.inner.with_source(SourceFrame::new(width, height)))
    }

    /// Switch resolution text; margins are rescaled into the new range.
    pub fn with_resolution(
        &self,
        text: &str,
        width: u32,
        height: u32,
    ) -> Result<JsFilterSettings, JsValue> {
        self.inner
            .with_resolution(text, SourceFrame::new(width, height))
            .map(Self::wrap)
            .map_err(js_error)
    }

    /// Apply an aspect list entry by its label.
    pub fn with_aspect_choice(
        &self,
        label: &str,
        width: u32,
        height: u32,
    ) -> Result<JsFilterSettings, JsValue> {
        let choice = AspectChoice::from_label(label)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown aspect choice: {}", label)))?;
        self.inner
            .with_aspect_choice(choice, SourceFrame::new(width, height))
            .map(Self::wrap)
            .map_err(js_error)
    }

    pub fn with_margins(&self, margins: &JsCropMargins) -> JsFilterSettings {
        Self::wrap(self.inner.with_margins((*margins).into()))
    }

    /// Pick a preset list entry by its label (`"None"`, `"Custom"` or a name).
    pub fn with_selection(
        &self,
        label: &str,
        store: &JsPresetStore,
    ) -> Result<JsFilterSettings, JsValue> {
        self.inner
            .with_selection(PresetSelection::from_label(label), store.inner())
            .map(Self::wrap)
            .map_err(js_error)
    }

    pub fn with_new_preset_name(&self, name: &str) -> JsFilterSettings {
        Self::wrap(self.inner.with_new_preset_name(name))
    }

    pub fn with_nearest_neighbor(&self, enabled: bool) -> JsFilterSettings {
        let sampling = if enabled {
            SamplingMode::NearestNeighbor
        } else {
            SamplingMode::Default
        };
        Self::wrap(self.inner.with_sampling(sampling))
    }

    /// Save the current margins under the pending preset name.
    ///
    /// Persist `store.save()` afterwards.
    pub fn save_new_preset(&self, store: &mut JsPresetStore) -> Result<JsFilterSettings, JsValue> {
        self.inner
            .save_new_preset(store.inner_mut())
            .map(Self::wrap)
            .map_err(js_error)
    }

    /// Preset list labels: `"Custom"`, `"None"`, then stored presets.
    pub fn selection_choices(store: &JsPresetStore) -> Vec<String> {
        FilterSettings::selection_choices(store.inner())
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[wasm_bindgen(getter)]
    pub fn resolution(&self) -> String {
        self.inner.resolution.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn margins(&self) -> JsCropMargins {
        self.inner.margins.into()
    }

    /// Label of the current preset list entry.
    #[wasm_bindgen(getter)]
    pub fn selection(&self) -> String {
        self.inner.selection.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn new_preset_name(&self) -> String {
        self.inner.new_preset_name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn slider_max_width(&self) -> u32 {
        self.inner.range.max_width
    }

    #[wasm_bindgen(getter)]
    pub fn slider_max_height(&self) -> u32 {
        self.inner.range.max_height
    }
}

impl JsFilterSettings {
    fn wrap(inner: FilterSettings) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &FilterSettings {
        &self.inner
    }
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_invalid_resolution_throws() {
        let settings = JsFilterSettings::with_defaults();
        assert!(settings.with_resolution("huge", 1920, 1080).is_err());
        assert_eq!(settings.resolution(), "4:3");
    }

    #[wasm_bindgen_test]
    fn test_unknown_aspect_label_throws() {
        let settings = JsFilterSettings::with_defaults();
        assert!(settings.with_aspect_choice("21:9", 1920, 1080).is_err());
    }

    #[wasm_bindgen_test]
    fn test_reserved_preset_name_throws() {
        let mut store = JsPresetStore::new(None);
        let settings = JsFilterSettings::with_defaults().with_new_preset_name("Custom");
        assert!(settings.save_new_preset(&mut store).is_err());
        assert_eq!(store.length(), 0);
    }

    #[wasm_bindgen_test]
    fn test_missing_preset_throws() {
        let store = JsPresetStore::new(None);
        let settings = JsFilterSettings::with_defaults();
        assert!(settings.with_selection("Genesis", &store).is_err());
    }
}
