//! Preset store WASM bindings.
//!
//! The host owns persistence: it passes the stored text to
//! `JsPresetStore.load` at startup and writes `save()` back after every
//! successful mutation.

use crate::types::{js_error, JsCropMargins};
use consolecrop_core::geometry::SliderRange;
use consolecrop_core::PresetStore;
use wasm_bindgen::prelude::*;

/// JavaScript-accessible preset store.
///
/// # Example (TypeScript)
/// ```typescript
/// const store = JsPresetStore.load(localStorage.getItem("gdq-crop") ?? "");
/// store.save_margins("SNES", new JsCropMargins(32, 32, 0, 0), 640, 480);
/// localStorage.setItem("gdq-crop", store.save());
///
/// const margins = store.apply("SNES", 1280, 960);
/// ```
#[wasm_bindgen]
pub struct JsPresetStore {
    inner: PresetStore,
}

#[wasm_bindgen]
impl JsPresetStore {
    /// Create an empty store, optionally bounded.
    #[wasm_bindgen(constructor)]
    pub fn new(capacity: Option<u32>) -> JsPresetStore {
        JsPresetStore {
            inner: PresetStore::with_capacity(capacity.map(|c| c as usize)),
        }
    }

    /// Parse persisted text. Malformed trailing records are dropped.
    pub fn load(text: &str, capacity: Option<u32>) -> JsPresetStore {
        JsPresetStore {
            inner: PresetStore::load_with_capacity(text, capacity.map(|c| c as usize)),
        }
    }

    /// Serialize all presets for persistence.
    pub fn save(&self) -> String {
        self.inner.save()
    }

    /// Insert or overwrite a preset from fractions in `[0, 1]`.
    ///
    /// # Errors
    /// Throws for empty or reserved names, non-finite fractions, or a full store.
    pub fn upsert(
        &mut self,
        name: &str,
        left_frac: f64,
        right_frac: f64,
        top_frac: f64,
        bottom_frac: f64,
    ) -> Result<(), JsValue> {
        self.inner
            .upsert(name, left_frac, right_frac, top_frac, bottom_frac)
            .map(|_| ())
            .map_err(js_error)
    }

    /// Insert or overwrite a preset from pixel margins and the slider range.
    pub fn save_margins(
        &mut self,
        name: &str,
        margins: &JsCropMargins,
        max_width: u32,
        max_height: u32,
    ) -> Result<(), JsValue> {
        self.inner
            .upsert_margins(
                name,
                &(*margins).into(),
                SliderRange::new(max_width, max_height),
            )
            .map(|_| ())
            .map_err(js_error)
    }

    /// Resolve a preset into pixel margins for the current slider range.
    ///
    /// `"None"` yields zero margins.
    pub fn apply(
        &self,
        name: &str,
        max_width: u32,
        max_height: u32,
    ) -> Result<JsCropMargins, JsValue> {
        self.inner
            .apply(name, SliderRange::new(max_width, max_height))
            .map(JsCropMargins::from)
            .map_err(js_error)
    }

    pub fn remove(&mut self, name: &str) -> Result<(), JsValue> {
        self.inner.remove(name).map(|_| ()).map_err(js_error)
    }

    /// Preset names in display order.
    pub fn names(&self) -> Vec<String> {
        self.inner.names()
    }

    /// All presets as `{ name, left_frac, right_frac, top_frac, bottom_frac }`.
    pub fn presets(&self) -> Result<js_sys::Array, JsValue> {
        let array = js_sys::Array::new();
        for preset in self.inner.iter() {
            let value = serde_wasm_bindgen::to_value(preset)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            array.push(&value);
        }
        Ok(array)
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPresetStore {
    pub(crate) fn inner(&self) -> &PresetStore {
        &self.inner
    }

    pub(crate) fn inner_mut(&mut self) -> &mut PresetStore {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "NES\n\tleft:0.1, right:0.1, top:0, bottom:0\n\
                          SNES\n\tleft:0.05, right:0.05, top:0.1, bottom:0.1\n";

    #[test]
    fn test_load_and_names() {
        let store = JsPresetStore::load(SAMPLE, None);
        assert_eq!(store.names(), vec!["NES", "SNES"]);
        assert_eq!(store.length(), 2);
    }

    #[test]
    fn test_load_with_capacity() {
        let store = JsPresetStore::load(SAMPLE, Some(1));
        assert_eq!(store.names(), vec!["NES"]);
    }

    #[test]
    fn test_upsert_and_save() {
        let mut store = JsPresetStore::new(None);
        assert!(store.upsert("GB", 0.25, 0.25, 0.0, 0.0).is_ok());
        assert_eq!(
            store.save(),
            "GB\n\tleft:0.2500000, right:0.2500000, top:0.0000000, bottom:0.0000000\n"
        );
    }

    #[test]
    fn test_save_margins_then_apply_elsewhere() {
        let mut store = JsPresetStore::new(None);
        assert!(store
            .save_margins("PS1", &JsCropMargins::new(32, 32, 24, 24), 640, 480)
            .is_ok());

        let margins = store.apply("PS1", 1280, 960).ok().unwrap();
        assert_eq!(margins, JsCropMargins::new(64, 64, 48, 48));
    }

    #[test]
    fn test_apply_none() {
        let store = JsPresetStore::new(None);
        let margins = store.apply("None", 640, 480).ok().unwrap();
        assert_eq!(margins, JsCropMargins::default());
    }

    #[test]
    fn test_remove() {
        let mut store = JsPresetStore::load(SAMPLE, None);
        assert!(store.remove("NES").is_ok());
        assert_eq!(store.names(), vec!["SNES"]);
    }
}
