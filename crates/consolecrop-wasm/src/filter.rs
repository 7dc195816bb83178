//! Crop filter WASM bindings.
//!
//! `JsCropFilter` is the render-side object: the host pushes settings into it
//! and calls `tick` once per frame with the current source size.

use crate::settings::JsFilterSettings;
use crate::types::{config_from_js, js_error, JsCropMargins, JsFrameParams};
use consolecrop_core::{CropConfig, CropFilter, SamplingMode, SourceFrame};
use wasm_bindgen::prelude::*;

/// JavaScript-accessible crop filter.
///
/// # Example (TypeScript)
/// ```typescript
/// const filter = new JsCropFilter({ mode: "aspectCorrected" });
/// filter.set_resolution("4:3");
/// filter.set_margins(new JsCropMargins(0, 0, 180, 180));
///
/// // Every frame
/// const params = filter.tick(video.videoWidth, video.videoHeight);
/// if (params.render) {
///   gl.uniform2f(mulLoc, params.crop.scale_x, params.crop.scale_y);
///   gl.uniform2f(addLoc, params.crop.offset_x, params.crop.offset_y);
/// }
/// ```
#[wasm_bindgen]
pub struct JsCropFilter {
    inner: CropFilter,
}

#[wasm_bindgen]
impl JsCropFilter {
    /// Create a filter from a configuration object (`undefined` for defaults).
    ///
    /// # Errors
    /// Throws if the configuration cannot be deserialized or fails validation.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsCropFilter, JsValue> {
        let config = config_from_js(config)?;
        Ok(Self::from_config(&config))
    }

    /// Create a filter with the default configuration.
    pub fn with_defaults() -> JsCropFilter {
        Self::from_config(&CropConfig::default())
    }

    /// Replace the resolution spec (`"WxH"` or `"W:H"`).
    ///
    /// # Errors
    /// Throws for an invalid spec. The previous spec is kept and `tick`
    /// reports `invalidSpec` until a valid one is set.
    pub fn set_resolution(&mut self, text: &str) -> Result<(), JsValue> {
        self.inner.set_resolution(text).map(|_| ()).map_err(js_error)
    }

    pub fn set_margins(&mut self, margins: &JsCropMargins) {
        self.inner.set_margins((*margins).into());
    }

    pub fn set_nearest_neighbor(&mut self, enabled: bool) {
        self.inner.set_sampling(if enabled {
            SamplingMode::NearestNeighbor
        } else {
            SamplingMode::Default
        });
    }

    /// Take over a settings snapshot.
    pub fn apply_settings(&mut self, settings: &JsFilterSettings) -> Result<(), JsValue> {
        self.inner
            .apply_settings(settings.inner())
            .map_err(js_error)
    }

    /// Compute this frame's render parameters.
    pub fn tick(&mut self, width: u32, height: u32) -> JsFrameParams {
        self.inner.tick(SourceFrame::new(width, height)).into()
    }

    /// Whether the last resolution update was rejected.
    #[wasm_bindgen(getter)]
    pub fn blocked(&self) -> bool {
        self.inner.is_blocked()
    }

    /// Last valid resolution spec text, if any.
    #[wasm_bindgen(getter)]
    pub fn resolution(&self) -> Option<String> {
        self.inner.spec().map(|spec| spec.to_string())
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsCropFilter {
    fn from_config(config: &CropConfig) -> Self {
        Self {
            inner: CropFilter::new(config),
        }
    }
}
