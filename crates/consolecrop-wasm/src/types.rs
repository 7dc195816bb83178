//! WASM-compatible wrapper types for frame geometry.
//!
//! These types flatten the core geometry records into getter-only classes so
//! the JavaScript side can feed them straight into shader uniforms.

use consolecrop_core::{
    CropConfig, CropError, CropMargins, CropTransformResult, FramePlan, SkipReason,
};
use wasm_bindgen::prelude::*;

/// Convert a core error into the string error thrown on the JS side.
pub(crate) fn js_error(err: CropError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Deserialize and validate a configuration object.
///
/// `undefined` and `null` select the defaults.
pub(crate) fn config_from_js(config: JsValue) -> Result<CropConfig, JsValue> {
    let config: CropConfig = if config.is_undefined() || config.is_null() {
        CropConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid crop config: {}", e)))?
    };
    config.validate().map_err(js_error)?;
    Ok(config)
}

/// Pixel crop margins.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsCropMargins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

#[wasm_bindgen]
impl JsCropMargins {
    #[wasm_bindgen(constructor)]
    pub fn new(left: u32, right: u32, top: u32, bottom: u32) -> JsCropMargins {
        JsCropMargins {
            left,
            right,
            top,
            bottom,
        }
    }
}

impl From<CropMargins> for JsCropMargins {
    fn from(m: CropMargins) -> Self {
        Self::new(m.left, m.right, m.top, m.bottom)
    }
}

impl From<JsCropMargins> for CropMargins {
    fn from(m: JsCropMargins) -> Self {
        CropMargins::new(m.left, m.right, m.top, m.bottom)
    }
}

/// Crop transform result for JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsCropTransform {
    inner: CropTransformResult,
}

#[wasm_bindgen]
impl JsCropTransform {
    #[wasm_bindgen(getter)]
    pub fn crop_width(&self) -> u32 {
        self.inner.crop_width
    }

    #[wasm_bindgen(getter)]
    pub fn crop_height(&self) -> u32 {
        self.inner.crop_height
    }

    #[wasm_bindgen(getter)]
    pub fn scale_x(&self) -> f32 {
        self.inner.scale.x
    }

    #[wasm_bindgen(getter)]
    pub fn scale_y(&self) -> f32 {
        self.inner.scale.y
    }

    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> f32 {
        self.inner.offset.x
    }

    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> f32 {
        self.inner.offset.y
    }
}

impl From<CropTransformResult> for JsCropTransform {
    fn from(inner: CropTransformResult) -> Self {
        Self { inner }
    }
}

/// Render parameters for one tick.
///
/// When `render` is false the host skips drawing this frame and
/// `skip_reason` says why. All numeric getters are zero in that case.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsFrameParams {
    plan: FramePlan,
}

#[wasm_bindgen]
impl JsFrameParams {
    /// Whether the frame should be drawn.
    #[wasm_bindgen(getter)]
    pub fn render(&self) -> bool {
        matches!(self.plan, FramePlan::Render(_))
    }

    /// `"degenerateSource"`, `"invalidSpec"`, or undefined when rendering.
    #[wasm_bindgen(getter)]
    pub fn skip_reason(&self) -> Option<String> {
        match self.plan {
            FramePlan::Skip(SkipReason::DegenerateSource) => Some("degenerateSource".to_string()),
            FramePlan::Skip(SkipReason::InvalidSpec) => Some("invalidSpec".to_string()),
            FramePlan::Render(_) => None,
        }
    }

    /// Crop part of the parameters.
    #[wasm_bindgen(getter)]
    pub fn crop(&self) -> JsCropTransform {
        self.plan
            .params()
            .map(|p| p.crop)
            .unwrap_or_default()
            .into()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.plan.params().map_or(0, |p| p.width())
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.plan.params().map_or(0, |p| p.height())
    }

    /// Whether the undistort pass runs this tick.
    #[wasm_bindgen(getter)]
    pub fn undistort(&self) -> bool {
        self.plan.params().is_some_and(|p| p.undistort.is_some())
    }

    #[wasm_bindgen(getter)]
    pub fn undistort_factor(&self) -> f32 {
        self.undistort_params().map_or(0.0, |u| u.factor)
    }

    #[wasm_bindgen(getter)]
    pub fn output_width(&self) -> u32 {
        self.undistort_params().map_or(0, |u| u.output_width)
    }

    #[wasm_bindgen(getter)]
    pub fn output_height(&self) -> u32 {
        self.undistort_params().map_or(0, |u| u.output_height)
    }

    #[wasm_bindgen(getter)]
    pub fn inv_source_width(&self) -> f32 {
        self.undistort_params().map_or(0.0, |u| u.inv_source_size.x)
    }

    #[wasm_bindgen(getter)]
    pub fn inv_source_height(&self) -> f32 {
        self.undistort_params().map_or(0.0, |u| u.inv_source_size.y)
    }

    /// Whether the host should bind its point sampler.
    #[wasm_bindgen(getter)]
    pub fn nearest_neighbor(&self) -> bool {
        self.plan
            .params()
            .is_some_and(|p| p.sampling == consolecrop_core::SamplingMode::NearestNeighbor)
    }
}

impl JsFrameParams {
    fn undistort_params(&self) -> Option<consolecrop_core::UndistortParams> {
        self.plan.params().and_then(|p| p.undistort)
    }
}

impl From<FramePlan> for JsFrameParams {
    fn from(plan: FramePlan) -> Self {
        Self { plan }
    }
}
