//! WASM bindings for the stateless geometry functions.
//!
//! These mirror the per-tick steps so a host can compute them without keeping
//! a `JsCropFilter` around, e.g. to preview a crop in the settings panel.

use crate::types::{js_error, JsCropMargins, JsCropTransform};
use consolecrop_core::geometry::{
    compute_crop as core_crop, resolve, ResolutionSpec, SourceFrame, ASPECT_TOLERANCE,
};
use consolecrop_core::AspectChoice;
use wasm_bindgen::prelude::*;

/// Parse a resolution string.
///
/// # Returns
///
/// `{ explicit, width_or_num, height_or_den }`.
///
/// # Errors
///
/// Throws for anything other than `"WxH"` or `"W:H"` with positive parts.
#[wasm_bindgen]
pub fn parse_resolution(text: &str) -> Result<JsValue, JsValue> {
    let spec = ResolutionSpec::parse(text).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&spec).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resolve the corrected output geometry for a source and resolution string.
///
/// # Returns
///
/// `{ output_width, output_height, undistort_factor, valid }`. `valid` is
/// false for degenerate sources and when the aspect already matches.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const geom = resolve_aspect(1920, 1080, "4:3");
/// // geom.output_height === 1440
/// ```
#[wasm_bindgen]
pub fn resolve_aspect(width: u32, height: u32, resolution: &str) -> Result<JsValue, JsValue> {
    let spec = ResolutionSpec::parse(resolution).map_err(js_error)?;
    let outcome = resolve(SourceFrame::new(width, height), Some(&spec), ASPECT_TOLERANCE);
    serde_wasm_bindgen::to_value(&outcome.geometry())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compute the crop transform for a resolved frame size.
#[wasm_bindgen]
pub fn compute_crop(width: u32, height: u32, margins: &JsCropMargins) -> JsCropTransform {
    core_crop((width, height), &(*margins).into()).into()
}

/// Labels of the aspect list, in display order.
#[wasm_bindgen]
pub fn aspect_choices() -> Vec<String> {
    AspectChoice::ALL
        .into_iter()
        .map(|choice| choice.label().to_string())
        .collect()
}


/// WASM-specific tests that require JsValue.
///
/// These tests use functions that return `Result<T, JsValue>` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use consolecrop_core::ResolvedGeometry;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_parse_resolution() {
        let value = parse_resolution("4:3").unwrap();
        let spec: ResolutionSpec = serde_wasm_bindgen::from_value(value).unwrap();
        assert!(!spec.explicit);
        assert_eq!(spec.width_or_num, 4);
    }

    #[wasm_bindgen_test]
    fn test_parse_resolution_invalid() {
        assert!(parse_resolution("4-3").is_err());
        assert!(parse_resolution("0x480").is_err());
    }

    #[wasm_bindgen_test]
    fn test_resolve_aspect() {
        let value = resolve_aspect(1920, 1080, "4:3").unwrap();
        let geom: ResolvedGeometry = serde_wasm_bindgen::from_value(value).unwrap();
        assert!(geom.valid);
        assert_eq!(geom.output_width, 1920);
        assert_eq!(geom.output_height, 1440);
    }

    #[wasm_bindgen_test]
    fn test_resolve_aspect_pass_through() {
        let value = resolve_aspect(1920, 1080, "16:9").unwrap();
        let geom: ResolvedGeometry = serde_wasm_bindgen::from_value(value).unwrap();
        assert!(!geom.valid);
    }
}
