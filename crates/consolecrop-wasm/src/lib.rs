//! Consolecrop WASM - WebAssembly bindings for the consolecrop filter engine
//!
//! This crate exposes the consolecrop-core filter, settings and preset store
//! to a JavaScript host that owns the video pipeline and the shaders.
//!
//! # Module Structure
//!
//! - `filter` - per-frame crop filter
//! - `settings` - immutable settings snapshots for the property panel
//! - `presets` - named crop presets and their text format
//! - `geometry` - stateless parse/resolve/crop helpers
//! - `types` - WASM-compatible wrapper types for margins and render params
//! - `logging` - forwards core log events to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropFilter, JsFilterSettings, JsPresetStore } from '@consolecrop/wasm';
//!
//! await init();
//!
//! const store = JsPresetStore.load(localStorage.getItem("gdq-crop") ?? "");
//! let settings = JsFilterSettings.with_defaults().with_source(1920, 1080);
//! settings = settings.with_selection("SNES", store);
//!
//! const filter = JsCropFilter.with_defaults();
//! filter.apply_settings(settings);
//! const params = filter.tick(1920, 1080);
//! ```

use tracing::level_filters::LevelFilter;
use wasm_bindgen::prelude::*;

mod filter;
mod geometry;
mod logging;
mod presets;
mod settings;
mod types;

// Re-export public types
pub use filter::JsCropFilter;
pub use geometry::{aspect_choices, compute_crop, parse_resolution, resolve_aspect};
pub use presets::JsPresetStore;
pub use settings::JsFilterSettings;
pub use types::{JsCropMargins, JsCropTransform, JsFrameParams};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    logging::install(level);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
