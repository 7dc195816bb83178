//! Named crop presets.
//!
//! Presets store margins as fractions of the slider range at save time, which
//! makes them independent of the source resolution they were created on.
//!
//! - [`PresetStore`] is the plain ordered registry with the text format
//!   ([`PresetStore::load`] / [`PresetStore::save`]).
//! - [`SharedPresetStore`] wraps it in a lock with a [`PresetBackend`] and
//!   persists synchronously on every mutation.

mod backend;
mod format;
mod shared;
mod store;

pub use backend::{FileBackend, MemoryBackend, PresetBackend, DEFAULT_PRESET_FILE};
pub use format::FRACTION_PRECISION;
pub use shared::SharedPresetStore;
pub use store::{validate_name, Preset, PresetStore, CUSTOM_TOKEN, NONE_TOKEN};
