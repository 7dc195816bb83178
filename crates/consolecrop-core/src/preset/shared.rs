//! Thread-safe preset store with write-through persistence.
//!
//! The settings thread mutates presets while the render or UI thread lists
//! and applies them. One mutex guards both the store and its backend, so a
//! mutation and its persistence write are a single atomic step.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use super::backend::{lock, PresetBackend};
use super::store::{Preset, PresetStore};
use crate::error::CropError;
use crate::geometry::{CropMargins, SliderRange};
use crate::settings::FilterSettings;

struct Inner {
    store: PresetStore,
    backend: Box<dyn PresetBackend>,
}

impl Inner {
    /// Apply `mutate` to a copy, persist it, then commit.
    ///
    /// Nothing changes in memory if either the mutation or the write fails.
    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut PresetStore) -> Result<T, CropError>,
    ) -> Result<T, CropError> {
        let mut next = self.store.clone();
        let value = mutate(&mut next)?;
        self.backend.write(&next.save())?;
        self.store = next;
        Ok(value)
    }
}

/// Shared handle to a persisted [`PresetStore`]. Clones share the store.
#[derive(Clone)]
pub struct SharedPresetStore {
    inner: Arc<Mutex<Inner>>,
}

impl SharedPresetStore {
    /// Load the store once from `backend`.
    ///
    /// A backend with nothing saved yields an empty store. Malformed records
    /// truncate the load instead of failing it.
    pub fn open(
        backend: impl PresetBackend + 'static,
        capacity: Option<usize>,
    ) -> Result<Self, CropError> {
        let text = backend.read()?.unwrap_or_default();
        let store = PresetStore::load_with_capacity(&text, capacity);
        info!(count = store.len(), "preset store opened");
        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                store,
                backend: Box::new(backend),
            })),
        })
    }

    /// Re-read the backend, replacing the in-memory store.
    pub fn reload(&self) -> Result<(), CropError> {
        let mut inner = lock(&self.inner);
        let text = inner.backend.read()?.unwrap_or_default();
        let capacity = inner.store.capacity();
        inner.store = PresetStore::load_with_capacity(&text, capacity);
        debug!(count = inner.store.len(), "preset store reloaded");
        Ok(())
    }

    /// Upsert raw fractions and persist.
    pub fn save_fractions(
        &self,
        name: &str,
        left_frac: f64,
        right_frac: f64,
        top_frac: f64,
        bottom_frac: f64,
    ) -> Result<Preset, CropError> {
        lock(&self.inner).commit(|store| {
            store
                .upsert(name, left_frac, right_frac, top_frac, bottom_frac)
                .cloned()
        })
    }

    /// Upsert pixel margins as fractions of `range` and persist.
    pub fn save_preset(
        &self,
        name: &str,
        margins: &CropMargins,
        range: SliderRange,
    ) -> Result<Preset, CropError> {
        lock(&self.inner).commit(|store| store.upsert_margins(name, margins, range).cloned())
    }

    /// Save the settings' current margins under their pending preset name.
    ///
    /// Returns the follow-up snapshot with the new preset selected.
    pub fn save_settings_preset(
        &self,
        settings: &FilterSettings,
    ) -> Result<FilterSettings, CropError> {
        lock(&self.inner).commit(|store| settings.save_new_preset(store))
    }

    /// Remove a preset and persist.
    pub fn remove(&self, name: &str) -> Result<Preset, CropError> {
        lock(&self.inner).commit(|store| store.remove(name))
    }

    pub fn apply(&self, name: &str, range: SliderRange) -> Result<CropMargins, CropError> {
        lock(&self.inner).store.apply(name, range)
    }

    pub fn names(&self) -> Vec<String> {
        lock(&self.inner).store.names()
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).store.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.inner).store.is_empty()
    }

    /// Copy of the current store, for building selection lists.
    pub fn snapshot(&self) -> PresetStore {
        lock(&self.inner).store.clone()
    }
}

impl std::fmt::Debug for SharedPresetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedPresetStore")
            .field("presets", &self.len())
            .finish()
    }
}
