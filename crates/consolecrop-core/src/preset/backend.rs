//! Persistence collaborators for the preset store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::CropError;

/// File name used by capture hosts for the preset list.
pub const DEFAULT_PRESET_FILE: &str = "gdq-crop.cfg";

/// Synchronous text storage for the persisted preset list.
pub trait PresetBackend: Send {
    /// Read the persisted text, or `None` if nothing was saved yet.
    fn read(&self) -> Result<Option<String>, CropError>;

    /// Replace the persisted text.
    fn write(&self, text: &str) -> Result<(), CropError>;
}

/// Plain text file backend.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileBackend {
    fn default() -> Self {
        Self::new(DEFAULT_PRESET_FILE)
    }
}

impl PresetBackend for FileBackend {
    fn read(&self) -> Result<Option<String>, CropError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, text: &str) -> Result<(), CropError> {
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

/// In-memory backend. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    contents: Arc<Mutex<Option<String>>>,
    writes: Arc<Mutex<usize>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with persisted text.
    pub fn with_contents(text: impl Into<String>) -> Self {
        let backend = Self::default();
        *lock(&backend.contents) = Some(text.into());
        backend
    }

    /// Current persisted text.
    pub fn contents(&self) -> Option<String> {
        lock(&self.contents).clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *lock(&self.writes)
    }
}

impl PresetBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, CropError> {
        Ok(self.contents())
    }

    fn write(&self, text: &str) -> Result<(), CropError> {
        *lock(&self.contents) = Some(text.to_string());
        *lock(&self.writes) += 1;
        Ok(())
    }
}

/// Lock and recover from poisoning; the guarded data is plain values.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("consolecrop-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_file_backend_missing_file() {
        let backend = FileBackend::new(temp_path("missing.cfg"));
        assert!(backend.read().unwrap().is_none());
    }

    #[test]
    fn test_file_backend_write_then_read() {
        let path = temp_path("roundtrip.cfg");
        let backend = FileBackend::new(&path);

        backend.write("NES\n\tleft:0.1, right:0.1, top:0, bottom:0\n").unwrap();
        let text = backend.read().unwrap().unwrap();
        assert!(text.starts_with("NES\n"));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_file_backend_default_path() {
        assert_eq!(FileBackend::default().path(), Path::new(DEFAULT_PRESET_FILE));
    }

    #[test]
    fn test_file_backend_read_error() {
        // A directory cannot be read as a file
        let backend = FileBackend::new(std::env::temp_dir());
        assert!(matches!(backend.read(), Err(CropError::Io(_))));
    }

    #[test]
    fn test_memory_backend_shares_buffer() {
        let backend = MemoryBackend::new();
        let clone = backend.clone();

        clone.write("abc").unwrap();
        assert_eq!(backend.contents().as_deref(), Some("abc"));
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn test_memory_backend_seeded() {
        let backend = MemoryBackend::with_contents("seed");
        assert_eq!(backend.read().unwrap().as_deref(), Some("seed"));
        assert_eq!(backend.write_count(), 0);
    }
}
