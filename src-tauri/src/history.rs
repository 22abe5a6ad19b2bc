use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::Result;

pub const HISTORY_FILE: &str = "history.json";

/// Where the visited-address list lives between runs.
pub trait HistoryBackend {
    /// Returns the persisted list, or an empty one if nothing was ever saved.
    fn load(&self) -> Result<Vec<String>>;
    /// Replaces whatever was persisted with `entries`.
    fn save(&self, entries: &[String]) -> Result<()>;
}

/// History kept as a JSON array of strings on disk.
#[derive(Debug, Clone)]
pub struct JsonHistoryFile {
    path: PathBuf,
}

impl JsonHistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `history.json` inside the given app data directory.
    pub fn in_dir(app_data_dir: &Path) -> Self {
        Self::new(app_data_dir.join(HISTORY_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryBackend for JsonHistoryFile {
    fn load(&self) -> Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("[History] No history file at {:?}, starting empty", self.path);
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(entries)?;

        // Atomic write: tmp + rename
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(tmp_path, &self.path)?;
        Ok(())
    }
}

/// In-memory backend. Clones share the same storage, so a test can keep one
/// handle and hand the other to a `History`.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    inner: Arc<Mutex<MemoryHistoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryHistoryInner {
    saved: Option<Vec<String>>,
    saves: usize,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<String>) -> Self {
        let backend = Self::default();
        backend.lock().saved = Some(entries);
        backend
    }

    /// What the last `save` wrote, `None` if never saved.
    pub fn saved(&self) -> Option<Vec<String>> {
        self.lock().saved.clone()
    }

    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryHistoryInner> {
        // A poisoned lock only means a test panicked mid-save; the data is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl HistoryBackend for MemoryHistory {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.lock().saved.clone().unwrap_or_default())
    }

    fn save(&self, entries: &[String]) -> Result<()> {
        let mut inner = self.lock();
        inner.saved = Some(entries.to_vec());
        inner.saves += 1;
        Ok(())
    }
}

/// Ordered, duplicate-free list of visited addresses.
///
/// Every mutating call persists the whole list through the backend before
/// returning, so memory and storage agree after each call.
#[derive(Debug)]
pub struct History<B> {
    entries: Vec<String>,
    backend: B,
}

impl<B: HistoryBackend> History<B> {
    pub fn load(backend: B) -> Result<Self> {
        let entries = backend.load()?;
        log::info!("[History] Loaded {} entries", entries.len());
        Ok(Self { entries, backend })
    }

    /// Appends `url` unless it is already present (exact match).
    /// Returns whether anything was appended; only then is the list saved.
    pub fn add(&mut self, url: &str) -> Result<bool> {
        if self.contains(url) {
            return Ok(false);
        }
        self.entries.push(url.to_string());
        self.save()?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.save()?;
        log::info!("[History] Cleared");
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.backend.save(&self.entries)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.iter().any(|e| e == url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
