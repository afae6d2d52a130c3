//! JSON-file journal store

use crate::config::StorageConfig;
use crate::entry::JournalEntry;
use moodjournal_core::{ClassificationResult, Error, Result};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Flat-file journal.
///
/// The whole journal is one JSON array. Reads never fail on bad content;
/// writes refuse to replace a file that cannot be parsed.
pub struct JournalStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JournalStore {
    /// Open a store at `path`; the file is created on first write
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!("Journal store at {}", path.display());
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::open(config.path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored entry in file order.
    ///
    /// A missing or empty file is an empty journal. A corrupt file is also
    /// read as empty, with a warning.
    pub fn load_entries(&self) -> Vec<JournalEntry> {
        match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring unreadable journal {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Append a classified entry and return it
    pub fn persist(&self, text: &str, tags: ClassificationResult) -> Result<JournalEntry> {
        let _guard = self.write_lock.lock();

        let mut entries = self.read_entries()?;
        let id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let entry = JournalEntry::new(id, text, tags);
        entries.push(entry.clone());

        self.write_entries(&entries)?;

        debug!(id, mood = %tags.mood, energy = %tags.energy, "Persisted journal entry");
        Ok(entry)
    }

    /// Up to `n` entries, newest first; equal timestamps put the higher id first
    pub fn recent(&self, n: usize) -> Result<Vec<JournalEntry>> {
        let mut entries = self.load_entries();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        entries.truncate(n);
        Ok(entries)
    }

    fn read_entries(&self) -> Result<Vec<JournalEntry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(Error::storage(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            Error::storage(format!("failed to parse {}: {}", self.path.display(), e))
        })
    }

    fn write_entries(&self, entries: &[JournalEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
