//! Durable slots
//!
//! A slot holds exactly one opaque blob under a fixed key. Writes replace the
//! whole blob or nothing.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::PersistenceError;

/// Storage backend for the serialized store
pub trait Slot {
    /// Fixed identifier of the slot
    fn key(&self) -> &str;

    /// Read the current blob, `None` if nothing has been written yet
    fn read(&self) -> Result<Option<String>, PersistenceError>;

    /// Replace the blob
    fn write(&mut self, blob: &str) -> Result<(), PersistenceError>;

    /// Set aside a blob that could not be decoded before it gets overwritten
    fn quarantine(&mut self, _blob: &str) -> Result<(), PersistenceError> {
        Ok(())
    }
}

// =========================================================================
// FileSlot
// =========================================================================

/// Slot backed by `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
    key: String,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    /// Path of the live blob
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    /// Fresh path for setting aside an undecodable blob.
    ///
    /// Names carry the time of quarantine so earlier copies are never
    /// overwritten.
    fn next_quarantine_path(&self) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%3f");
        let mut path = self.dir.join(format!("{}.corrupt-{}.json", self.key, stamp));
        let mut n = 1;
        while path.exists() {
            path = self.dir.join(format!("{}.corrupt-{}-{}.json", self.key, stamp, n));
            n += 1;
        }
        path
    }

    /// Blobs set aside so far, oldest first
    pub fn quarantined_paths(&self) -> Result<Vec<PathBuf>, PersistenceError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistenceError::io(&self.dir, e)),
        };

        let prefix = format!("{}.corrupt-", self.key);
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| PersistenceError::io(&self.dir, e))?.path();
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&prefix) && name.ends_with(".json"));
            if matches {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", self.key))
    }

    /// Write to a sibling temp file, flush it to disk, then rename over `target`.
    ///
    /// The temp file is removed if any step fails.
    fn write_atomic(&self, target: &Path, blob: &str) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(|e| PersistenceError::io(&self.dir, e))?;

        let temp = self.temp_path();
        let written = fs::File::create(&temp).and_then(|mut file| {
            file.write_all(blob.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&temp);
            return Err(PersistenceError::io(&temp, e));
        }

        fs::rename(&temp, target).map_err(|e| {
            let _ = fs::remove_file(&temp);
            PersistenceError::io(target, e)
        })
    }
}

impl Slot for FileSlot {
    fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> Result<Option<String>, PersistenceError> {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::io(path, e)),
        }
    }

    fn write(&mut self, blob: &str) -> Result<(), PersistenceError> {
        let path = self.path();
        self.write_atomic(&path, blob)
    }

    fn quarantine(&mut self, blob: &str) -> Result<(), PersistenceError> {
        let path = self.next_quarantine_path();
        self.write_atomic(&path, blob)?;
        tracing::warn!("Undecodable store blob copied to {}", path.display());
        Ok(())
    }
}

// =========================================================================
// MemorySlot
// =========================================================================

/// In-process slot. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    key: String,
    blob: Option<String>,
    quarantined: Vec<String>,
}

impl MemorySlot {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            blob: None,
            quarantined: Vec::new(),
        }
    }

    /// Start with `blob` already stored
    pub fn with_blob(mut self, blob: impl Into<String>) -> Self {
        self.blob = Some(blob.into());
        self
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    pub fn quarantined(&self) -> &[String] {
        &self.quarantined
    }
}

impl Slot for MemorySlot {
    fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, blob: &str) -> Result<(), PersistenceError> {
        self.blob = Some(blob.to_string());
        Ok(())
    }

    fn quarantine(&mut self, blob: &str) -> Result<(), PersistenceError> {
        self.quarantined.push(blob.to_string());
        Ok(())
    }
}
