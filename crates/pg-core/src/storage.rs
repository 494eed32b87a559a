//! Durable storage for the project store record.
//!
//! The whole store serializes to a single JSON record keyed by a fixed
//! namespace. Backends are injected into [`crate::store::ProjectStore`], which
//! writes through after every successful mutation and treats storage failure
//! as "unsaved", never as a crash — the in-memory state stays authoritative
//! for the session.

use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Fixed namespace the persisted record is keyed by.
pub const STORAGE_NAMESPACE: &str = "pixel-grid-projects";

/// Failure at the storage boundary. Callers log and degrade; they never
/// propagate this to the user as a blocking error.
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "storage I/O error: {err}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

/// Where the serialized store record lives.
pub trait StorageBackend {
    /// Read the whole record, `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the whole record.
    fn save(&self, record: &str) -> Result<(), StorageError>;
}

// ─── File-backed storage ─────────────────────────────────────────────────

/// JSON file named after [`STORAGE_NAMESPACE`] in a caller-chosen directory.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_NAMESPACE}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonFileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, record: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, record)?;
        Ok(())
    }
}

// ─── In-memory storage ───────────────────────────────────────────────────

/// In-memory backend for tests and ephemeral sessions. Cloning shares the
/// record, so a handle kept outside the store can observe what was saved.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    record: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last saved record, if any.
    pub fn record(&self) -> Option<String> {
        self.record.borrow().clone()
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.record.borrow().clone())
    }

    fn save(&self, record: &str) -> Result<(), StorageError> {
        *self.record.borrow_mut() = Some(record.to_string());
        Ok(())
    }
}
