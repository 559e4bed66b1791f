//! Document storage backends.
//!
//! Documents are saved as a versioned JSON envelope ([`BoardFile`]) holding
//! the live shape list plus metadata. Loading is deliberately tolerant:
//! absent or unparsable data yields an empty document rather than an error,
//! so a corrupted file never blocks startup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

use parking_lot::Mutex;
use shapeboard_core::StoredShape;

use crate::error::{PersistenceError, PersistenceResult};

/// Document file format version.
pub const FILE_FORMAT_VERSION: &str = "1.0";

/// File name the editor persists under (the fixed storage key).
pub const DEFAULT_FILE_NAME: &str = "shapeboard.json";

/// Complete persisted document structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardFile {
    pub version: String,
    pub metadata: BoardMetadata,
    pub shapes: Vec<StoredShape>,
}

/// Document metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl BoardFile {
    /// Creates a new document envelope around the given shapes.
    pub fn new(shapes: Vec<StoredShape>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: BoardMetadata {
                name: "Untitled".to_string(),
                created: now,
                modified: now,
            },
            shapes,
        }
    }
}

/// A load/save pair over the persisted shape list.
///
/// The editor only ever replaces the full document; there are no partial
/// writes. Implementations must be shareable with the save scheduler's
/// timer thread.
pub trait DocumentStore: Send + Sync {
    /// Reads the persisted shape list. Absent or malformed data loads as an
    /// empty list.
    fn load(&self) -> PersistenceResult<Vec<StoredShape>>;

    /// Writes the shape list, fully replacing prior contents.
    fn save(&self, shapes: &[StoredShape]) -> PersistenceResult<()>;
}

/// JSON file backend.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store persisting to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default location under the user config
    /// directory.
    pub fn open_default() -> PersistenceResult<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Resolves the default document path.
    pub fn default_path() -> PersistenceResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            PersistenceError::StorageDirectory("no config directory for this user".to_string())
        })?;
        Ok(base.join("shapeboard").join(DEFAULT_FILE_NAME))
    }

    /// Returns the path this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_envelope(&self) -> Option<BoardFile> {
        let data = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<BoardFile>(&data) {
            Ok(file) => Some(file),
            // Early documents were a bare array of shapes.
            Err(_) => serde_json::from_str::<Vec<StoredShape>>(&data)
                .ok()
                .map(BoardFile::new),
        }
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> PersistenceResult<Vec<StoredShape>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no persisted document, starting empty");
            return Ok(Vec::new());
        }

        match self.read_envelope() {
            Some(file) => {
                debug!(shapes = file.shapes.len(), "loaded document");
                Ok(file.shapes)
            }
            None => {
                warn!(path = %self.path.display(), "unreadable document, starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, shapes: &[StoredShape]) -> PersistenceResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = BoardFile::new(shapes.to_vec());
        // Keep the original creation timestamp across rewrites.
        if let Some(previous) = self.read_envelope() {
            file.metadata.name = previous.metadata.name;
            file.metadata.created = previous.metadata.created;
        }

        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)?;
        debug!(shapes = shapes.len(), path = %self.path.display(), "saved document");
        Ok(())
    }
}

/// In-memory backend used in tests; counts writes so debounce behavior can
/// be asserted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    shapes: Mutex<Vec<StoredShape>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with shapes.
    pub fn with_shapes(shapes: Vec<StoredShape>) -> Self {
        Self {
            shapes: Mutex::new(shapes),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of completed writes.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Snapshot of the currently persisted shapes.
    pub fn shapes(&self) -> Vec<StoredShape> {
        self.shapes.lock().clone()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> PersistenceResult<Vec<StoredShape>> {
        Ok(self.shapes.lock().clone())
    }

    fn save(&self, shapes: &[StoredShape]) -> PersistenceResult<()> {
        *self.shapes.lock() = shapes.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
