//! # Shapeboard Persistence
//!
//! Storage backends and save scheduling for the Shapeboard editor.
//!
//! The editor treats storage as a plain load/save pair behind the
//! [`DocumentStore`] trait. Saves are coalesced by [`SaveScheduler`], a
//! trailing-edge debounce: every mutation re-arms an idle timer and the
//! write happens only after the user pauses, or immediately on a forced
//! flush (tab hidden, window closing).

pub mod error;
pub mod scheduler;
pub mod storage;

pub use error::{PersistenceError, PersistenceResult};
pub use scheduler::{SaveScheduler, DEFAULT_SAVE_DELAY};
pub use storage::{BoardFile, BoardMetadata, DocumentStore, JsonFileStore, MemoryStore};
