//! # Favorites Persistence
//!
//! The favorite set is stored whole under one fixed key (`favCountry`) as a
//! JSON array of country names. There are no incremental updates: every save
//! re-serializes the complete set, so the newest write always wins.
//!
//! ```text
//!  toggle ──► FavoritesWriter::submit(rev, set)
//!                    │  watch channel (latest value only)
//!                    ▼
//!             writer task ──► FavoritesStore::save ──► Action::FavoritesSaved
//! ```
//!
//! File writes use atomic rename (write `.tmp`, then `rename()`) so a reader
//! never sees a half-written set.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, mpsc};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::action::Action;

/// Storage key for the favorite set.
pub const FAVORITES_KEY: &str = "favCountry";

// ============================================================================
// FavoriteSet
// ============================================================================

/// Set of favorite country names. Never mutated in place; `toggled` returns a
/// new set.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct FavoriteSet(BTreeSet<String>);

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy with `name`'s membership flipped.
    pub fn toggled(&self, name: &str) -> FavoriteSet {
        let mut next = self.0.clone();
        if !next.remove(name) {
            next.insert(name.to_string());
        }
        FavoriteSet(next)
    }
}

impl<S: Into<String>> FromIterator<S> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        FavoriteSet(iter.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    Io(String),
    Encode(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "storage I/O error: {msg}"),
            StoreError::Encode(msg) => write!(f, "storage encode error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

// ============================================================================
// Stores
// ============================================================================

/// Durable home of the favorite set.
///
/// Calls are blocking; async callers go through `spawn_blocking`.
pub trait FavoritesStore: Send + Sync {
    /// Reads the stored set. Absent or unparsable values yield an empty set.
    fn load(&self) -> FavoriteSet;

    /// Replaces the stored set with `set`.
    fn save(&self, set: &FavoriteSet) -> Result<(), StoreError>;
}

/// Parses a stored value, treating corruption as "no favorites".
fn parse_stored(raw: &str) -> FavoriteSet {
    match serde_json::from_str::<FavoriteSet>(raw) {
        Ok(set) => set,
        Err(e) => {
            warn!("Stored favorites are unreadable, starting empty: {}", e);
            FavoriteSet::new()
        }
    }
}

/// One JSON file per key inside a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", FAVORITES_KEY))
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string(data).map_err(|e| StoreError::Encode(e.to_string()))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

impl FavoritesStore for FileStore {
    fn load(&self) -> FavoriteSet {
        let path = self.key_path();
        match fs::read_to_string(&path) {
            Ok(raw) => {
                let set = parse_stored(&raw);
                info!("Loaded {} favorites from {}", set.len(), path.display());
                set
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No favorites stored at {}", path.display());
                FavoriteSet::new()
            }
            Err(e) => {
                warn!("Failed to read favorites from {}: {}", path.display(), e);
                FavoriteSet::new()
            }
        }
    }

    fn save(&self, set: &FavoriteSet) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        atomic_write_json(&self.key_path(), set)
    }
}

/// Process-local store. Holds the serialized value so it behaves like the
/// file store, corruption included.
#[derive(Default)]
pub struct MemoryStore {
    raw: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose key already holds `raw`.
    pub fn with_raw(raw: &str) -> Self {
        Self {
            raw: Mutex::new(Some(raw.to_string())),
        }
    }

    /// The currently stored value, if any.
    pub fn raw(&self) -> Option<String> {
        self.raw.lock().ok().and_then(|guard| guard.clone())
    }
}

impl FavoritesStore for MemoryStore {
    fn load(&self) -> FavoriteSet {
        self.raw().map(|raw| parse_stored(&raw)).unwrap_or_default()
    }

    fn save(&self, set: &FavoriteSet) -> Result<(), StoreError> {
        let json = serde_json::to_string(set).map_err(|e| StoreError::Encode(e.to_string()))?;
        let mut guard = self
            .raw
            .lock()
            .map_err(|_| StoreError::Io("memory store poisoned".to_string()))?;
        *guard = Some(json);
        Ok(())
    }
}

// ============================================================================
// Background Writer
// ============================================================================

/// Fire-and-forget persistence of the favorite set.
///
/// Writes happen one at a time on a dedicated task. Submissions made while a
/// write is in flight collapse into the newest one.
pub struct FavoritesWriter {
    latest: watch::Sender<Option<(u64, FavoriteSet)>>,
    handle: JoinHandle<()>,
}

impl FavoritesWriter {
    /// Starts the writer task. Each completed write is reported as
    /// `Action::FavoritesSaved` on `results`.
    pub fn spawn(store: Arc<dyn FavoritesStore>, results: mpsc::Sender<Action>) -> Self {
        let (latest, mut rx) = watch::channel::<Option<(u64, FavoriteSet)>>(None);

        let handle = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let Some((revision, set)) = rx.borrow_and_update().clone() else {
                    continue;
                };
                debug!("Persisting favorites rev {} ({} names)", revision, set.len());

                let store = store.clone();
                let result = tokio::task::spawn_blocking(move || store.save(&set))
                    .await
                    .unwrap_or_else(|e| Err(StoreError::Io(e.to_string())));

                if let Err(ref e) = result {
                    warn!("Failed to persist favorites rev {}: {}", revision, e);
                }
                if results
                    .send(Action::FavoritesSaved { revision, result })
                    .is_err()
                {
                    debug!("Favorites save result dropped: receiver gone");
                }
            }
            debug!("Favorites writer stopped");
        });

        Self { latest, handle }
    }

    /// Queues `set` for writing, replacing anything not yet written.
    pub fn submit(&self, revision: u64, set: FavoriteSet) {
        self.latest.send_replace(Some((revision, set)));
    }

    /// Stops accepting work. The returned handle resolves once the last
    /// submitted set has been written.
    pub fn finish(self) -> JoinHandle<()> {
        drop(self.latest);
        self.handle
    }
}
