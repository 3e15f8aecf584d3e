//! Generic keyed entity store
//!
//! One `EntityStore` exists per entity type. The store owns its entities and
//! hands out clones, so nothing a caller does to a returned value can reach
//! back into stored state. Creation order is preserved for `get_all`, which
//! downstream date sorts rely on as a stable secondary order.

use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File};
use std::hash::Hash;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{PocketError, PocketResult};
use crate::models::IdGenerator;

/// A value the store can own
///
/// The store assigns ids on creation via `from_input`, and merges partial
/// updates via `apply`. Implementations of `apply` must never touch the id.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    type Id: Clone + Eq + Hash + fmt::Display + From<String>;
    type Input;
    type Patch;

    /// Prefix for generated ids, also used as the entity label in logs
    const ID_PREFIX: &'static str;

    fn id(&self) -> &Self::Id;

    fn from_input(id: Self::Id, input: Self::Input) -> Self;

    fn apply(&mut self, patch: Self::Patch);
}

/// On-disk snapshot of a store: id generator state plus items in creation order
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "E: Serialize",
    deserialize = "E: DeserializeOwned"
))]
struct Snapshot<E> {
    #[serde(flatten)]
    ids: IdGenerator,
    #[serde(default = "Vec::new")]
    items: Vec<E>,
}

impl<E: Entity> Snapshot<E> {
    /// `None` when the file does not exist yet
    fn read_from(path: &Path) -> PocketResult<Option<Self>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(PocketError::Storage(format!(
                    "Failed to open {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        serde_json::from_reader(BufReader::new(file))
            .map(Some)
            .map_err(|e| PocketError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Replace `path` atomically: the new contents go to a temp file in the
    /// same directory, which is synced and then renamed over the target
    fn write_to(&self, path: &Path) -> PocketResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| {
            PocketError::Storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        let storage_err = |what: &str, e: &dyn fmt::Display| {
            PocketError::Storage(format!("Failed to {} {}: {}", what, path.display(), e))
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| storage_err("stage", &e))?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, self)
                .map_err(|e| storage_err("serialize", &e))?;
            writer.flush().map_err(|e| storage_err("write", &e))?;
        }
        temp.as_file()
            .sync_all()
            .map_err(|e| storage_err("sync", &e))?;
        temp.persist(path).map_err(|e| storage_err("replace", &e.error))?;
        Ok(())
    }
}

struct StoreState<E: Entity> {
    items: HashMap<E::Id, E>,
    order: Vec<E::Id>,
    ids: IdGenerator,
}

impl<E: Entity> StoreState<E> {
    fn new() -> Self {
        Self {
            items: HashMap::new(),
            order: Vec::new(),
            ids: IdGenerator::new(),
        }
    }

    fn snapshot(&self) -> Vec<E> {
        self.order
            .iter()
            .filter_map(|id| self.items.get(id).cloned())
            .collect()
    }
}

/// Keyed collection with create/get/update/delete/clear
///
/// Mutations take the write lock; reads clone a snapshot under the read lock.
pub struct EntityStore<E: Entity> {
    path: Option<PathBuf>,
    state: RwLock<StoreState<E>>,
}

impl<E: Entity> EntityStore<E> {
    /// A store that lives only in memory
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: RwLock::new(StoreState::new()),
        }
    }

    /// A store backed by a JSON snapshot file
    ///
    /// Nothing is read until `load` is called; nothing is written until `save`.
    pub fn with_file(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            state: RwLock::new(StoreState::new()),
        }
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn read(&self) -> PocketResult<RwLockReadGuard<'_, StoreState<E>>> {
        self.state
            .read()
            .map_err(|e| PocketError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> PocketResult<RwLockWriteGuard<'_, StoreState<E>>> {
        self.state
            .write()
            .map_err(|e| PocketError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace the in-memory contents with the backing file's contents
    pub fn load(&self) -> PocketResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        // A missing file is an empty store
        let snapshot = Snapshot::<E>::read_from(path)?.unwrap_or(Snapshot {
            ids: IdGenerator::new(),
            items: Vec::new(),
        });
        let mut state = self.write()?;

        state.items.clear();
        state.order.clear();
        state.ids = snapshot.ids;

        for item in snapshot.items {
            let id = item.id().clone();
            if state.items.insert(id.clone(), item).is_some() {
                warn!(entity = E::ID_PREFIX, %id, "duplicate id in snapshot, keeping last");
            } else {
                state.order.push(id);
            }
        }

        debug!(
            entity = E::ID_PREFIX,
            count = state.order.len(),
            path = %path.display(),
            "loaded store"
        );
        Ok(())
    }

    /// Write the current contents to the backing file (no-op when in memory)
    pub fn save(&self) -> PocketResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let state = self.read()?;
        let snapshot = Snapshot {
            ids: state.ids.clone(),
            items: state.snapshot(),
        };
        snapshot.write_to(path)?;

        debug!(entity = E::ID_PREFIX, count = snapshot.items.len(), "saved store");
        Ok(())
    }

    /// Store a new entity under a freshly generated id and return a copy
    pub fn create(&self, input: E::Input) -> PocketResult<E> {
        let mut state = self.write()?;

        let id = E::Id::from(state.ids.next_id(E::ID_PREFIX));
        let entity = E::from_input(id.clone(), input);

        state.items.insert(id.clone(), entity.clone());
        state.order.push(id.clone());

        debug!(entity = E::ID_PREFIX, %id, "created");
        Ok(entity)
    }

    pub fn get_by_id(&self, id: &E::Id) -> PocketResult<Option<E>> {
        Ok(self.read()?.items.get(id).cloned())
    }

    /// All entities in creation order
    pub fn get_all(&self) -> PocketResult<Vec<E>> {
        Ok(self.read()?.snapshot())
    }

    /// Merge a patch over an existing entity; `None` if the id is unknown
    pub fn update(&self, id: &E::Id, patch: E::Patch) -> PocketResult<Option<E>> {
        Ok(self.update_tracked(id, patch)?.map(|(_, after)| after))
    }

    /// Like `update`, but also returns the entity as it was before the patch
    pub fn update_tracked(&self, id: &E::Id, patch: E::Patch) -> PocketResult<Option<(E, E)>> {
        let mut state = self.write()?;

        let Some(entity) = state.items.get_mut(id) else {
            return Ok(None);
        };

        let before = entity.clone();
        entity.apply(patch);
        let after = entity.clone();

        debug!(entity = E::ID_PREFIX, %id, "updated");
        Ok(Some((before, after)))
    }

    /// Remove an entity; `true` iff it existed
    pub fn delete(&self, id: &E::Id) -> PocketResult<bool> {
        Ok(self.remove(id)?.is_some())
    }

    /// Remove an entity and return it
    pub fn remove(&self, id: &E::Id) -> PocketResult<Option<E>> {
        let mut state = self.write()?;

        let removed = state.items.remove(id);
        if removed.is_some() {
            state.order.retain(|existing| existing != id);
            debug!(entity = E::ID_PREFIX, %id, "deleted");
        }
        Ok(removed)
    }

    /// Remove everything and rewind the id counter
    pub fn clear(&self) -> PocketResult<()> {
        let mut state = self.write()?;

        state.items.clear();
        state.order.clear();
        state.ids.reset();

        debug!(entity = E::ID_PREFIX, "cleared");
        Ok(())
    }

    pub fn count(&self) -> PocketResult<usize> {
        Ok(self.read()?.items.len())
    }

    pub fn is_empty(&self) -> PocketResult<bool> {
        Ok(self.count()? == 0)
    }
}

impl<E: Entity> Default for EntityStore<E> {
    fn default() -> Self {
        Self::in_memory()
    }
}
