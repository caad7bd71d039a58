use crate::lock::{AtomicLock, LockId};
use crate::storage::traits::LockStore;
use anyhow::anyhow;
use log::*;
use ron::ser::PrettyConfig;
use std::fs;
use std::path::PathBuf;

/// A file-based store for lock state.
///
/// Each lock is saved in a file named after its id, e.g. `XLK7b0e…c4.ron`. Locks created from identical parameters and
/// terms share an id, so writing one replaces the other.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a new file store with the given path.
    ///
    /// # Arguments
    /// * `path` - The path to the directory where the lock files will be stored. Created if missing.
    pub fn new(path: PathBuf) -> Result<Self, std::io::Error> {
        if !path.exists() {
            fs::create_dir_all(&path)?;
        }
        Ok(Self { path })
    }

    /// Returns the path to the directory where the lock files are stored.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn file_for(&self, id: &LockId) -> PathBuf {
        self.path.join(format!("{}.ron", id.name()))
    }
}

impl LockStore for FileStore {
    fn write_lock(&mut self, lock: &AtomicLock) -> Result<(), anyhow::Error> {
        let file_path = self.file_for(lock.id());
        let config = PrettyConfig::new().compact_arrays(true).compact_maps(true);
        let val = ron::ser::to_string_pretty(lock, config)?;
        fs::write(&file_path, &val)?;
        debug!("Saved lock {} ({}) to {}", lock.name(), lock.state(), file_path.display());
        Ok(())
    }

    /// Deserializing re-derives the lock id from the stored fields and re-verifies the stored proof.
    fn load_lock(&self, id: &LockId) -> Result<AtomicLock, anyhow::Error> {
        let file_path = self.file_for(id);
        let val = fs::read_to_string(&file_path)?;
        let lock: AtomicLock = ron::de::from_str(&val)?;
        if lock.id() != id {
            return Err(anyhow!("{} holds lock {}, not {}", file_path.display(), lock.name(), id.name()));
        }
        Ok(lock)
    }
}
