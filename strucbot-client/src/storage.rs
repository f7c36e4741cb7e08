use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use strucbot_api::UserResponse;

/// Fixed storage key. The persisted session survives restarts under this
/// name, wherever the storage implementation keeps it.
pub const STORAGE_KEY: &str = "auth-storage";

/// The session state that survives a restart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedAuth {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("persisted state is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Where the auth state is persisted. Pluggable so tests and non-desktop
/// hosts can provide their own backing.
pub trait AuthStorage: Send + Sync {
    fn load(&self) -> Result<Option<PersistedAuth>, StorageError>;
    fn save(&self, state: &PersistedAuth) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// JSON file under the given directory, named after [`STORAGE_KEY`].
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }
}

impl AuthStorage for FileStorage {
    fn load(&self) -> Result<Option<PersistedAuth>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, state: &PersistedAuth) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(state)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory storage, shared between clones.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<PersistedAuth>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<PersistedAuth>> {
        self.slot.lock().expect("auth storage lock poisoned")
    }
}

impl AuthStorage for MemoryStorage {
    fn load(&self) -> Result<Option<PersistedAuth>, StorageError> {
        Ok(self.lock().clone())
    }

    fn save(&self, state: &PersistedAuth) -> Result<(), StorageError> {
        *self.lock() = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.lock() = None;
        Ok(())
    }
}
