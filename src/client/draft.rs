use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::client::error::ClientError;

/// Key under which the HR posting form keeps its draft.
pub const JOB_FORM_KEY: &str = "hrJobFormData";

/// Durable key-value storage for unsubmitted form state. Writes replace the
/// previous value for the key; nothing is merged.
pub trait DraftStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, ClientError>;
    fn save(&self, key: &str, value: &str) -> Result<(), ClientError>;
    fn clear(&self, key: &str) -> Result<(), ClientError>;
}

impl<T: DraftStore + ?Sized> DraftStore for Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>, ClientError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ClientError> {
        (**self).save(key, value)
    }

    fn clear(&self, key: &str) -> Result<(), ClientError> {
        (**self).clear(key)
    }
}

/// Process-local store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self, key: &str) -> Result<Option<String>, ClientError> {
        let entries = self.entries.lock().expect("draft store mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut entries = self.entries.lock().expect("draft store mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), ClientError> {
        let mut entries = self.entries.lock().expect("draft store mutex poisoned");
        entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key inside `dir`. Survives restarts.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, ClientError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ClientError::Draft(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid draft key: {:?}", key),
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self, key: &str) -> Result<Option<String>, ClientError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), ClientError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
