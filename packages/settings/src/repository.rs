//! Persistence of the single settings document

use crate::document::SettingsDocument;
use adminstyle_common::{read_json, write_json, CommonError, FileSystem};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("settings store error: {0}")]
    Store(#[from] CommonError),

    #[error("stored settings are corrupt: {0}")]
    Corrupt(String),

    #[error("settings store lock poisoned")]
    Poisoned,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Whole-document store: read and written as a unit
pub trait SettingsRepository: Send + Sync {
    /// The raw persisted tree, `None` before the first save
    fn load(&self) -> RepositoryResult<Option<Value>>;

    fn save(&self, document: &SettingsDocument) -> RepositoryResult<()>;
}

/// Load the persisted document, reconciled against the default skeleton,
/// or the defaults when nothing was stored yet
pub fn load_or_default(repository: &dyn SettingsRepository) -> RepositoryResult<SettingsDocument> {
    match repository.load()? {
        Some(value) => {
            SettingsDocument::from_value(&value).map_err(|e| RepositoryError::Corrupt(e.to_string()))
        }
        None => {
            debug!("No stored settings, using defaults");
            Ok(SettingsDocument::default())
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    document: RwLock<Option<Value>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a raw tree, which need not be a valid document
    pub fn with_value(value: Value) -> Self {
        Self {
            document: RwLock::new(Some(value)),
        }
    }
}

impl SettingsRepository for InMemoryRepository {
    fn load(&self) -> RepositoryResult<Option<Value>> {
        let document = self.document.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(document.clone())
    }

    fn save(&self, document: &SettingsDocument) -> RepositoryResult<()> {
        let mut stored = self.document.write().map_err(|_| RepositoryError::Poisoned)?;
        *stored = Some(document.to_value());
        Ok(())
    }
}

/// Document stored as pretty JSON at a fixed path
pub struct JsonFileRepository {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsRepository for JsonFileRepository {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> RepositoryResult<Option<Value>> {
        read_json::<Value>(self.fs.as_ref(), &self.path).map_err(|e| match e {
            CommonError::Json(e) => RepositoryError::Corrupt(e.to_string()),
            other => RepositoryError::Store(other),
        })
    }

    #[instrument(skip(self, document), fields(path = %self.path.display()))]
    fn save(&self, document: &SettingsDocument) -> RepositoryResult<()> {
        write_json(self.fs.as_ref(), &self.path, document)?;
        info!("Settings saved");
        Ok(())
    }
}
