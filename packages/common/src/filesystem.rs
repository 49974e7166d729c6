use crate::result::CommonResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// File system abstraction for the persisted stores and testing
pub trait FileSystem: Send + Sync {
    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Read a file, returning `None` when it does not exist
    fn read(&self, path: &Path) -> Result<Option<String>, std::io::Error>;

    /// Replace the contents of a file, creating parent directories as needed
    fn write(&self, path: &Path, contents: &str) -> Result<(), std::io::Error>;

    /// Remove a file. Removing a missing file is not an error.
    fn remove(&self, path: &Path) -> Result<(), std::io::Error>;
}

/// Real file system implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> Result<Option<String>, std::io::Error> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Write next to the target, then rename over it
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, path)
    }

    fn remove(&self, path: &Path) -> Result<(), std::io::Error> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory file system for testing
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<HashMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), contents.into());
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.read().map(|files| files.len()).unwrap_or(0)
    }
}

fn poisoned() -> std::io::Error {
    std::io::Error::other("memory file system lock poisoned")
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .map(|files| files.contains_key(path))
            .unwrap_or(false)
    }

    fn read(&self, path: &Path) -> Result<Option<String>, std::io::Error> {
        let files = self.files.read().map_err(|_| poisoned())?;
        Ok(files.get(path).cloned())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), std::io::Error> {
        let mut files = self.files.write().map_err(|_| poisoned())?;
        files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<(), std::io::Error> {
        let mut files = self.files.write().map_err(|_| poisoned())?;
        files.remove(path);
        Ok(())
    }
}

/// Read and deserialize a JSON file; `None` when the file is missing
pub fn read_json<T: DeserializeOwned>(fs: &dyn FileSystem, path: &Path) -> CommonResult<Option<T>> {
    match fs.read(path)? {
        Some(content) => Ok(Some(serde_json::from_str(&content)?)),
        None => Ok(None),
    }
}

/// Serialize a value as pretty JSON and write it to `path`
pub fn write_json<T: Serialize>(fs: &dyn FileSystem, path: &Path, value: &T) -> CommonResult<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs.write(path, &content)?;
    Ok(())
}
