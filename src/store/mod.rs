//! Durable key-value byte storage.
//!
//! The checklist only ever touches one key, but the store itself knows
//! nothing about checklists: it hands out opaque bytes.

pub mod dir;
#[cfg(test)]
pub mod memory;

use std::path::PathBuf;

pub use dir::DirStore;

pub trait Store {
    /// Returns `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    Locked(PathBuf),
    InvalidKey(String),
    Io { path: PathBuf, source: std::io::Error },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Locked(path) => {
                write!(f, "Store at {} is already open in another process", path.display())
            }
            StoreError::InvalidKey(key) => {
                write!(f, "Invalid store key '{}'", key)
            }
            StoreError::Io { path, source } => {
                write!(f, "Store I/O failed at {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
