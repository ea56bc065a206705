use super::{Store, StoreError};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const LOCK_FILE: &str = "LOCK";

/// A store rooted at a directory, one file per key.
///
/// Opening takes an exclusive lock on `<root>/LOCK` that is held until the
/// store is dropped, so only one process can use a root at a time.
#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
    lock: File,
}

impl DirStore {
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;

        let lock_path = root.join(LOCK_FILE);
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|source| StoreError::Io {
                path: lock_path.clone(),
                source,
            })?;

        if let Err(e) = lock.try_lock_exclusive() {
            if e.kind() == fs2::lock_contended_error().kind() {
                return Err(StoreError::Locked(root));
            }
            return Err(StoreError::Io {
                path: lock_path,
                source: e,
            });
        }

        log::debug!("Opened store at {}", root.display());
        Ok(Self { root, lock })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key != LOCK_FILE
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

impl Store for DirStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.key_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        // Write beside the target and rename over it; readers never see a
        // half-written value.
        let tmp_path = self.root.join(format!("{}.tmp", key));
        fs::write(&tmp_path, value).map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &path).map_err(|source| StoreError::Io { path, source })
    }
}

impl Drop for DirStore {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.lock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        assert_eq!(store.get("model").unwrap(), None);
    }

    #[test]
    fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirStore::open(dir.path()).unwrap();

        store.put("model", b"first").unwrap();
        store.put("model", b"second").unwrap();
        assert_eq!(store.get("model").unwrap().as_deref(), Some(&b"second"[..]));
        assert!(!dir.path().join("model.tmp").exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = DirStore::open(dir.path()).unwrap();
            store.put("model", b"kept").unwrap();
        }
        let store = DirStore::open(dir.path()).unwrap();
        assert_eq!(store.get("model").unwrap().as_deref(), Some(&b"kept"[..]));
    }

    #[test]
    fn test_open_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("db");
        let store = DirStore::open(&root).unwrap();
        assert_eq!(store.root(), root.as_path());
        assert!(root.is_dir());
    }

    #[test]
    fn test_second_open_is_locked_out() {
        let dir = tempfile::tempdir().unwrap();
        let _first = DirStore::open(dir.path()).unwrap();

        let second = DirStore::open(dir.path());
        assert!(matches!(second, Err(StoreError::Locked(_))));
    }

    #[test]
    fn test_lock_released_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let first = DirStore::open(dir.path()).unwrap();
        drop(first);
        assert!(DirStore::open(dir.path()).is_ok());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirStore::open(dir.path()).unwrap();

        assert!(matches!(store.get("../escape"), Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.put("", b"x"), Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.put("LOCK", b"x"), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_unreadable_key_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        fs::create_dir(dir.path().join("model")).unwrap();

        assert!(matches!(store.get("model"), Err(StoreError::Io { .. })));
    }
}
