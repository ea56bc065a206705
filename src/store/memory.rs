use super::{Store, StoreError};
use std::collections::HashMap;
use std::path::PathBuf;

/// In-process store for tests. Counts writes and can be told to fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, Vec<u8>>,
    pub puts: usize,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &[u8]) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_vec());
        store
    }

    pub fn value(&self, key: &str) -> Option<&[u8]> {
        self.values.get(key).map(Vec::as_slice)
    }

    fn injected_error(key: &str) -> StoreError {
        StoreError::Io {
            path: PathBuf::from(key),
            source: std::io::Error::other("injected failure"),
        }
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.fail_reads {
            return Err(Self::injected_error(key));
        }
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(Self::injected_error(key));
        }
        self.puts += 1;
        self.values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
