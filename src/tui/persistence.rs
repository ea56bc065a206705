use crate::checklist::codec;
use crate::checklist::models::AppState;
use crate::store::Store;
use anyhow::{Context, Result};

/// Key under which the whole checklist state is stored.
pub const MODEL_KEY: &str = "model";

/// Owns the store handle and moves `AppState` in and out of it.
pub struct Persister<S: Store> {
    store: S,
    last_saved: Option<Vec<u8>>,
}

impl<S: Store> Persister<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            last_saved: None,
        }
    }

    /// `Ok(None)` means nothing has been saved yet. Any other failure,
    /// including undecodable bytes, is an error.
    pub fn load(&mut self) -> Result<Option<AppState>> {
        let Some(bytes) = self
            .store
            .get(MODEL_KEY)
            .with_context(|| format!("Failed to read '{}' from store", MODEL_KEY))?
        else {
            log::info!("No saved checklist found");
            return Ok(None);
        };

        let mut state = codec::decode(&bytes)
            .with_context(|| format!("Failed to decode '{}' from store", MODEL_KEY))?;
        if state.normalize() {
            log::warn!("Repaired out-of-range cursor or selection in saved checklist");
        }
        log::info!("Loaded checklist with {} items", state.items.len());

        self.last_saved = Some(bytes);
        Ok(Some(state))
    }

    /// Writes the state unless it encodes to exactly what was last written.
    /// Returns whether a write happened.
    pub fn save(&mut self, state: &AppState) -> Result<bool> {
        let bytes = codec::encode(state)?;
        if self.last_saved.as_deref() == Some(bytes.as_slice()) {
            return Ok(false);
        }

        self.store
            .put(MODEL_KEY, &bytes)
            .with_context(|| format!("Failed to write '{}' to store", MODEL_KEY))?;
        log::debug!("Saved checklist ({} bytes)", bytes.len());

        self.last_saved = Some(bytes);
        Ok(true)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
