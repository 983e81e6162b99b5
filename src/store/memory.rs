use crate::core::preferences::{PreferenceStore, Preferences};
use anyhow::{Result, anyhow};
use std::sync::RwLock;
use tracing::debug;

/// Keeps preferences for the lifetime of the process only.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    inner: RwLock<Option<Preferences>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: Preferences) -> Self {
        Self {
            inner: RwLock::new(Some(preferences)),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Option<Preferences>> {
        let guard = self
            .inner
            .read()
            .map_err(|_| anyhow!("Preference store lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, preferences: &Preferences) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| anyhow!("Preference store lock poisoned"))?;
        debug!("Preferences PUT");
        *guard = Some(preferences.clone());
        Ok(())
    }
}
