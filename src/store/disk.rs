use crate::core::preferences::{PreferenceStore, Preferences};
use anyhow::{Context, Result};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION: &str = "preferences";
const KEY: &str = "currency-storage";

/// Preferences persisted as JSON in a fjall keyspace.
pub struct DiskPreferenceStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskPreferenceStore {
    /// Opens (or creates) the store under `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open preference store at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION, PartitionCreateOptions::default())
            .context("Failed to open preferences partition")?;
        debug!(path = %path.display(), "Opened preference store");
        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl PreferenceStore for DiskPreferenceStore {
    fn load(&self) -> Result<Option<Preferences>> {
        let Some(bytes) = self
            .partition
            .get(KEY)
            .context("Failed to read preferences")?
        else {
            debug!("Preferences MISS");
            return Ok(None);
        };
        let preferences =
            serde_json::from_slice(&bytes).context("Failed to decode stored preferences")?;
        debug!("Preferences HIT");
        Ok(Some(preferences))
    }

    fn save(&self, preferences: &Preferences) -> Result<()> {
        let bytes = serde_json::to_vec(preferences).context("Failed to encode preferences")?;
        self.partition
            .insert(KEY, bytes)
            .context("Failed to write preferences")?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to flush preferences")?;
        debug!("Preferences PUT");
        Ok(())
    }
}
