use super::SnapshotStore;
use anyhow::{Context, Result};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION: &str = "snapshots";

/// Snapshot store backed by a fjall keyspace on local disk.
///
/// Every write is flushed with `PersistMode::SyncAll` before returning.
pub struct DiskStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open ledger at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION, PartitionCreateOptions::default())
            .context("Failed to open snapshot partition")?;
        debug!("Opened ledger at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl SnapshotStore for DiskStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .partition
            .get(key)
            .with_context(|| format!("Failed to read snapshot {key}"))?;
        debug!(key, found = value.is_some(), "Disk READ");
        Ok(value.map(|v| v.to_vec()))
    }

    fn write(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        debug!(key, bytes = value.len(), "Disk WRITE");
        self.partition
            .insert(key, value)
            .with_context(|| format!("Failed to write snapshot {key}"))?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to flush ledger to disk")?;
        Ok(())
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        let mut batch = self.keyspace.batch();
        for key in keys {
            batch.remove(&self.partition, *key);
        }
        batch.commit().context("Failed to remove snapshots")?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to flush ledger to disk")?;
        debug!(?keys, "Disk REMOVE");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_disk_store_read_write() {
        let dir = tempdir().unwrap();
        let mut store = DiskStore::open(dir.path()).unwrap();

        // Initially, store is empty
        assert!(store.read("key1").unwrap().is_none());

        store.write("key1", b"[1,2]".to_vec()).unwrap();
        assert_eq!(store.read("key1").unwrap(), Some(b"[1,2]".to_vec()));

        // Get a non-existent key
        assert!(store.read("key2").unwrap().is_none());
    }

    #[test]
    fn test_disk_store_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let mut store = DiskStore::open(dir.path()).unwrap();
            store.write("key1", b"persisted".to_vec()).unwrap();
        }

        let store = DiskStore::open(dir.path()).unwrap();
        assert_eq!(store.read("key1").unwrap(), Some(b"persisted".to_vec()));
    }

    #[test]
    fn test_disk_store_remove_all() {
        let dir = tempdir().unwrap();
        let mut store = DiskStore::open(dir.path()).unwrap();

        store.write("key1", b"a".to_vec()).unwrap();
        store.write("key2", b"b".to_vec()).unwrap();
        store.remove_all(&["key1", "key2"]).unwrap();

        assert!(store.read("key1").unwrap().is_none());
        assert!(store.read("key2").unwrap().is_none());
    }
}
