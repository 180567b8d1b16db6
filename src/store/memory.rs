use super::SnapshotStore;
use anyhow::Result;
use std::collections::HashMap;
use tracing::debug;

/// In-memory snapshot store, used in tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `write` and `remove_all` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self.entries.get(key).cloned();
        debug!(key, found = value.is_some(), "Memory READ");
        Ok(value)
    }

    fn write(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        debug!(key, bytes = value.len(), "Memory WRITE");
        self.entries.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.entries.remove(*key);
        }
        self.writes += 1;
        debug!(?keys, "Memory REMOVE");
        Ok(())
    }
}
